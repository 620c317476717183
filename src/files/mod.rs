//! File operations module
//!
//! This module provides the file access gateway and the file system
//! backends it runs on: native dialogs on desktop, the File System Access
//! API in the browser, and an in-memory stand-in.

pub mod filters;
pub mod gateway;
pub mod memory;
pub mod picker;
pub mod system;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(target_arch = "wasm32")]
pub mod web;
