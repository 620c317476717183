//! Configuration module for the file gateway
//!
//! This module holds the filter labels and picker behavior, including
//! serialization/deserialization to/from JSON and loading from a
//! host-provided file.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
