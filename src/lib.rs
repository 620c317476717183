//! file-gateway
//!
//! Open and save RON documents and SVG exports through user-mediated file
//! pickers, on desktop and in the browser.
//!
//! The host constructs a [`FileSystem`] backend, hands it to a
//! [`FileGateway`], and drives the gateway's async operations from its own
//! event loop:
//!
//! ```ignore
//! let gateway = FileGateway::new(NativeFileSystem::new());
//! let target = gateway.open_save_target(Format::Ron).await?;
//! gateway.write_text(&target, &scene_ron).await?;
//! ```

pub mod config;
pub mod error;
pub mod files;

pub use config::{load_config, GatewayConfig};
pub use error::{Error, FailureKind, Result};
pub use files::filters::{FileTypeFilter, Format};
pub use files::gateway::{FileAction, FileGateway, FileHandles, OpenMode, Opened};
pub use files::memory::{MemoryFileSystem, PickerResponse};
pub use files::picker::{PickerKind, PickerOptions};
pub use files::system::{FileSystem, WritableStream};

#[cfg(not(target_arch = "wasm32"))]
pub use files::native::NativeFileSystem;

#[cfg(target_arch = "wasm32")]
pub use files::web::WebFileSystem;
