//! The file access gateway
//!
//! `FileGateway` is the single entry point a host application talks to. It
//! turns requests like "save this document" into picker interactions and
//! stream writes on an injected [`FileSystem`], applying the configured
//! filters.
//!
//! Every operation is one independent request/response: nothing is cached,
//! retried, or reported to the user. Failures come back exactly as the
//! backend produced them.

use crate::config::GatewayConfig;
use crate::error::Result;
use crate::files::filters::Format;
use crate::files::system::{FileSystem, WritableStream};
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Open Modes
// ─────────────────────────────────────────────────────────────────────────────

/// What an open operation hands back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Return the file handle so the document can be re-saved later
    #[default]
    Handle,
    /// Read the file at once and return its bytes
    Bytes,
}

/// Result of [`FileGateway::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened<H> {
    Handle(H),
    Bytes(Vec<u8>),
}

impl<H> Opened<H> {
    pub fn into_handle(self) -> Option<H> {
        match self {
            Opened::Handle(handle) => Some(handle),
            Opened::Bytes(_) => None,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Opened::Handle(_) => None,
            Opened::Bytes(bytes) => Some(bytes),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Menu-level file actions a host dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// "Open..."
    Open,
    /// "Save as..."
    Save,
    /// "Export as SVG..."
    Export,
}

impl FileAction {
    /// The format whose filter the action's picker uses.
    pub fn format(&self) -> Format {
        match self {
            FileAction::Open | FileAction::Save => Format::Ron,
            FileAction::Export => Format::Svg,
        }
    }
}

/// The handles a host currently holds, one slot per format.
///
/// A RON handle and an SVG handle never share a slot, so an export target
/// cannot end up receiving a document save or the other way round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandles<H> {
    ron: Option<H>,
    svg: Option<H>,
}

impl<H> Default for FileHandles<H> {
    fn default() -> Self {
        Self {
            ron: None,
            svg: None,
        }
    }
}

impl<H> FileHandles<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a handle obtained for `action`, replacing the previous one in
    /// the same slot.
    pub fn store(&mut self, action: FileAction, handle: H) {
        match action.format() {
            Format::Ron => self.ron = Some(handle),
            Format::Svg => self.svg = Some(handle),
        }
    }

    /// Whether a plain "Save" can go straight to an existing RON target.
    pub fn has_ron(&self) -> bool {
        self.ron.is_some()
    }

    pub fn has_svg(&self) -> bool {
        self.svg.is_some()
    }

    /// The handle saved content of `format` should go to.
    pub fn target(&self, format: Format) -> Option<&H> {
        match format {
            Format::Ron => self.ron.as_ref(),
            Format::Svg => self.svg.as_ref(),
        }
    }

    pub fn clear(&mut self) {
        self.ron = None;
        self.svg = None;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gateway
// ─────────────────────────────────────────────────────────────────────────────

/// Mediates between a host application and a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct FileGateway<F: FileSystem> {
    fs: F,
    config: GatewayConfig,
}

impl<F: FileSystem> FileGateway<F> {
    /// Create a gateway with the default filters.
    pub fn new(fs: F) -> Self {
        Self::with_config(fs, GatewayConfig::default())
    }

    pub fn with_config(fs: F, config: GatewayConfig) -> Self {
        Self { fs, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Let the user pick a RON document and return its handle.
    pub async fn open_ron_for_read(&self) -> Result<F::Handle> {
        let handle = self.fs.show_open_picker(&self.config.open_options()).await?;
        debug!("Opened RON document: {:?}", handle);
        Ok(handle)
    }

    /// Let the user choose where to save content of `format`.
    pub async fn open_save_target(&self, format: Format) -> Result<F::Handle> {
        self.open_save_target_named(format, None).await
    }

    /// Like [`open_save_target`](Self::open_save_target), pre-filling the
    /// picker with `suggested_name`.
    pub async fn open_save_target_named(
        &self,
        format: Format,
        suggested_name: Option<&str>,
    ) -> Result<F::Handle> {
        let options = self.config.save_options(format, suggested_name);
        let handle = self.fs.show_save_picker(&options).await?;
        debug!("Chose {} save target: {:?}", format.label(), handle);
        Ok(handle)
    }

    /// Write `payload` to `handle` in full and close the stream.
    ///
    /// If any step fails the stream is dropped without being committed.
    pub async fn write_bytes(&self, handle: &F::Handle, payload: &[u8]) -> Result<()> {
        let mut stream = self.fs.create_writable(handle).await?;
        stream.write(payload).await?;
        stream.close().await?;
        debug!("Wrote {} bytes to {:?}", payload.len(), handle);
        Ok(())
    }

    /// Write UTF-8 text to `handle`.
    pub async fn write_text(&self, handle: &F::Handle, text: &str) -> Result<()> {
        self.write_bytes(handle, text.as_bytes()).await
    }

    /// Read the whole file behind a handle obtained earlier.
    pub async fn read_bytes(&self, handle: &F::Handle) -> Result<Vec<u8>> {
        self.fs.read_all(handle).await
    }

    /// Let the user pick a RON file and return its contents directly.
    pub async fn open_and_read_bytes(&self) -> Result<Vec<u8>> {
        let handle = self
            .fs
            .show_open_picker(&self.config.open_raw_options())
            .await?;
        let bytes = self.fs.read_all(&handle).await?;
        debug!("Read {} bytes from {:?}", bytes.len(), handle);
        Ok(bytes)
    }

    /// Open a file, returning either its handle or its bytes.
    pub async fn open(&self, mode: OpenMode) -> Result<Opened<F::Handle>> {
        match mode {
            OpenMode::Handle => self.open_ron_for_read().await.map(Opened::Handle),
            OpenMode::Bytes => self.open_and_read_bytes().await.map(Opened::Bytes),
        }
    }

    /// Show the picker that belongs to a menu action.
    pub async fn request_handle(&self, action: FileAction) -> Result<F::Handle> {
        match action {
            FileAction::Open => self.open_ron_for_read().await,
            FileAction::Save | FileAction::Export => self.open_save_target(action.format()).await,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
