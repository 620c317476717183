//! Native file dialog integration using the rfd crate
//!
//! This module implements [`FileSystem`] for desktop targets. Pickers are
//! native dialogs shown through `rfd::AsyncFileDialog`; handles are plain
//! paths; writable streams stage their output next to the target and
//! rename it into place on close.
//!
//! Blocking file system calls run on a short-lived worker thread and are
//! awaited through a oneshot channel, so the caller's executor thread is
//! never held up by disk I/O.

use crate::error::{Error, Result};
use crate::files::picker::{PickerKind, PickerOptions};
use crate::files::system::{FileSystem, WritableStream};
use futures::channel::oneshot;
use log::debug;
use rfd::AsyncFileDialog;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;

/// Suffix of the sibling file a stream writes to before it is committed.
const STAGING_SUFFIX: &str = ".partial";

/// Desktop [`FileSystem`] backed by native dialogs and `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct NativeFileSystem {
    default_dir: Option<PathBuf>,
}

impl NativeFileSystem {
    /// Pickers without a configured start directory open in the user's
    /// documents folder.
    pub fn new() -> Self {
        Self::with_default_dir(dirs::document_dir())
    }

    pub fn with_default_dir(default_dir: Option<PathBuf>) -> Self {
        Self { default_dir }
    }

    fn dialog(&self, options: &PickerOptions) -> AsyncFileDialog {
        let mut dialog = AsyncFileDialog::new().set_title(options.title.as_str());

        for filter in &options.filters {
            dialog = dialog.add_filter(filter.label.as_str(), filter.extensions.as_slice());
        }

        if !options.exclude_accept_all_option {
            dialog = dialog.add_filter("All Files", &["*"]);
        }

        if let Some(dir) = options.start_dir.as_ref().or(self.default_dir.as_ref()) {
            dialog = dialog.set_directory(dir);
        }

        if let Some(name) = &options.suggested_name {
            dialog = dialog.set_file_name(name.as_str());
        }

        dialog
    }
}

impl FileSystem for NativeFileSystem {
    type Handle = PathBuf;
    type Writable = NativeWritable;

    async fn show_open_picker(&self, options: &PickerOptions) -> Result<PathBuf> {
        let handle = self.dialog(options).pick_file().await.ok_or(Error::Cancelled)?;
        let path = handle.path().to_path_buf();
        debug!("Picked file: {}", path.display());
        Ok(path)
    }

    async fn show_save_picker(&self, options: &PickerOptions) -> Result<PathBuf> {
        let handle = self.dialog(options).save_file().await.ok_or(Error::Cancelled)?;
        let chosen = handle.path().to_path_buf();
        let options = options.clone();
        let path = unblock(move || ensure_extension(chosen, &options)).await??;
        debug!("Picked save target: {}", path.display());
        Ok(path)
    }

    async fn create_writable(&self, handle: &PathBuf) -> Result<NativeWritable> {
        let target = handle.clone();
        unblock(move || NativeWritable::create(&target)).await?
    }

    async fn read_all(&self, handle: &PathBuf) -> Result<Vec<u8>> {
        let path = handle.clone();
        unblock(move || fs::read(&path))
            .await
            .and_then(|result| result)
            .map_err(|e| Error::FileRead {
                path: handle.clone(),
                source: e,
            })
    }
}

/// Run a blocking task on a worker thread and await its result.
///
/// The outer error reports a worker that could not be started or that
/// stopped before sending a result.
async fn unblock<T, F>(task: F) -> io::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (sender, receiver) = oneshot::channel();
    thread::Builder::new()
        .name("file-gateway-io".to_string())
        .spawn(move || {
            let _ = sender.send(task());
        })?;

    receiver
        .await
        .map_err(|_canceled| io::Error::new(io::ErrorKind::Other, "I/O worker stopped early"))
}

/// Check a save target against the picker's filters, appending the first
/// accepted extension when the name has none.
///
/// Some platform dialogs return exactly what was typed, so `notes` would
/// otherwise be written without `.ron`. The dialog only asked about
/// overwriting the typed name, so a repaired name that already exists is
/// refused rather than silently replaced. A name with a foreign extension
/// is refused as well.
pub fn ensure_extension(path: PathBuf, options: &PickerOptions) -> Result<PathBuf> {
    if options.kind != PickerKind::Save || options.permits(&path.to_string_lossy()) {
        return Ok(path);
    }

    let mismatch = |path: &Path| Error::FilterMismatch {
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        filter: options.filter_label().to_string(),
    };

    if path.extension().is_some() {
        return Err(mismatch(&path));
    }

    let Some(ext) = options.filters.first().and_then(|f| f.primary_extension()) else {
        return Err(mismatch(&path));
    };

    let mut name: OsString = path.clone().into_os_string();
    name.push(".");
    name.push(ext);
    let repaired = PathBuf::from(name);

    if repaired.exists() {
        return Err(mismatch(&path));
    }
    Ok(repaired)
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

/// Flush the staging file and move it over the resolved target, keeping
/// the permissions of an existing target.
fn commit(file: Option<File>, staging: &Path, resolved: &Path) -> io::Result<()> {
    if let Some(file) = file {
        file.sync_all()?;
    }

    if let Ok(metadata) = fs::metadata(resolved) {
        fs::set_permissions(staging, metadata.permissions())?;
    }

    fs::rename(staging, resolved)
}

// ─────────────────────────────────────────────────────────────────────────────
// Writable Stream
// ─────────────────────────────────────────────────────────────────────────────

/// Writes to a staging file and renames it over the target on close.
///
/// An existing target is resolved through symlinks first, so the link is
/// kept and the file it points to is replaced. Ownership of the replaced
/// file is not carried over; it belongs to the writing user afterwards.
///
/// A stream dropped before a successful close removes its staging file and
/// leaves the target untouched.
#[derive(Debug)]
pub struct NativeWritable {
    target: PathBuf,
    resolved: PathBuf,
    staging: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl NativeWritable {
    fn create(target: &Path) -> Result<Self> {
        let resolved = fs::canonicalize(target).unwrap_or_else(|_| target.to_path_buf());
        let staging = staging_path(&resolved);
        let file = File::create(&staging).map_err(|e| Error::FileWrite {
            path: target.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            target: target.to_path_buf(),
            resolved,
            staging,
            file: Some(file),
            committed: false,
        })
    }

    fn write_error(&self, source: io::Error) -> Error {
        Error::FileWrite {
            path: self.target.clone(),
            source,
        }
    }
}

impl WritableStream for NativeWritable {
    async fn write(&mut self, payload: &[u8]) -> Result<()> {
        let Some(mut file) = self.file.take() else {
            return Err(self.write_error(io::ErrorKind::BrokenPipe.into()));
        };

        let payload = payload.to_vec();
        let (file, result) = unblock(move || {
            let result = file.write_all(&payload);
            (file, result)
        })
        .await
        .map_err(|e| self.write_error(e))?;

        self.file = Some(file);
        result.map_err(|e| self.write_error(e))
    }

    async fn close(mut self) -> Result<()> {
        let file = self.file.take();
        let staging = self.staging.clone();
        let resolved = self.resolved.clone();

        unblock(move || commit(file, &staging, &resolved))
            .await
            .and_then(|result| result)
            .map_err(|e| self.write_error(e))?;
        self.committed = true;

        debug!("Committed {}", self.target.display());
        Ok(())
    }
}

impl Drop for NativeWritable {
    fn drop(&mut self) {
        if !self.committed {
            self.file.take();
            let _ = fs::remove_file(&self.staging);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
