//! In-memory file system with scripted pickers
//!
//! `MemoryFileSystem` stands in for the platform when there is no user to
//! click through a dialog: tests, headless hosts, and previews. Picker
//! answers are queued up front with [`MemoryFileSystem::push_response`];
//! an empty queue behaves like a dismissed dialog.
//!
//! The backend honors the same contracts a real picker does: with the
//! "all files" choice excluded, a name outside the filters cannot be
//! selected, and nothing reaches storage until a stream is closed.

use crate::error::{Error, Result};
use crate::files::picker::{PickerKind, PickerOptions};
use crate::files::system::{FileSystem, WritableStream};
use log::debug;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// What the simulated user does when the next picker opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerResponse {
    /// Choose the file with this name
    Select(String),
    /// Dismiss the dialog
    Cancel,
    /// The platform refuses access
    Deny,
}

/// Handle to a file in a [`MemoryFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoryHandle {
    name: String,
}

impl MemoryHandle {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    responses: RefCell<VecDeque<PickerResponse>>,
    last_options: RefCell<Option<PickerOptions>>,
    open_streams: Cell<usize>,
    write_failure: Cell<Option<io::ErrorKind>>,
    close_failure: Cell<Option<io::ErrorKind>>,
}

/// A single-threaded, in-memory [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    state: Rc<MemoryState>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the simulated user's answer for the next picker.
    pub fn push_response(&self, response: PickerResponse) {
        self.state.responses.borrow_mut().push_back(response);
    }

    /// Shorthand for queueing a [`PickerResponse::Select`].
    pub fn select(&self, name: impl Into<String>) {
        self.push_response(PickerResponse::Select(name.into()));
    }

    /// Place a file in storage.
    pub fn insert_file(&self, name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.state
            .files
            .borrow_mut()
            .insert(name.into(), contents.into());
    }

    /// Committed contents of a file, if it exists.
    pub fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.state.files.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.files.borrow().contains_key(name)
    }

    /// Number of writable streams that are neither closed nor dropped.
    pub fn open_streams(&self) -> usize {
        self.state.open_streams.get()
    }

    /// Options passed to the most recent picker.
    pub fn last_picker_options(&self) -> Option<PickerOptions> {
        self.state.last_options.borrow().clone()
    }

    /// Make every following stream write fail with `kind`, or stop failing
    /// with `None`.
    pub fn fail_writes(&self, kind: Option<io::ErrorKind>) {
        self.state.write_failure.set(kind);
    }

    /// Make every following close fail with `kind` before anything is
    /// committed, or stop failing with `None`.
    pub fn fail_closes(&self, kind: Option<io::ErrorKind>) {
        self.state.close_failure.set(kind);
    }

    /// Resolve the next scripted response against a picker request.
    fn answer(&self, options: &PickerOptions) -> Result<MemoryHandle> {
        *self.state.last_options.borrow_mut() = Some(options.clone());

        let response = self
            .state
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(PickerResponse::Cancel);

        match response {
            PickerResponse::Cancel => Err(Error::Cancelled),
            PickerResponse::Deny => Err(Error::PermissionDenied {
                message: format!("access to '{}' picker was refused", options.title),
            }),
            PickerResponse::Select(name) => {
                if !options.permits(&name) {
                    return Err(Error::FilterMismatch {
                        name,
                        filter: options.filter_label().to_string(),
                    });
                }
                if options.kind == PickerKind::Open && !self.contains(&name) {
                    return Err(Error::FileRead {
                        path: PathBuf::from(&name),
                        source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
                    });
                }
                debug!("Picker '{}' selected {}", options.title, name);
                Ok(MemoryHandle { name })
            }
        }
    }
}

impl FileSystem for MemoryFileSystem {
    type Handle = MemoryHandle;
    type Writable = MemoryWritable;

    async fn show_open_picker(&self, options: &PickerOptions) -> Result<MemoryHandle> {
        self.answer(options)
    }

    async fn show_save_picker(&self, options: &PickerOptions) -> Result<MemoryHandle> {
        self.answer(options)
    }

    async fn create_writable(&self, handle: &MemoryHandle) -> Result<MemoryWritable> {
        self.state.open_streams.set(self.state.open_streams.get() + 1);
        Ok(MemoryWritable {
            state: Rc::clone(&self.state),
            name: handle.name.clone(),
            buffer: Vec::new(),
        })
    }

    async fn read_all(&self, handle: &MemoryHandle) -> Result<Vec<u8>> {
        self.file(&handle.name).ok_or_else(|| Error::FileRead {
            path: PathBuf::from(&handle.name),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Writable Stream
// ─────────────────────────────────────────────────────────────────────────────

/// Buffers writes and commits them to the owning file system on close.
#[derive(Debug)]
pub struct MemoryWritable {
    state: Rc<MemoryState>,
    name: String,
    buffer: Vec<u8>,
}

impl WritableStream for MemoryWritable {
    async fn write(&mut self, payload: &[u8]) -> Result<()> {
        if let Some(kind) = self.state.write_failure.get() {
            return Err(Error::FileWrite {
                path: PathBuf::from(&self.name),
                source: io::Error::new(kind, "simulated write failure"),
            });
        }
        self.buffer.extend_from_slice(payload);
        Ok(())
    }

    async fn close(mut self) -> Result<()> {
        if let Some(kind) = self.state.close_failure.get() {
            return Err(Error::FileWrite {
                path: PathBuf::from(&self.name),
                source: io::Error::new(kind, "simulated close failure"),
            });
        }
        let contents = std::mem::take(&mut self.buffer);
        self.state
            .files
            .borrow_mut()
            .insert(self.name.clone(), contents);
        Ok(())
    }
}

impl Drop for MemoryWritable {
    fn drop(&mut self) {
        self.state.open_streams.set(self.state.open_streams.get() - 1);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
