//! The file system capability the gateway is built on
//!
//! A backend provides user-mediated pickers, whole-file reads, and
//! close-to-commit writable streams. The gateway never reaches for a
//! platform global directly; it only talks to a value implementing
//! [`FileSystem`] that the host constructed and owns.
//!
//! All methods are `async` and single-threaded: the returned futures are not
//! required to be `Send`, matching the browser's event loop.

use crate::error::Result;
use crate::files::picker::PickerOptions;
use std::fmt;
use std::future::Future;

/// User-mediated access to files on the user's storage.
#[allow(async_fn_in_trait)]
pub trait FileSystem {
    /// Opaque, platform-owned reference to a selected or target file.
    type Handle: Clone + fmt::Debug;

    /// Sequential output channel bound to a handle.
    type Writable: WritableStream;

    /// Show a single-file open picker.
    ///
    /// Fails with [`Error::Cancelled`](crate::Error::Cancelled) when the user
    /// dismisses the dialog.
    async fn show_open_picker(&self, options: &PickerOptions) -> Result<Self::Handle>;

    /// Show a save-location picker. The chosen file need not exist.
    async fn show_save_picker(&self, options: &PickerOptions) -> Result<Self::Handle>;

    /// Open a writable stream on `handle`. Nothing is committed until the
    /// stream is closed.
    async fn create_writable(&self, handle: &Self::Handle) -> Result<Self::Writable>;

    /// Read the entire file behind `handle`.
    async fn read_all(&self, handle: &Self::Handle) -> Result<Vec<u8>>;
}

/// A close-to-commit output stream.
///
/// `close` consumes the stream, so a stream is finalized at most once.
/// Dropping a stream without closing it abandons the write.
#[allow(async_fn_in_trait)]
pub trait WritableStream {
    /// Append `payload` to the stream.
    async fn write(&mut self, payload: &[u8]) -> Result<()>;

    /// Commit everything written and release the stream.
    async fn close(self) -> Result<()>;
}

/// Close the stream held in `slot`, emptying the slot only once the close
/// succeeded.
///
/// On failure the stream stays in the slot so the owner's `Drop` still
/// abandons it.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) async fn release_after_close<S, F, Fut>(slot: &mut Option<S>, close: F) -> Result<()>
where
    S: Clone,
    F: FnOnce(S) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    if let Some(stream) = slot.clone() {
        close(stream).await?;
    }
    *slot = None;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use futures::executor::block_on;

    #[test]
    fn test_successful_close_empties_slot() {
        let mut slot = Some("stream");
        let result = block_on(release_after_close(&mut slot, |_| async { Ok(()) }));
        assert!(result.is_ok());
        assert!(slot.is_none());
    }

    #[test]
    fn test_failed_close_keeps_stream_for_abort() {
        let mut slot = Some("stream");
        let result = block_on(release_after_close(&mut slot, |_| async {
            Err(Error::Platform {
                name: "InvalidStateError".to_string(),
                message: "close rejected".to_string(),
            })
        }));
        assert!(matches!(result, Err(Error::Platform { .. })));
        assert_eq!(slot, Some("stream"));
    }

    #[test]
    fn test_empty_slot_is_already_closed() {
        let mut slot: Option<&str> = None;
        let mut called = false;
        let result = block_on(release_after_close(&mut slot, |_| {
            called = true;
            async { Ok(()) }
        }));
        assert!(result.is_ok());
        assert!(!called);
    }
}
