//! Centralized error handling for the file gateway
//!
//! This module provides a unified error type that covers every failure the
//! gateway can surface: picker cancellation, permission denial, file I/O,
//! and configuration loading.
//!
//! Errors are propagated exactly as the platform reported them. The
//! [`FailureKind`] taxonomy only classifies an error, it never rewrites it.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the gateway.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Picker Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// The picker dialog closed without a selection
    Cancelled,

    /// The platform refused access to the file or the picker
    PermissionDenied { message: String },

    /// The selected name is not accepted by any of the picker's filters
    FilterMismatch { name: String, filter: String },

    // ─────────────────────────────────────────────────────────────────────────
    // File I/O Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    /// Failed to read file contents
    FileRead { path: PathBuf, source: io::Error },

    /// Failed to open, write or commit a writable stream
    FileWrite { path: PathBuf, source: io::Error },

    /// A platform exception that does not map onto a known kind
    Platform { name: String, message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load configuration file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse configuration (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The user dismissed the picker.
    Cancelled,
    /// The platform denied access.
    PermissionDenied,
    /// A read or write stream failed.
    Io,
    /// Configuration or filter problems.
    Other,
}

impl Error {
    /// Classify this error without altering it.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Cancelled => FailureKind::Cancelled,
            Error::PermissionDenied { .. } => FailureKind::PermissionDenied,
            Error::Io(err)
            | Error::FileRead { source: err, .. }
            | Error::FileWrite { source: err, .. } => {
                if err.kind() == io::ErrorKind::PermissionDenied {
                    FailureKind::PermissionDenied
                } else {
                    FailureKind::Io
                }
            }
            Error::Platform { .. } => FailureKind::Io,
            Error::FilterMismatch { .. } | Error::ConfigLoad { .. } | Error::ConfigParse { .. } => {
                FailureKind::Other
            }
        }
    }

    /// Map a browser `DOMException` onto the error taxonomy.
    ///
    /// `AbortError` is what the pickers reject with when the user closes
    /// the dialog.
    pub fn from_dom_exception(name: &str, message: &str) -> Self {
        match name {
            "AbortError" => Error::Cancelled,
            "NotAllowedError" | "SecurityError" => Error::PermissionDenied {
                message: message.to_string(),
            },
            _ => Error::Platform {
                name: name.to_string(),
                message: message.to_string(),
            },
        }
    }

    /// Returns `true` if the user dismissed a picker.
    pub fn is_cancelled(&self) -> bool {
        self.kind() == FailureKind::Cancelled
    }
}

// Implement From traits for convenient error conversion
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Picker Errors
            Error::Cancelled => write!(f, "File dialog was cancelled"),
            Error::PermissionDenied { message } => write!(f, "Permission denied: {}", message),
            Error::FilterMismatch { name, filter } => {
                write!(f, "'{}' is not accepted by the {} filter", name, filter)
            }

            // File I/O Errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::FileRead { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            Error::FileWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            Error::Platform { name, message } => write!(f, "{}: {}", name, message),

            // Configuration Errors
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::FileRead { source, .. } => Some(source),
            Error::FileWrite { source, .. } => Some(source),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::Cancelled
            | Error::PermissionDenied { .. }
            | Error::FilterMismatch { .. }
            | Error::Platform { .. } => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_creation() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test error");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), FailureKind::Io);
    }

    #[test]
    fn test_cancelled_kind() {
        let err = Error::Cancelled;
        assert!(err.is_cancelled());
        assert_eq!(format!("{}", err), "File dialog was cancelled");
    }

    #[test]
    fn test_write_permission_error_classified_without_rewriting() {
        let path = PathBuf::from("/locked/notes.ron");
        let err = Error::FileWrite {
            path: path.clone(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert_eq!(err.kind(), FailureKind::PermissionDenied);
        assert!(matches!(err, Error::FileWrite { path: p, .. } if p == path));
    }

    #[test]
    fn test_platform_error_is_io_kind() {
        let err = Error::Platform {
            name: "NotReadableError".to_string(),
            message: "file changed".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Io);
        assert_eq!(format!("{}", err), "NotReadableError: file changed");
    }

    #[test]
    fn test_dom_exception_mapping() {
        assert!(Error::from_dom_exception("AbortError", "The user aborted a request.").is_cancelled());
        assert_eq!(
            Error::from_dom_exception("NotAllowedError", "denied").kind(),
            FailureKind::PermissionDenied
        );
        assert_eq!(
            Error::from_dom_exception("SecurityError", "cross-origin").kind(),
            FailureKind::PermissionDenied
        );
        assert!(matches!(
            Error::from_dom_exception("NotReadableError", "gone"),
            Error::Platform { name, .. } if name == "NotReadableError"
        ));
    }

    #[test]
    fn test_filter_mismatch_display() {
        let err = Error::FilterMismatch {
            name: "notes.txt".to_string(),
            filter: "Rusty Object Notation".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("notes.txt"));
        assert!(msg.contains("Rusty Object Notation"));
        assert_eq!(err.kind(), FailureKind::Other);
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("invalid json");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error as StdError;
        let err = Error::FileRead {
            path: PathBuf::from("a.ron"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_none_for_simple_variants() {
        use std::error::Error as StdError;
        assert!(Error::Cancelled.source().is_none());
        let err = Error::PermissionDenied {
            message: "denied".to_string(),
        };
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unwrap_or_warn_default_ok() {
        let result: Result<i32> = Ok(42);
        assert_eq!(result.unwrap_or_warn_default(0, "test context"), 42);
    }

    #[test]
    fn test_unwrap_or_warn_default_err() {
        let result: Result<i32> = Err(Error::Cancelled);
        assert_eq!(result.unwrap_or_warn_default(0, "test context"), 0);
    }
}
