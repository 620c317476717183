//! File type filters for the supported formats
//!
//! A filter pairs a human-readable label with a MIME type and the
//! extensions it accepts. Native dialogs only use the label and the
//! extensions; the browser picker also needs the MIME type.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Label shown for RON documents opened for editing or saved.
pub const RON_LABEL: &str = "Rusty Object Notation";

/// Label shown when a RON file is opened and read straight into memory.
pub const RON_RAW_LABEL: &str = "Rust Object Notation";

/// Label shown for SVG exports.
pub const SVG_LABEL: &str = "Scalable Vector Graphics";

const RON_MIME: &str = "text/plain";
const SVG_MIME: &str = "image/svg+xml";

const RON_EXTENSIONS: &[&str] = &["ron"];
const SVG_EXTENSIONS: &[&str] = &["svg"];

// ─────────────────────────────────────────────────────────────────────────────
// Format
// ─────────────────────────────────────────────────────────────────────────────

/// Formats a save target can be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Rusty Object Notation documents
    #[default]
    Ron,
    /// Scalable Vector Graphics exports
    Svg,
}

impl Format {
    /// Get the display label for this format.
    pub fn label(&self) -> &'static str {
        match self {
            Format::Ron => "RON",
            Format::Svg => "SVG",
        }
    }

    /// Get the primary file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Ron => RON_EXTENSIONS[0],
            Format::Svg => SVG_EXTENSIONS[0],
        }
    }

    /// Get all formats.
    pub fn all() -> &'static [Format] {
        &[Format::Ron, Format::Svg]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Type Filter
// ─────────────────────────────────────────────────────────────────────────────

/// A label + MIME type + extension tuple restricting what a picker shows.
///
/// Extensions are stored without the leading dot and in lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeFilter {
    pub label: String,
    pub mime_type: String,
    pub extensions: Vec<String>,
}

impl FileTypeFilter {
    /// Create a filter, normalizing the extensions.
    pub fn new(label: impl Into<String>, mime_type: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            label: label.into(),
            mime_type: mime_type.into(),
            extensions: extensions.iter().map(|ext| normalize_extension(ext)).collect(),
        }
    }

    /// The RON filter used when opening for edit and when saving.
    pub fn ron() -> Self {
        Self::new(RON_LABEL, RON_MIME, RON_EXTENSIONS)
    }

    /// The RON filter used by the read-into-memory path.
    pub fn ron_raw() -> Self {
        Self::new(RON_RAW_LABEL, RON_MIME, RON_EXTENSIONS)
    }

    /// The SVG export filter.
    pub fn svg() -> Self {
        Self::new(SVG_LABEL, SVG_MIME, SVG_EXTENSIONS)
    }

    /// Extensions with a leading dot, as the browser picker expects them.
    pub fn dotted_extensions(&self) -> Vec<String> {
        self.extensions.iter().map(|ext| format!(".{}", ext)).collect()
    }

    /// Check whether a file name or path carries one of this filter's extensions.
    pub fn accepts(&self, name: impl AsRef<Path>) -> bool {
        name.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|accepted| *accepted == ext)
            })
            .unwrap_or(false)
    }

    /// The extension appended to save targets that lack one.
    pub fn primary_extension(&self) -> Option<&str> {
        self.extensions.first().map(String::as_str)
    }
}

/// Strip a leading dot and lowercase an extension.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_table() {
        let ron = FileTypeFilter::ron();
        assert_eq!(ron.label, "Rusty Object Notation");
        assert_eq!(ron.mime_type, "text/plain");
        assert_eq!(ron.dotted_extensions(), vec![".ron"]);

        let ron_raw = FileTypeFilter::ron_raw();
        assert_eq!(ron_raw.label, "Rust Object Notation");
        assert_eq!(ron_raw.mime_type, "text/plain");
        assert_eq!(ron_raw.dotted_extensions(), vec![".ron"]);

        let svg = FileTypeFilter::svg();
        assert_eq!(svg.label, "Scalable Vector Graphics");
        assert_eq!(svg.mime_type, "image/svg+xml");
        assert_eq!(svg.dotted_extensions(), vec![".svg"]);
    }

    #[test]
    fn test_accepts_matching_extension() {
        let ron = FileTypeFilter::ron();
        assert!(ron.accepts("notes.ron"));
        assert!(ron.accepts("NOTES.RON"));
        assert!(ron.accepts("/some/dir/scene.ron"));
    }

    #[test]
    fn test_rejects_foreign_or_missing_extension() {
        let svg = FileTypeFilter::svg();
        assert!(!svg.accepts("shape.png"));
        assert!(!svg.accepts("shape"));
        assert!(!svg.accepts("shape.svg.bak"));
    }

    #[test]
    fn test_new_normalizes_extensions() {
        let filter = FileTypeFilter::new("Text", "text/plain", &[".TXT", " md "]);
        assert_eq!(filter.extensions, vec!["txt", "md"]);
        assert_eq!(filter.primary_extension(), Some("txt"));
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(Format::Ron.extension(), "ron");
        assert_eq!(Format::Svg.extension(), "svg");
        assert_eq!(Format::all().len(), 2);
    }

    #[test]
    fn test_format_serializes_lowercase() {
        let json = serde_json::to_string(&Format::Svg).unwrap();
        assert_eq!(json, "\"svg\"");
    }
}
