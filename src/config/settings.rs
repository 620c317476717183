//! Gateway configuration
//!
//! This module defines the `GatewayConfig` struct that holds the filter
//! labels and picker behavior, with serde support for JSON persistence.
//! Label text lives here as data so hosts can relabel a filter without
//! touching any behavior.

use crate::files::filters::{normalize_extension, FileTypeFilter, Format};
use crate::files::picker::PickerOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Title of the picker used to open a document.
const OPEN_TITLE: &str = "Open";

/// Title of the picker used to choose a RON save target.
const SAVE_TITLE: &str = "Save as";

/// Title of the picker used to choose an SVG export target.
const EXPORT_TITLE: &str = "Export as SVG";

// ─────────────────────────────────────────────────────────────────────────────
// Gateway Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Filters and picker behavior used by [`FileGateway`](crate::FileGateway).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Filter for opening and saving RON documents
    pub ron: FileTypeFilter,

    /// Filter for the open-and-read-bytes path
    pub ron_raw: FileTypeFilter,

    /// Filter for SVG exports
    pub svg: FileTypeFilter,

    /// Hide the platform's "all files" choice in every picker
    pub exclude_accept_all_option: bool,

    /// Directory pickers start in (backend default when `None`)
    pub start_dir: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            ron: FileTypeFilter::ron(),
            ron_raw: FileTypeFilter::ron_raw(),
            svg: FileTypeFilter::svg(),
            exclude_accept_all_option: true,
            start_dir: None,
        }
    }
}

impl GatewayConfig {
    /// Parse configuration from JSON and repair invalid values.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace blank labels and empty extension lists with the defaults and
    /// normalize extensions.
    pub fn sanitized(mut self) -> Self {
        sanitize_filter(&mut self.ron, FileTypeFilter::ron());
        sanitize_filter(&mut self.ron_raw, FileTypeFilter::ron_raw());
        sanitize_filter(&mut self.svg, FileTypeFilter::svg());
        self
    }

    /// The save filter for a format.
    pub fn filter(&self, format: Format) -> &FileTypeFilter {
        match format {
            Format::Ron => &self.ron,
            Format::Svg => &self.svg,
        }
    }

    /// Picker options for opening a RON document as a handle.
    pub fn open_options(&self) -> PickerOptions {
        self.apply(PickerOptions::open(OPEN_TITLE, self.ron.clone()))
    }

    /// Picker options for the open-and-read-bytes path.
    pub fn open_raw_options(&self) -> PickerOptions {
        self.apply(PickerOptions::open(OPEN_TITLE, self.ron_raw.clone()))
    }

    /// Picker options for choosing a save target.
    pub fn save_options(&self, format: Format, suggested_name: Option<&str>) -> PickerOptions {
        let title = match format {
            Format::Ron => SAVE_TITLE,
            Format::Svg => EXPORT_TITLE,
        };
        self.apply(PickerOptions::save(title, self.filter(format).clone()))
            .with_suggested_name(suggested_name.map(str::to_string))
    }

    fn apply(&self, options: PickerOptions) -> PickerOptions {
        options
            .with_accept_all(!self.exclude_accept_all_option)
            .with_start_dir(self.start_dir.clone())
    }
}

fn sanitize_filter(filter: &mut FileTypeFilter, default: FileTypeFilter) {
    filter.label = filter.label.trim().to_string();
    if filter.label.is_empty() {
        filter.label = default.label;
    }

    filter.mime_type = filter.mime_type.trim().to_string();
    if filter.mime_type.is_empty() {
        filter.mime_type = default.mime_type;
    }

    filter.extensions = filter
        .extensions
        .iter()
        .map(|ext| normalize_extension(ext))
        .filter(|ext| !ext.is_empty())
        .collect();
    if filter.extensions.is_empty() {
        filter.extensions = default.extensions;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::picker::PickerKind;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.ron.label, "Rusty Object Notation");
        assert_eq!(config.ron_raw.label, "Rust Object Notation");
        assert_eq!(config.svg.label, "Scalable Vector Graphics");
        assert!(config.exclude_accept_all_option);
        assert!(config.start_dir.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults_for_missing() {
        let config = GatewayConfig::from_json_sanitized(r#"{"exclude_accept_all_option": false}"#)
            .unwrap();
        assert!(!config.exclude_accept_all_option);
        assert_eq!(config.svg, FileTypeFilter::svg());
    }

    #[test]
    fn test_relabel_filter() {
        let json = r#"{"ron_raw": {"label": "Rusty Object Notation", "mime_type": "text/plain", "extensions": [".ron"]}}"#;
        let config = GatewayConfig::from_json_sanitized(json).unwrap();
        assert_eq!(config.ron_raw.label, "Rusty Object Notation");
        assert_eq!(config.ron_raw.extensions, vec!["ron"]);
    }

    #[test]
    fn test_sanitize_blank_label_and_empty_extensions() {
        let json = r#"{"svg": {"label": "   ", "mime_type": "", "extensions": ["", "."]}}"#;
        let config = GatewayConfig::from_json_sanitized(json).unwrap();
        assert_eq!(config.svg, FileTypeFilter::svg());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(GatewayConfig::from_json_sanitized("{ not json }").is_err());
    }

    #[test]
    fn test_save_options_per_format() {
        let config = GatewayConfig::default();

        let ron = config.save_options(Format::Ron, Some("notes.ron"));
        assert_eq!(ron.kind, PickerKind::Save);
        assert_eq!(ron.title, "Save as");
        assert_eq!(ron.filters, vec![FileTypeFilter::ron()]);
        assert_eq!(ron.suggested_name.as_deref(), Some("notes.ron"));
        assert!(ron.exclude_accept_all_option);

        let svg = config.save_options(Format::Svg, None);
        assert_eq!(svg.title, "Export as SVG");
        assert_eq!(svg.filters, vec![FileTypeFilter::svg()]);
    }

    #[test]
    fn test_open_options_use_distinct_ron_labels() {
        let config = GatewayConfig::default();
        assert_eq!(config.open_options().filter_label(), "Rusty Object Notation");
        assert_eq!(config.open_raw_options().filter_label(), "Rust Object Notation");
    }

    #[test]
    fn test_start_dir_is_forwarded() {
        let config = GatewayConfig {
            start_dir: Some(PathBuf::from("/home/user/drawings")),
            ..GatewayConfig::default()
        };
        assert_eq!(
            config.open_options().start_dir,
            Some(PathBuf::from("/home/user/drawings"))
        );
    }

    #[test]
    fn test_config_roundtrip() {
        let config = GatewayConfig {
            exclude_accept_all_option: false,
            start_dir: Some(PathBuf::from("/tmp")),
            ..GatewayConfig::default()
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let loaded = GatewayConfig::from_json_sanitized(&json).unwrap();
        assert_eq!(config, loaded);
    }
}
