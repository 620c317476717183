//! Picker requests handed to a file system backend
//!
//! `PickerOptions` describes one user-mediated picker interaction. Backends
//! translate it into whatever their platform dialog understands.

use crate::error::Result;
use crate::files::filters::FileTypeFilter;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Which kind of picker is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    /// Select a single existing file
    Open,
    /// Choose a destination that may not exist yet
    Save,
}

/// Everything a backend needs to show one picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    pub kind: PickerKind,
    pub title: String,
    pub filters: Vec<FileTypeFilter>,
    /// Hide the platform's "all files" choice
    pub exclude_accept_all_option: bool,
    pub start_dir: Option<PathBuf>,
    pub suggested_name: Option<String>,
}

impl PickerOptions {
    /// Options for a single-file open picker.
    pub fn open(title: impl Into<String>, filter: FileTypeFilter) -> Self {
        Self {
            kind: PickerKind::Open,
            title: title.into(),
            filters: vec![filter],
            exclude_accept_all_option: true,
            start_dir: None,
            suggested_name: None,
        }
    }

    /// Options for a save-location picker.
    pub fn save(title: impl Into<String>, filter: FileTypeFilter) -> Self {
        Self {
            kind: PickerKind::Save,
            ..Self::open(title, filter)
        }
    }

    pub fn with_accept_all(mut self, show_accept_all: bool) -> Self {
        self.exclude_accept_all_option = !show_accept_all;
        self
    }

    pub fn with_start_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.start_dir = dir;
        self
    }

    pub fn with_suggested_name(mut self, name: Option<String>) -> Self {
        self.suggested_name = name;
        self
    }

    /// Check a selected name against the picker's filter contract.
    ///
    /// Any name is allowed when the "all files" choice is shown.
    pub fn permits(&self, name: &str) -> bool {
        !self.exclude_accept_all_option || self.filters.iter().any(|f| f.accepts(name))
    }

    /// Label of the first filter, used in diagnostics.
    pub fn filter_label(&self) -> &str {
        self.filters.first().map(|f| f.label.as_str()).unwrap_or("")
    }

    /// Serialize to the options object taken by `showOpenFilePicker` and
    /// `showSaveFilePicker`.
    pub fn to_platform_json(&self) -> Result<String> {
        let types = self
            .filters
            .iter()
            .map(|filter| {
                let mut accept = BTreeMap::new();
                accept.insert(filter.mime_type.clone(), filter.dotted_extensions());
                PlatformFilePickerType {
                    description: filter.label.clone(),
                    accept,
                }
            })
            .collect();

        let options = PlatformPickerOptions {
            multiple: match self.kind {
                PickerKind::Open => Some(false),
                PickerKind::Save => None,
            },
            exclude_accept_all_option: self.exclude_accept_all_option,
            types,
            suggested_name: self.suggested_name.clone(),
        };

        Ok(serde_json::to_string(&options)?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlatformPickerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    multiple: Option<bool>,
    exclude_accept_all_option: bool,
    types: Vec<PlatformFilePickerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_name: Option<String>,
}

#[derive(Serialize)]
struct PlatformFilePickerType {
    description: String,
    accept: BTreeMap<String, Vec<String>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_options_json_matches_browser_shape() {
        let options = PickerOptions::open("Open", FileTypeFilter::ron());
        let json = options.to_platform_json().unwrap();
        assert_eq!(
            json,
            r#"{"multiple":false,"excludeAcceptAllOption":true,"types":[{"description":"Rusty Object Notation","accept":{"text/plain":[".ron"]}}]}"#
        );
    }

    #[test]
    fn test_save_options_json_omits_multiple() {
        let options = PickerOptions::save("Export as SVG", FileTypeFilter::svg())
            .with_suggested_name(Some("shape.svg".to_string()));
        let json = options.to_platform_json().unwrap();
        assert_eq!(
            json,
            r#"{"excludeAcceptAllOption":true,"types":[{"description":"Scalable Vector Graphics","accept":{"image/svg+xml":[".svg"]}}],"suggestedName":"shape.svg"}"#
        );
    }

    #[test]
    fn test_permits_respects_exclude_accept_all() {
        let strict = PickerOptions::save("Save as", FileTypeFilter::ron());
        assert!(strict.permits("notes.ron"));
        assert!(!strict.permits("notes.txt"));

        let relaxed = strict.with_accept_all(true);
        assert!(relaxed.permits("notes.txt"));
    }

    #[test]
    fn test_filter_label() {
        let options = PickerOptions::open("Open", FileTypeFilter::ron_raw());
        assert_eq!(options.filter_label(), "Rust Object Notation");
    }
}
