//! Configuration file loading
//!
//! Hosts may keep the gateway configuration in a JSON file of their
//! choosing. Loading never fails: a missing, empty or corrupted file falls
//! back to the defaults with a warning.

use crate::config::GatewayConfig;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

/// Load configuration from `path`, falling back to defaults.
///
/// # Behavior
///
/// 1. If the file exists and is valid JSON, load and sanitize it
/// 2. If the file doesn't exist or is empty, return the defaults
/// 3. If the file is unreadable or corrupted, log a warning and return the defaults
pub fn load_config(path: &Path) -> GatewayConfig {
    load_config_internal(path)
        .unwrap_or_warn_default(GatewayConfig::default(), "Failed to load gateway configuration")
}

/// Internal implementation of config loading.
fn load_config_internal(path: &Path) -> Result<GatewayConfig> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(GatewayConfig::default());
    }

    debug!("Loading config from: {}", path.display());

    let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(GatewayConfig::default());
    }

    let config = GatewayConfig::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!("Gateway configuration loaded from {}", path.display());
    Ok(config)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper to create a temporary config file location.
    struct TestEnv {
        _temp_dir: TempDir,
        config_file: std::path::PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let config_file = temp_dir.path().join("gateway.json");
            Self {
                _temp_dir: temp_dir,
                config_file,
            }
        }

        fn write_config(&self, content: &str) {
            fs::write(&self.config_file, content).expect("Failed to write config");
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let env = TestEnv::new();
        assert_eq!(load_config(&env.config_file), GatewayConfig::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let env = TestEnv::new();
        env.write_config("   \n");
        assert_eq!(load_config(&env.config_file), GatewayConfig::default());
    }

    #[test]
    fn test_corrupted_file_falls_back() {
        let env = TestEnv::new();
        env.write_config("{ invalid json }");
        assert!(load_config_internal(&env.config_file).is_err());
        assert_eq!(load_config(&env.config_file), GatewayConfig::default());
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let env = TestEnv::new();
        env.write_config(r#"{"exclude_accept_all_option": false, "start_dir": "/data"}"#);

        let config = load_config(&env.config_file);
        assert!(!config.exclude_accept_all_option);
        assert_eq!(config.start_dir, Some(std::path::PathBuf::from("/data")));
    }

    #[test]
    fn test_directory_path_is_load_error() {
        let env = TestEnv::new();
        fs::create_dir(&env.config_file).unwrap();
        let result = load_config_internal(&env.config_file);
        assert!(matches!(result, Err(Error::ConfigLoad { .. })));
    }
}
