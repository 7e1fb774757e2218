//! Configuration file support
//!
//! Handles parsing of `.court-lists.toml` configuration files and
//! environment variable overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::convert::ErrorMode;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".court-lists.toml";

/// Largest accepted upload by default (2MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

/// Default directory for stored uploads
pub const DEFAULT_STORAGE_DIR: &str = "storage/temp/uploads";

/// Environment variable for the upload size limit
pub const ENV_MAX_UPLOAD_BYTES: &str = "COURT_LISTS_MAX_UPLOAD_BYTES";

/// Environment variable for the storage directory
pub const ENV_STORAGE_DIR: &str = "COURT_LISTS_STORAGE_DIR";

/// Environment variable for the conversion error mode
pub const ENV_ERROR_MODE: &str = "COURT_LISTS_ERROR_MODE";

/// Error type for configuration handling
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
    #[error("Failed to serialize config: {0}")]
    SerializationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Upload handling section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSection {
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Directory for stored uploads (relative to the working directory)
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_storage_dir() -> String {
    DEFAULT_STORAGE_DIR.to_string()
}

impl Default for UploadSection {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            storage_dir: default_storage_dir(),
        }
    }
}

/// Spreadsheet conversion section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConversionSection {
    #[serde(default)]
    pub error_mode: ErrorMode,
}

/// Main configuration structure
///
/// Represents the `.court-lists.toml` configuration file format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub upload: UploadSection,

    #[serde(default)]
    pub conversion: ConversionSection,
}

impl IngestConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.court-lists.toml` in the directory.
    /// Falls back to defaults if not found.
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;

            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> ConfigResult<()> {
        let config_path = dir.join(CONFIG_FILENAME);
        let content = self.to_toml()?;

        std::fs::write(&config_path, content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializationError(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(size) = std::env::var(ENV_MAX_UPLOAD_BYTES)
            && let Ok(size) = size.parse()
        {
            self.upload.max_upload_bytes = size;
        }

        if let Ok(dir) = std::env::var(ENV_STORAGE_DIR) {
            self.upload.storage_dir = dir;
        }

        if let Ok(mode) = std::env::var(ENV_ERROR_MODE)
            && let Ok(mode) = mode.parse()
        {
            self.conversion.error_mode = mode;
        }
    }

    /// Storage directory resolved against `base`
    pub fn storage_path(&self, base: &Path) -> PathBuf {
        if Path::new(&self.upload.storage_dir).is_absolute() {
            PathBuf::from(&self.upload.storage_dir)
        } else {
            base.join(&self.upload.storage_dir)
        }
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Court list ingestion configuration

[upload]
# Largest accepted upload in bytes
max_upload_bytes = 2097152

# Where uploads and converted JSON are stored (relative or absolute)
storage_dir = "storage/temp/uploads"

[conversion]
# "fail-fast" stops at the first spreadsheet error, "collect-all" reports every error
error_mode = "fail-fast"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = IngestConfig::new();
        assert_eq!(config.upload.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.upload.storage_dir, DEFAULT_STORAGE_DIR);
        assert_eq!(config.conversion.error_mode, ErrorMode::FailFast);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[upload]
max_upload_bytes = 1024
storage_dir = "/var/uploads"

[conversion]
error_mode = "collect-all"
"#;
        let config = IngestConfig::parse(toml).unwrap();
        assert_eq!(config.upload.max_upload_bytes, 1024);
        assert_eq!(config.upload.storage_dir, "/var/uploads");
        assert_eq!(config.conversion.error_mode, ErrorMode::CollectAll);
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = IngestConfig::parse("[conversion]\nerror_mode = \"fail-fast\"\n").unwrap();
        assert_eq!(config.upload, UploadSection::default());
    }

    #[test]
    fn test_parse_invalid_error_mode() {
        let result = IngestConfig::parse("[conversion]\nerror_mode = \"sometimes\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_sample_config_parses() {
        let config = IngestConfig::parse(sample_config()).unwrap();
        assert_eq!(config, IngestConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = IngestConfig::new();
        config.upload.max_upload_bytes = 4096;

        config.save(dir.path()).unwrap();
        assert!(dir.path().join(CONFIG_FILENAME).exists());

        let loaded = IngestConfig::parse(
            &std::fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap(),
        )
        .unwrap();
        assert_eq!(loaded.upload.max_upload_bytes, 4096);
    }

    #[test]
    fn test_storage_path() {
        let config = IngestConfig::new();
        let base = Path::new("/srv/app");
        assert_eq!(
            config.storage_path(base),
            PathBuf::from("/srv/app/storage/temp/uploads")
        );

        let mut absolute = IngestConfig::new();
        absolute.upload.storage_dir = "/data/uploads".to_string();
        assert_eq!(absolute.storage_path(base), PathBuf::from("/data/uploads"));
    }
}
