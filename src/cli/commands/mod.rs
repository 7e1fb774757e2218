//! CLI command implementations

pub mod convert;
pub mod list_types;
pub mod validate;

use crate::cli::error::CliError;
use crate::config::IngestConfig;
use crate::ingest::{ListIngestor, Upload};
use crate::registry::ListTypeId;
use std::path::{Path, PathBuf};

/// Read the file to ingest, keeping its name for format detection
pub(crate) fn load_upload(list_type_id: ListTypeId, input: &Path) -> Result<Upload, CliError> {
    if !input.exists() {
        return Err(CliError::FileNotFound(input.to_path_buf()));
    }

    let content = std::fs::read(input)
        .map_err(|e| CliError::FileReadError(input.to_path_buf(), e.to_string()))?;
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Upload::new(list_type_id, file_name, content))
}

/// Configuration from `.court-lists.toml` in `config_dir` (or the current
/// directory), together with that directory
pub(crate) fn load_config(config_dir: Option<&Path>) -> Result<(IngestConfig, PathBuf), CliError> {
    let dir = config_dir.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let config = IngestConfig::load(&dir)?;
    Ok((config, dir))
}

/// Ingestor configured from `.court-lists.toml` in `config_dir`
pub(crate) fn ingestor(config_dir: Option<&Path>) -> Result<ListIngestor, CliError> {
    let (config, _) = load_config(config_dir)?;
    Ok(ListIngestor::from_config(&config)?)
}

pub(crate) fn print_errors(errors: &[String]) {
    eprintln!("Validation failed:");
    for error in errors {
        eprintln!("  - {}", error);
    }
}
