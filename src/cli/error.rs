//! CLI-specific error types

use crate::config::ConfigError;
use crate::ingest::IngestError;
use crate::registry::RegistryError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read file {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Failed to write file {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Failed to serialize output: {0}")]
    SerializationError(String),

    #[error("Validation failed with {0} error(s)")]
    ValidationError(usize),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),

    #[error("Registry error: {0}")]
    RegistryError(#[from] RegistryError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
