//! Command-line interface over the ingestion library

pub mod commands;
pub mod error;
