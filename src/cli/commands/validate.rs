//! Validate command implementation

use super::{ingestor, load_upload, print_errors};
use crate::cli::error::CliError;
use crate::registry::ListTypeId;
use std::path::Path;

/// Handle the validate command
pub fn handle_validate(
    list_type_id: ListTypeId,
    input: &Path,
    config_dir: Option<&Path>,
) -> Result<(), CliError> {
    let upload = load_upload(list_type_id, input)?;
    let outcome = ingestor(config_dir)?.ingest(&upload)?;

    if !outcome.is_valid() {
        print_errors(&outcome.validation.errors);
        return Err(CliError::ValidationError(outcome.validation.errors.len()));
    }

    println!("Validation successful");
    Ok(())
}
