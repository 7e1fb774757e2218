//! Convert command implementation

use super::{load_config, load_upload, print_errors};
use crate::cli::error::CliError;
use crate::ingest::ListIngestor;
use crate::registry::ListTypeId;
use crate::storage::FileSystemArtefactStore;
use std::path::PathBuf;

/// Arguments of `court-lists convert`
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub list_type_id: ListTypeId,
    pub input: PathBuf,
    /// Written to stdout when absent
    pub output: Option<PathBuf>,
    pub pretty: bool,
    /// Also keep the upload and its JSON in the configured storage directory
    pub store: bool,
    pub config_dir: Option<PathBuf>,
}

/// Handle the convert command
pub fn handle_convert(args: &ConvertArgs) -> Result<(), CliError> {
    let upload = load_upload(args.list_type_id, &args.input)?;
    let (config, config_dir) = load_config(args.config_dir.as_deref())?;
    let ingestor = ListIngestor::from_config(&config)?;

    let outcome = if args.store {
        let store = FileSystemArtefactStore::new(config.storage_path(&config_dir));
        ingestor.ingest_and_store(&upload, &store)?
    } else {
        ingestor.ingest(&upload)?
    };

    if !outcome.is_valid() {
        print_errors(&outcome.validation.errors);
        return Err(CliError::ValidationError(outcome.validation.errors.len()));
    }

    if let Some(artefact) = &outcome.artefact {
        eprintln!(
            "Stored artefact {} at {}",
            artefact.artefact_id,
            artefact.path.display()
        );
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&outcome.payload)
    } else {
        serde_json::to_string(&outcome.payload)
    }
    .map_err(|e| CliError::SerializationError(e.to_string()))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
