//! Upload ingestion
//!
//! Entry point for a single uploaded hearing list. Spreadsheets go through
//! the converter registry; JSON files are parsed and checked against the
//! list type's schema. A schema failure is reported in the outcome and never
//! as an error, so callers can show the messages back to the uploader.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::IngestConfig;
use crate::list_types::builtin_registry;
use crate::registry::{ConverterRegistry, ListTypeId, RegistryError};
use crate::storage::{ArtefactStore, StorageError, StoredArtefact, file_extension};
use crate::validation::ValidationResult;

/// Error during upload ingestion
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Uploaded file '{0}' is empty")]
    EmptyUpload(String),
    #[error("Uploaded file is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Format of an uploaded file, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Spreadsheet,
    Json,
}

impl UploadFormat {
    /// Detect the format from a file name
    ///
    /// # Example
    ///
    /// ```rust
    /// use court_list_ingest::ingest::UploadFormat;
    ///
    /// assert_eq!(UploadFormat::from_file_name("list.XLSX"), Some(UploadFormat::Spreadsheet));
    /// assert_eq!(UploadFormat::from_file_name("list.json"), Some(UploadFormat::Json));
    /// assert_eq!(UploadFormat::from_file_name("list.csv"), None);
    /// ```
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match file_extension(file_name)?.as_str() {
            "xlsx" | "xls" | "ods" => Some(UploadFormat::Spreadsheet),
            "json" => Some(UploadFormat::Json),
            _ => None,
        }
    }
}

/// An uploaded file waiting to be ingested
#[derive(Debug, Clone)]
pub struct Upload {
    pub list_type_id: ListTypeId,
    pub file_name: String,
    pub content: Vec<u8>,
}

impl Upload {
    pub fn new(list_type_id: ListTypeId, file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            list_type_id,
            file_name: file_name.into(),
            content,
        }
    }
}

/// Result of ingesting one upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutcome {
    pub list_type_id: ListTypeId,
    /// Converted rows, or the submitted JSON as parsed
    pub payload: Value,
    pub validation: ValidationResult,
    /// Stored JSON, set by [`ListIngestor::ingest_and_store`] for valid lists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artefact: Option<StoredArtefact>,
    /// Stored copy of the file as uploaded, alongside `artefact`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_artefact: Option<StoredArtefact>,
}

impl IngestOutcome {
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }
}

/// Converts and validates uploads for the registered list types.
#[derive(Debug, Clone)]
pub struct ListIngestor {
    registry: Arc<ConverterRegistry>,
    max_upload_bytes: u64,
}

impl ListIngestor {
    pub fn new(registry: impl Into<Arc<ConverterRegistry>>, max_upload_bytes: u64) -> Self {
        Self {
            registry: registry.into(),
            max_upload_bytes,
        }
    }

    /// Ingestor over the built-in list types, configured from `config`
    pub fn from_config(config: &IngestConfig) -> Result<Self, RegistryError> {
        let registry = builtin_registry(config.conversion.error_mode)?;
        Ok(Self::new(registry, config.upload.max_upload_bytes))
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Convert or parse `upload` and check it against its list type.
    ///
    /// # Errors
    ///
    /// Size and file type problems, unknown list types and spreadsheet
    /// conversion failures are errors. A JSON payload that does not match
    /// the schema is not: it comes back with `validation.is_valid == false`.
    pub fn ingest(&self, upload: &Upload) -> Result<IngestOutcome, IngestError> {
        self.check_size(upload)?;

        let format = UploadFormat::from_file_name(&upload.file_name).ok_or_else(|| {
            warn!("Rejected upload '{}': unsupported file type", upload.file_name);
            IngestError::UnsupportedFileType(upload.file_name.clone())
        })?;

        let payload = match format {
            UploadFormat::Spreadsheet => self
                .registry
                .convert_excel_for_list_type(upload.list_type_id, &upload.content)
                .inspect_err(|e| {
                    warn!(
                        "Rejected upload '{}' for list type {}: {}",
                        upload.file_name, upload.list_type_id, e
                    )
                })?
                .to_json(),
            UploadFormat::Json => serde_json::from_slice(&upload.content).map_err(|e| {
                warn!("Rejected upload '{}': invalid JSON", upload.file_name);
                IngestError::InvalidJson(e.to_string())
            })?,
        };

        let validation = self
            .registry
            .validate_json_for_list_type(upload.list_type_id, &payload)?
            .unwrap_or_else(|| ValidationResult::valid(None));

        if validation.is_valid {
            info!(
                "Ingested '{}' for list type {}",
                upload.file_name, upload.list_type_id
            );
        } else {
            warn!(
                "Upload '{}' for list type {} failed schema validation with {} error(s)",
                upload.file_name,
                upload.list_type_id,
                validation.errors.len()
            );
        }

        Ok(IngestOutcome {
            list_type_id: upload.list_type_id,
            payload,
            validation,
            artefact: None,
            upload_artefact: None,
        })
    }

    /// [`ingest`](Self::ingest), then store the upload and its JSON when valid.
    ///
    /// Both files share one freshly generated artefact ID. Invalid lists are
    /// returned without touching the store.
    pub fn ingest_and_store(
        &self,
        upload: &Upload,
        store: &dyn ArtefactStore,
    ) -> Result<IngestOutcome, IngestError> {
        let mut outcome = self.ingest(upload)?;
        if !outcome.is_valid() {
            return Ok(outcome);
        }

        let artefact_id = Uuid::new_v4();
        outcome.upload_artefact =
            Some(store.save_uploaded_file(artefact_id, &upload.file_name, &upload.content)?);
        outcome.artefact = Some(store.save_json(artefact_id, &outcome.payload)?);
        Ok(outcome)
    }

    fn check_size(&self, upload: &Upload) -> Result<(), IngestError> {
        let size = upload.content.len() as u64;
        if size == 0 {
            warn!("Rejected upload '{}': empty file", upload.file_name);
            return Err(IngestError::EmptyUpload(upload.file_name.clone()));
        }
        if size > self.max_upload_bytes {
            warn!(
                "Rejected upload '{}': {} bytes exceeds limit of {}",
                upload.file_name, size, self.max_upload_bytes
            );
            return Err(IngestError::TooLarge {
                size,
                max: self.max_upload_bytes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ExcelConverterConfig, FieldConfig};
    use crate::registry::create_converter;
    use crate::validation::JsonSchemaValidator;

    fn ingestor(max: u64) -> ListIngestor {
        let config =
            ExcelConverterConfig::new(vec![FieldConfig::required("Venue", "venue")], 1).unwrap();
        let validator = JsonSchemaValidator::from_value(&serde_json::json!({
            "type": "array",
            "items": {
                "type": "object",
                "required": ["venue"],
                "properties": { "venue": { "type": "string" } }
            }
        }))
        .unwrap();
        let mut registry = ConverterRegistry::new();
        registry
            .register_converter(1, create_converter(config).with_json_validator(validator))
            .unwrap();
        ListIngestor::new(registry, max)
    }

    #[test]
    fn test_empty_upload_rejected() {
        let err = ingestor(100).ingest(&Upload::new(1, "list.json", Vec::new())).unwrap_err();
        assert!(matches!(err, IngestError::EmptyUpload(ref name) if name == "list.json"));
    }

    #[test]
    fn test_oversized_upload_rejected() {
        let err = ingestor(4)
            .ingest(&Upload::new(1, "list.json", b"[1, 2]".to_vec()))
            .unwrap_err();
        assert!(matches!(err, IngestError::TooLarge { size: 6, max: 4 }));
    }

    #[test]
    fn test_unsupported_file_type() {
        let err = ingestor(100)
            .ingest(&Upload::new(1, "list.csv", b"a,b".to_vec()))
            .unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = ingestor(100)
            .ingest(&Upload::new(1, "list.json", b"[{".to_vec()))
            .unwrap_err();
        assert!(matches!(err, IngestError::InvalidJson(_)));
    }

    #[test]
    fn test_json_schema_failure_is_an_outcome() {
        let outcome = ingestor(100)
            .ingest(&Upload::new(1, "list.json", br#"[{"court": "1"}]"#.to_vec()))
            .unwrap();
        assert!(!outcome.is_valid());
        assert_eq!(outcome.validation.errors.len(), 1);
        assert!(outcome.validation.errors[0].starts_with("0.venue: "));
    }

    #[test]
    fn test_valid_json() {
        let outcome = ingestor(100)
            .ingest(&Upload::new(1, "list.json", br#"[{"venue": "Court 1"}]"#.to_vec()))
            .unwrap();
        assert!(outcome.is_valid());
        assert_eq!(outcome.payload[0]["venue"], "Court 1");
        assert!(outcome.artefact.is_none());
    }

    #[test]
    fn test_unknown_list_type() {
        let err = ingestor(100)
            .ingest(&Upload::new(7, "list.json", b"[]".to_vec()))
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Registry(RegistryError::UnknownListType(7))
        ));
    }

    #[test]
    fn test_unreadable_spreadsheet() {
        let err = ingestor(100)
            .ingest(&Upload::new(1, "list.xlsx", b"not a workbook".to_vec()))
            .unwrap_err();
        assert!(matches!(err, IngestError::Registry(RegistryError::Conversion(_))));
    }
}
