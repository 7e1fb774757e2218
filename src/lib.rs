//! Court List Ingest SDK - Conversion and validation of uploaded hearing lists
//!
//! Provides unified interfaces for:
//! - Spreadsheet → JSON conversion driven by declarative column configurations
//! - Cell validators (markup rejection, time and date formats)
//! - JSON Schema validation of list payloads
//! - A registry mapping list-type identifiers to their converters
//! - Upload ingestion and artefact storage
//! - Configuration files with environment overrides

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod ingest;
pub mod list_types;
pub mod registry;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, IngestConfig};
pub use convert::{
    ConversionError, ConvertedList, ErrorMode, ExcelConverterConfig, FieldConfig, Record,
    SheetConfig, convert_excel_to_json, convert_multi_sheet_excel_to_json,
};
pub use ingest::{IngestError, IngestOutcome, ListIngestor, Upload, UploadFormat};
pub use list_types::{builtin_definitions, builtin_registry};
pub use registry::{
    ConverterRegistry, ListTypeConverter, ListTypeDefinition, ListTypeId, RegistryError,
    build_converter_registry, create_converter, create_multi_sheet_converter,
};
pub use storage::{ArtefactStore, FileSystemArtefactStore, StorageError, StoredArtefact};
pub use validation::{
    FieldError, JsonSchemaValidator, RowValidator, SchemaError, ValidationResult,
    create_json_validator, validate_json,
};
