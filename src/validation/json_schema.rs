//! JSON Schema validation of list payloads.
//!
//! Used for list types uploaded directly as JSON, and to double-check the
//! payload produced by spreadsheet conversion. Unlike spreadsheet conversion,
//! every violation is collected and a failed validation is an ordinary
//! [`ValidationResult`], not an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use jsonschema::Validator;
use jsonschema::error::ValidationErrorKind;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Path label used for violations on the document root itself
pub const ROOT_PATH: &str = "(root)";

static SCHEMA_CACHE: Lazy<RwLock<HashMap<PathBuf, Arc<JsonSchemaValidator>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Outcome of validating a payload against a list-type schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "validation results should be checked for errors"]
pub struct ValidationResult {
    pub is_valid: bool,
    /// `"<dotted.field.path>: <message>"` entries, in the order reported
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}

impl ValidationResult {
    pub fn valid(schema_version: Option<String>) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            schema_version,
        }
    }

    fn from_errors(errors: Vec<String>, schema_version: Option<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            schema_version,
        }
    }
}

/// The schema itself could not be loaded or compiled.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to read schema {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("Failed to parse schema: {0}")]
    Parse(String),
    #[error("Failed to compile schema: {0}")]
    Compile(String),
}

/// A compiled JSON Schema.
pub struct JsonSchemaValidator {
    validator: Validator,
    schema_version: Option<String>,
}

impl std::fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSchemaValidator")
            .field("schema_version", &self.schema_version)
            .finish_non_exhaustive()
    }
}

impl JsonSchemaValidator {
    /// Compile a schema document
    pub fn from_value(schema: &Value) -> Result<Self, SchemaError> {
        let validator =
            Validator::new(schema).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self {
            validator,
            schema_version: None,
        })
    }

    /// Parse and compile a schema from JSON text
    pub fn parse(content: &str) -> Result<Self, SchemaError> {
        let schema: Value =
            serde_json::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::from_value(&schema)
    }

    /// Load and compile a schema file
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Version echoed in every [`ValidationResult`] this validator produces
    pub fn with_schema_version(mut self, version: impl Into<String>) -> Self {
        self.schema_version = Some(version.into());
        self
    }

    pub fn schema_version(&self) -> Option<&str> {
        self.schema_version.as_deref()
    }

    /// Validate `data`, collecting every violation
    pub fn validate(&self, data: &Value) -> ValidationResult {
        let errors: Vec<String> = self
            .validator
            .iter_errors(data)
            .map(|e| format_error(&e))
            .collect();
        ValidationResult::from_errors(errors, self.schema_version.clone())
    }
}

/// Validate `data` against `schema` in one step.
///
/// Compiles the schema on every call; use [`JsonSchemaValidator`] or
/// [`create_json_validator`] when validating repeatedly.
pub fn validate_json(
    data: &Value,
    schema: &Value,
    schema_version: Option<&str>,
) -> Result<ValidationResult, SchemaError> {
    let mut validator = JsonSchemaValidator::from_value(schema)?;
    validator.schema_version = schema_version.map(str::to_string);
    Ok(validator.validate(data))
}

/// Compiled validator for the schema file at `schema_path`.
///
/// Each path is read and compiled once per process; later calls return the
/// cached validator.
pub fn create_json_validator(
    schema_path: impl AsRef<Path>,
) -> Result<Arc<JsonSchemaValidator>, SchemaError> {
    let path = schema_path.as_ref();

    if let Some(cached) = SCHEMA_CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(path)
    {
        return Ok(Arc::clone(cached));
    }

    debug!("Compiling JSON schema {}", path.display());
    let validator = Arc::new(JsonSchemaValidator::from_path(path)?);

    let mut cache = SCHEMA_CACHE.write().unwrap_or_else(PoisonError::into_inner);
    let entry = cache
        .entry(path.to_path_buf())
        .or_insert_with(|| Arc::clone(&validator));
    Ok(Arc::clone(entry))
}

/// Rewrite a validation error as `"<dotted.path>: <message>"`.
///
/// Missing required properties are reported against the property itself so
/// the uploader sees which field to add.
fn format_error(error: &jsonschema::ValidationError<'_>) -> String {
    let pointer = error.instance_path.to_string();
    let mut segments: Vec<String> = pointer
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect();

    if let ValidationErrorKind::Required { property } = &error.kind {
        match property {
            Value::String(name) => segments.push(name.clone()),
            other => segments.push(other.to_string()),
        }
    }

    let path = if segments.is_empty() {
        ROOT_PATH.to_string()
    } else {
        segments.join(".")
    };
    format!("{}: {}", path, error)
}
