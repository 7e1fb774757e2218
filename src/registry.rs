//! Converter registry
//!
//! Maps numeric list-type identifiers to the converter for that list type.
//! The registry is built once at start-up with [`build_converter_registry`]
//! and shared read-only afterwards; registering the same identifier twice is
//! an error rather than a silent replacement.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::convert::{
    ConversionError, ConvertedList, ExcelConverterConfig, SheetConfig, convert_excel_to_json,
    convert_multi_sheet_excel_to_json,
};
use crate::validation::{JsonSchemaValidator, SchemaError, ValidationResult};

/// Stable numeric identifier of a list type
pub type ListTypeId = u32;

/// Error during registry construction or dispatch
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("No converter registered for list type {0}")]
    UnknownListType(ListTypeId),
    #[error("A converter is already registered for list type {0}")]
    DuplicateListType(ListTypeId),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Clone)]
enum ConverterKind {
    SingleSheet(Arc<ExcelConverterConfig>),
    MultiSheet(Arc<[SheetConfig]>),
}

/// Everything needed to convert and check one list type.
#[derive(Debug, Clone)]
pub struct ListTypeConverter {
    kind: ConverterKind,
    json_validator: Option<Arc<JsonSchemaValidator>>,
}

/// Bind a single-sheet configuration to the generic converter
pub fn create_converter(config: impl Into<Arc<ExcelConverterConfig>>) -> ListTypeConverter {
    ListTypeConverter {
        kind: ConverterKind::SingleSheet(config.into()),
        json_validator: None,
    }
}

/// Bind worksheet configurations to the multi-sheet converter
pub fn create_multi_sheet_converter(sheets: Vec<SheetConfig>) -> ListTypeConverter {
    ListTypeConverter {
        kind: ConverterKind::MultiSheet(sheets.into()),
        json_validator: None,
    }
}

impl ListTypeConverter {
    /// Attach the schema used for JSON submissions of this list type
    pub fn with_json_validator(mut self, validator: impl Into<Arc<JsonSchemaValidator>>) -> Self {
        self.json_validator = Some(validator.into());
        self
    }

    /// Configuration of a single-sheet converter
    pub fn config(&self) -> Option<&Arc<ExcelConverterConfig>> {
        match &self.kind {
            ConverterKind::SingleSheet(config) => Some(config),
            ConverterKind::MultiSheet(_) => None,
        }
    }

    /// Worksheet configurations of a multi-sheet converter
    pub fn sheets(&self) -> Option<&[SheetConfig]> {
        match &self.kind {
            ConverterKind::SingleSheet(_) => None,
            ConverterKind::MultiSheet(sheets) => Some(&sheets[..]),
        }
    }

    pub fn json_validator(&self) -> Option<&Arc<JsonSchemaValidator>> {
        self.json_validator.as_ref()
    }

    pub fn convert_excel_to_json(&self, buffer: &[u8]) -> Result<ConvertedList, ConversionError> {
        match &self.kind {
            ConverterKind::SingleSheet(config) => {
                convert_excel_to_json(buffer, config).map(ConvertedList::Rows)
            }
            ConverterKind::MultiSheet(sheets) => {
                convert_multi_sheet_excel_to_json(buffer, sheets).map(ConvertedList::Sheets)
            }
        }
    }

    /// `None` when the list type has no JSON schema
    pub fn validate_json(&self, data: &Value) -> Option<ValidationResult> {
        self.json_validator
            .as_ref()
            .map(|validator| validator.validate(data))
    }
}

/// Process-wide list-type → converter table.
#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    converters: BTreeMap<ListTypeId, ListTypeConverter>,
}

impl ConverterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `converter` for `list_type_id`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use court_list_ingest::convert::{ExcelConverterConfig, FieldConfig};
    /// use court_list_ingest::registry::{ConverterRegistry, RegistryError, create_converter};
    ///
    /// let fields = vec![FieldConfig::required("Venue", "venue")];
    /// let config = ExcelConverterConfig::new(fields, 1).unwrap();
    /// let mut registry = ConverterRegistry::new();
    /// registry.register_converter(9, create_converter(config.clone())).unwrap();
    ///
    /// assert!(registry.has_converter_for_list_type(9));
    /// assert!(matches!(
    ///     registry.register_converter(9, create_converter(config)),
    ///     Err(RegistryError::DuplicateListType(9))
    /// ));
    /// ```
    pub fn register_converter(
        &mut self,
        list_type_id: ListTypeId,
        converter: ListTypeConverter,
    ) -> Result<(), RegistryError> {
        if self.converters.contains_key(&list_type_id) {
            return Err(RegistryError::DuplicateListType(list_type_id));
        }
        debug!("Registered converter for list type {}", list_type_id);
        self.converters.insert(list_type_id, converter);
        Ok(())
    }

    pub fn get_converter_for_list_type(
        &self,
        list_type_id: ListTypeId,
    ) -> Option<&ListTypeConverter> {
        self.converters.get(&list_type_id)
    }

    pub fn has_converter_for_list_type(&self, list_type_id: ListTypeId) -> bool {
        self.converters.contains_key(&list_type_id)
    }

    /// Registered identifiers in ascending order
    pub fn list_type_ids(&self) -> impl Iterator<Item = ListTypeId> + '_ {
        self.converters.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Convert `buffer` with the converter registered for `list_type_id`
    pub fn convert_excel_for_list_type(
        &self,
        list_type_id: ListTypeId,
        buffer: &[u8],
    ) -> Result<ConvertedList, RegistryError> {
        let converter = self
            .get_converter_for_list_type(list_type_id)
            .ok_or(RegistryError::UnknownListType(list_type_id))?;
        Ok(converter.convert_excel_to_json(buffer)?)
    }

    /// Validate a JSON submission; `Ok(None)` when the list type has no schema
    pub fn validate_json_for_list_type(
        &self,
        list_type_id: ListTypeId,
        data: &Value,
    ) -> Result<Option<ValidationResult>, RegistryError> {
        let converter = self
            .get_converter_for_list_type(list_type_id)
            .ok_or(RegistryError::UnknownListType(list_type_id))?;
        Ok(converter.validate_json(data))
    }
}

/// A list type the service accepts.
#[derive(Debug, Clone)]
pub struct ListTypeDefinition {
    pub id: ListTypeId,
    /// URL-friendly name, e.g. `rcj-standard-daily-cause-list`
    pub name: String,
    pub english_friendly_name: String,
    pub converter: ListTypeConverter,
}

/// Build the registry from an explicit set of list types.
///
/// Fails on the first duplicate identifier.
pub fn build_converter_registry(
    definitions: impl IntoIterator<Item = ListTypeDefinition>,
) -> Result<ConverterRegistry, RegistryError> {
    let mut registry = ConverterRegistry::new();
    for definition in definitions {
        debug!(
            "Registering list type {} ({})",
            definition.id, definition.name
        );
        registry.register_converter(definition.id, definition.converter)?;
    }
    info!("Converter registry built with {} list type(s)", registry.len());
    Ok(registry)
}
