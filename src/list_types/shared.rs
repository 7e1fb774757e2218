//! Column layouts shared by several list types.

use std::sync::Arc;

use crate::convert::{ErrorMode, ExcelConverterConfig, FieldConfig};
use crate::registry::{
    ListTypeConverter, ListTypeDefinition, ListTypeId, RegistryError, create_converter,
};
use crate::validation::{JsonSchemaValidator, dd_mm_yyyy, no_html_tags, validate_time_format};

/// Version echoed in validation results of the built-in schemas
pub const SCHEMA_VERSION: &str = "1.0";

/// Free-text column: markup is rejected
pub(super) fn text(header: &str, field_name: &str, required: bool) -> FieldConfig {
    FieldConfig::new(header, field_name, required).with_validator(no_html_tags(header))
}

pub(super) fn time(header: &str, field_name: &str) -> FieldConfig {
    FieldConfig::required(header, field_name).with_validator(validate_time_format)
}

pub(super) fn date(header: &str, field_name: &str) -> FieldConfig {
    FieldConfig::required(header, field_name).with_validator(dd_mm_yyyy())
}

/// Layout of the weekly tribunal hearing lists
pub(super) fn tribunal_weekly_fields() -> Vec<FieldConfig> {
    vec![
        date("Date", "date"),
        text("Case name", "caseName", true),
        text("Hearing length", "hearingLength", true),
        text("Hearing type", "hearingType", true),
        text("Venue", "venue", true),
        text("Additional information", "additionalInformation", false),
    ]
}

/// Layout of the Royal Courts of Justice daily cause lists
pub(super) fn rcj_fields() -> Vec<FieldConfig> {
    vec![
        text("Venue", "venue", true),
        text("Judge", "judge", true),
        time("Time", "time"),
        text("Case number", "caseNumber", true),
        text("Case details", "caseDetails", true),
        text("Hearing type", "hearingType", true),
        text("Additional information", "additionalInformation", false),
    ]
}

pub(super) fn config(
    fields: Vec<FieldConfig>,
    min_rows: usize,
    error_mode: ErrorMode,
) -> Result<Arc<ExcelConverterConfig>, RegistryError> {
    Ok(Arc::new(
        ExcelConverterConfig::new(fields, min_rows)?.with_error_mode(error_mode),
    ))
}

pub(super) fn schema(content: &str) -> Result<JsonSchemaValidator, RegistryError> {
    Ok(JsonSchemaValidator::parse(content)?.with_schema_version(SCHEMA_VERSION))
}

pub(super) fn definition(
    id: ListTypeId,
    name: &str,
    english_friendly_name: &str,
    converter: ListTypeConverter,
) -> ListTypeDefinition {
    ListTypeDefinition {
        id,
        name: name.to_string(),
        english_friendly_name: english_friendly_name.to_string(),
        converter,
    }
}

/// Single-sheet list type with a JSON schema
pub(super) fn single_sheet(
    id: ListTypeId,
    name: &str,
    english_friendly_name: &str,
    fields: Vec<FieldConfig>,
    schema_content: &str,
    error_mode: ErrorMode,
) -> Result<ListTypeDefinition, RegistryError> {
    let converter = create_converter(config(fields, 1, error_mode)?)
        .with_json_validator(schema(schema_content)?);
    Ok(definition(id, name, english_friendly_name, converter))
}
