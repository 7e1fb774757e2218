//! Validation functionality
//!
//! Provides validation logic for:
//! - Individual spreadsheet cells (markup, time and date formats)
//! - Whole JSON payloads against per-list-type JSON Schemas

pub mod fields;
pub mod json_schema;

pub use fields::{
    DD_MM_YYYY, DD_MM_YYYY_PATTERN, DateFormat, FieldError, NoHtmlTags, RowValidator,
    TIME_FORMAT_HINT, dd_mm_yyyy, no_html_tags, validate_date_format, validate_time_format,
    validate_time_format_simple,
};
pub use json_schema::{
    JsonSchemaValidator, SchemaError, ValidationResult, create_json_validator, validate_json,
};
