//! Spreadsheet conversion
//!
//! Converts uploaded hearing-list workbooks into ordered JSON records. A list
//! type describes its columns declaratively with [`FieldConfig`]s; the same
//! engine serves every list type.

pub mod excel;
pub mod multi_sheet;
pub mod workbook;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::RowValidator;

pub use excel::convert_excel_to_json;
pub use multi_sheet::{SheetConfig, convert_multi_sheet_excel_to_json};

/// One converted spreadsheet row: `field_name → value`
pub type Record = BTreeMap<String, String>;

/// Error during spreadsheet conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The buffer is not a readable workbook
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// Configuration does not fit the sheet (missing columns or worksheets) or
    /// is itself inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Excel file must contain at least {min_rows} data row(s), found {found}")]
    RowCount { min_rows: usize, found: usize },

    #[error("Missing required field '{field}' in row {row}")]
    RequiredField { row: usize, field: String },

    #[error("Invalid value in column '{field}': {message}")]
    Validation {
        row: usize,
        field: String,
        value: String,
        message: String,
    },

    /// Error raised while converting one worksheet of a multi-sheet workbook
    #[error("Sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: Box<ConversionError>,
    },

    /// Every row error, in row order (collect-all mode)
    #[error("{} conversion error(s):\n{}", .0.len(), join_errors(.0))]
    Multiple(Vec<ConversionError>),
}

fn join_errors(errors: &[ConversionError]) -> String {
    errors
        .iter()
        .map(|e| format!("- {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ConversionError {
    /// 1-based data row the error refers to, if any
    pub fn row(&self) -> Option<usize> {
        match self {
            ConversionError::RequiredField { row, .. }
            | ConversionError::Validation { row, .. } => Some(*row),
            ConversionError::Sheet { source, .. } => source.row(),
            _ => None,
        }
    }
}

/// How row errors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorMode {
    /// Stop at the first row or field error
    #[default]
    FailFast,
    /// Check every row and report all errors together
    CollectAll,
}

impl std::str::FromStr for ErrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail-fast" | "failfast" => Ok(ErrorMode::FailFast),
            "collect-all" | "collectall" => Ok(ErrorMode::CollectAll),
            _ => Err(format!(
                "Unknown error mode: {}. Use 'fail-fast' or 'collect-all'.",
                s
            )),
        }
    }
}

impl fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMode::FailFast => write!(f, "fail-fast"),
            ErrorMode::CollectAll => write!(f, "collect-all"),
        }
    }
}

/// Contract for one spreadsheet column.
#[derive(Clone)]
pub struct FieldConfig {
    /// Exact column title in the header row
    pub header: String,
    /// Property name in the output record
    pub field_name: String,
    pub required: bool,
    /// Run in order against non-blank values
    pub validators: Vec<Arc<dyn RowValidator>>,
}

impl FieldConfig {
    pub fn new(header: impl Into<String>, field_name: impl Into<String>, required: bool) -> Self {
        Self {
            header: header.into(),
            field_name: field_name.into(),
            required,
            validators: Vec::new(),
        }
    }

    pub fn required(header: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self::new(header, field_name, true)
    }

    pub fn optional(header: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self::new(header, field_name, false)
    }

    /// Append a validator; validators run in the order they are added
    pub fn with_validator(mut self, validator: impl RowValidator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("header", &self.header)
            .field("field_name", &self.field_name)
            .field("required", &self.required)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Declarative description of one worksheet layout.
#[derive(Debug, Clone)]
pub struct ExcelConverterConfig {
    fields: Vec<FieldConfig>,
    min_rows: usize,
    error_mode: ErrorMode,
}

impl ExcelConverterConfig {
    /// Create a configuration, rejecting duplicate headers or field names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use court_list_ingest::convert::{ExcelConverterConfig, FieldConfig};
    ///
    /// let config = ExcelConverterConfig::new(
    ///     vec![
    ///         FieldConfig::required("Venue", "venue"),
    ///         FieldConfig::optional("Additional information", "additionalInformation"),
    ///     ],
    ///     1,
    /// )
    /// .unwrap();
    /// assert_eq!(config.fields().len(), 2);
    /// ```
    pub fn new(fields: Vec<FieldConfig>, min_rows: usize) -> Result<Self, ConversionError> {
        let mut headers = HashSet::new();
        let mut names = HashSet::new();
        for field in &fields {
            if !headers.insert(field.header.as_str()) {
                return Err(ConversionError::Config(format!(
                    "Duplicate column header in configuration: {}",
                    field.header
                )));
            }
            if !names.insert(field.field_name.as_str()) {
                return Err(ConversionError::Config(format!(
                    "Duplicate field name in configuration: {}",
                    field.field_name
                )));
            }
        }

        Ok(Self {
            fields,
            min_rows,
            error_mode: ErrorMode::default(),
        })
    }

    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    pub fn fields(&self) -> &[FieldConfig] {
        &self.fields
    }

    pub fn min_rows(&self) -> usize {
        self.min_rows
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }
}

/// Output of converting one upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConvertedList {
    /// Single-sheet list types: rows in spreadsheet order
    Rows(Vec<Record>),
    /// Multi-sheet list types: rows keyed by each sheet's data key
    Sheets(BTreeMap<String, Vec<Record>>),
}

impl ConvertedList {
    /// Total number of converted rows across all sheets
    pub fn row_count(&self) -> usize {
        match self {
            ConvertedList::Rows(rows) => rows.len(),
            ConvertedList::Sheets(sheets) => sheets.values().map(Vec::len).sum(),
        }
    }

    /// JSON array (single sheet) or object of arrays (multi-sheet)
    pub fn to_json(&self) -> Value {
        match self {
            ConvertedList::Rows(rows) => rows_to_json(rows),
            ConvertedList::Sheets(sheets) => Value::Object(
                sheets
                    .iter()
                    .map(|(key, rows)| (key.clone(), rows_to_json(rows)))
                    .collect(),
            ),
        }
    }
}

fn rows_to_json(rows: &[Record]) -> Value {
    Value::Array(
        rows.iter()
            .map(|record| {
                Value::Object(
                    record
                        .iter()
                        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                        .collect::<Map<String, Value>>(),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_time_format;

    #[test]
    fn test_duplicate_header_rejected() {
        let err = ExcelConverterConfig::new(
            vec![
                FieldConfig::required("Venue", "venue"),
                FieldConfig::optional("Venue", "venue2"),
            ],
            1,
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::Config(ref m) if m.contains("Venue")));
    }

    #[test]
    fn test_duplicate_field_name_rejected() {
        let result = ExcelConverterConfig::new(
            vec![
                FieldConfig::required("Venue", "venue"),
                FieldConfig::optional("Location", "venue"),
            ],
            1,
        );
        assert!(matches!(result, Err(ConversionError::Config(_))));
    }

    #[test]
    fn test_field_config_builder() {
        let field = FieldConfig::required("Time", "time").with_validator(validate_time_format);
        assert!(field.required);
        assert_eq!(field.validators.len(), 1);
        assert!(format!("{:?}", field).contains("validators: 1"));
    }

    #[test]
    fn test_error_mode_parse_and_display() {
        assert_eq!("collect-all".parse::<ErrorMode>(), Ok(ErrorMode::CollectAll));
        assert_eq!("Fail-Fast".parse::<ErrorMode>(), Ok(ErrorMode::FailFast));
        assert!("sometimes".parse::<ErrorMode>().is_err());
        assert_eq!(ErrorMode::CollectAll.to_string(), "collect-all");
    }

    #[test]
    fn test_converted_list_json_shape() {
        let mut record = Record::new();
        record.insert("venue".to_string(), "Court 1".to_string());

        let rows = ConvertedList::Rows(vec![record.clone()]);
        assert_eq!(rows.to_json(), serde_json::json!([{ "venue": "Court 1" }]));
        assert_eq!(rows.row_count(), 1);

        let mut sheets = BTreeMap::new();
        sheets.insert("mainHearings".to_string(), vec![record.clone(), record]);
        sheets.insert("planningCourt".to_string(), Vec::new());
        let sheets = ConvertedList::Sheets(sheets);
        assert_eq!(sheets.row_count(), 2);
        assert_eq!(
            sheets.to_json(),
            serde_json::json!({
                "mainHearings": [{ "venue": "Court 1" }, { "venue": "Court 1" }],
                "planningCourt": []
            })
        );
    }

    #[test]
    fn test_error_row_through_sheet_wrapper() {
        let err = ConversionError::Sheet {
            sheet: "Planning Court".to_string(),
            source: Box::new(ConversionError::RequiredField {
                row: 3,
                field: "Judge".to_string(),
            }),
        };
        assert_eq!(err.row(), Some(3));
        assert!(err.to_string().contains("Planning Court"));
    }
}
