//! Cell-level validators for spreadsheet columns.
//!
//! Each validator checks a single, already-trimmed cell value and reports the
//! 1-based data row number alongside the offending value when it rejects it.
//! Validators are attached to columns through
//! [`FieldConfig::with_validator`](crate::convert::FieldConfig::with_validator)
//! and run in declaration order; the first failure stops validation of that
//! cell.
//!
//! Any function or closure with the signature
//! `Fn(&str, usize) -> Result<(), FieldError>` is a validator, so plain
//! functions such as [`validate_time_format`] can be attached directly.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Expected-format hint used in time validation messages
pub const TIME_FORMAT_HINT: &str = "h:mma, h.mma or ha (e.g. 9:30am, 2pm)";

/// Human-readable label for [`DD_MM_YYYY_PATTERN`]
pub const DD_MM_YYYY: &str = "dd/MM/yyyy";

/// Day and month ranges are enforced by the pattern itself.
pub const DD_MM_YYYY_PATTERN: &str = r"^(0[1-9]|[12]\d|3[01])/(0[1-9]|1[0-2])/\d{4}$";

static RE_HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[A-Za-z!][^>]*>").expect("Invalid regex"));
static RE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?:[:.](\d{2}))?\s*(am|pm)$").expect("Invalid regex")
});

/// A cell value rejected by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    /// 1-based data row number
    pub row: usize,
    /// The rejected value
    pub value: String,
    /// Full human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(row: usize, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            value: value.into(),
            message: message.into(),
        }
    }
}

/// A check applied to one cell of one row.
pub trait RowValidator: Send + Sync {
    fn validate(&self, value: &str, row_number: usize) -> Result<(), FieldError>;
}

impl<F> RowValidator for F
where
    F: Fn(&str, usize) -> Result<(), FieldError> + Send + Sync,
{
    fn validate(&self, value: &str, row_number: usize) -> Result<(), FieldError> {
        self(value, row_number)
    }
}

/// Rejects values containing HTML/XML-style tags.
#[derive(Debug, Clone)]
pub struct NoHtmlTags {
    label: String,
}

/// Build a validator rejecting markup in the column labelled `label`.
///
/// # Examples
///
/// ```
/// use court_list_ingest::validation::{no_html_tags, RowValidator};
///
/// let validator = no_html_tags("Case name");
/// assert!(validator.validate("Smith v Jones", 1).is_ok());
/// assert!(validator.validate("<script>x</script>", 1).is_err());
/// ```
pub fn no_html_tags(label: impl Into<String>) -> NoHtmlTags {
    NoHtmlTags {
        label: label.into(),
    }
}

impl RowValidator for NoHtmlTags {
    fn validate(&self, value: &str, row_number: usize) -> Result<(), FieldError> {
        let trimmed = value.trim();
        if RE_HTML_TAG.is_match(trimmed) {
            return Err(FieldError::new(
                row_number,
                trimmed,
                format!(
                    "{} in row {} contains HTML tags which are not allowed: \"{}\"",
                    self.label, row_number, trimmed
                ),
            ));
        }
        Ok(())
    }
}

/// Validate a 12-hour clock time such as `9:30am`, `9.30 am` or `2pm`.
///
/// Hours must be within 1–12 and minutes within 00–59.
///
/// # Examples
///
/// ```
/// use court_list_ingest::validation::validate_time_format;
///
/// assert!(validate_time_format("9:30am", 1).is_ok());
/// assert!(validate_time_format("12pm", 1).is_ok());
/// assert!(validate_time_format("13pm", 1).is_err());
/// assert!(validate_time_format("9:30", 1).is_err());
/// ```
pub fn validate_time_format(value: &str, row_number: usize) -> Result<(), FieldError> {
    let trimmed = value.trim();
    let in_range = RE_TIME.captures(trimmed).is_some_and(|caps| {
        let hour_ok = caps[1]
            .parse::<u32>()
            .is_ok_and(|hour| (1..=12).contains(&hour));
        let minute_ok = caps
            .get(2)
            .is_none_or(|m| m.as_str().parse::<u32>().is_ok_and(|minute| minute < 60));
        hour_ok && minute_ok
    });

    if in_range {
        Ok(())
    } else {
        Err(time_error(trimmed, row_number))
    }
}

/// Same accepted shapes as [`validate_time_format`] without the hour and
/// minute range checks.
pub fn validate_time_format_simple(value: &str, row_number: usize) -> Result<(), FieldError> {
    let trimmed = value.trim();
    if RE_TIME.is_match(trimmed) {
        Ok(())
    } else {
        Err(time_error(trimmed, row_number))
    }
}

fn time_error(value: &str, row_number: usize) -> FieldError {
    FieldError::new(
        row_number,
        value,
        format!(
            "Invalid time format \"{}\" in row {}. Expected format: {}",
            value, row_number, TIME_FORMAT_HINT
        ),
    )
}

/// Rejects values not matching a date pattern.
#[derive(Debug, Clone)]
pub struct DateFormat {
    pattern: Regex,
    expected_format: String,
}

/// Build a date validator from a pattern and the format shown to uploaders.
///
/// # Examples
///
/// ```
/// use court_list_ingest::validation::{validate_date_format, RowValidator};
/// use regex::Regex;
///
/// let validator = validate_date_format(Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), "yyyy-MM-dd");
/// assert!(validator.validate("2025-01-02", 1).is_ok());
/// assert!(validator.validate("02/01/2025", 1).is_err());
/// ```
pub fn validate_date_format(pattern: Regex, expected_format: impl Into<String>) -> DateFormat {
    DateFormat {
        pattern,
        expected_format: expected_format.into(),
    }
}

/// Date validator for `dd/MM/yyyy`.
pub fn dd_mm_yyyy() -> DateFormat {
    static RE_DD_MM_YYYY: Lazy<Regex> =
        Lazy::new(|| Regex::new(DD_MM_YYYY_PATTERN).expect("Invalid regex"));
    validate_date_format(RE_DD_MM_YYYY.clone(), DD_MM_YYYY)
}

impl RowValidator for DateFormat {
    fn validate(&self, value: &str, row_number: usize) -> Result<(), FieldError> {
        let trimmed = value.trim();
        if self.pattern.is_match(trimmed) {
            return Ok(());
        }
        Err(FieldError::new(
            row_number,
            trimmed,
            format!(
                "Invalid date format \"{}\" in row {}. Expected format: {}",
                trimmed, row_number, self.expected_format
            ),
        ))
    }
}
