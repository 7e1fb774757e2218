//! Generic spreadsheet → JSON conversion.
//!
//! Reads the header row, maps configured headers to columns, then converts
//! data rows in order until the first fully blank row. Conversion is
//! all-or-nothing: either every row passes or an error is returned.

use calamine::{Data, Range};
use tracing::{debug, info};

use super::workbook::{self, cell_to_string};
use super::{ConversionError, ErrorMode, ExcelConverterConfig, FieldConfig, Record};

/// Convert the first worksheet of `buffer` using `config`.
///
/// Returns one [`Record`] per data row, in spreadsheet order.
///
/// # Errors
///
/// - [`ConversionError::Workbook`] if the buffer cannot be read
/// - [`ConversionError::Config`] if a required column header is missing
/// - [`ConversionError::RowCount`] if there are fewer than `min_rows` data rows
/// - [`ConversionError::RequiredField`] / [`ConversionError::Validation`] for
///   the first failing cell (or [`ConversionError::Multiple`] in
///   [`ErrorMode::CollectAll`])
pub fn convert_excel_to_json(
    buffer: &[u8],
    config: &ExcelConverterConfig,
) -> Result<Vec<Record>, ConversionError> {
    let mut workbook = workbook::open(buffer)?;
    let (sheet_name, range) = workbook::first_sheet(&mut workbook)?;
    debug!("Converting worksheet '{}'", sheet_name);

    let records = convert_range(&range, config)?;
    info!(
        "Converted {} row(s) from worksheet '{}'",
        records.len(),
        sheet_name
    );
    Ok(records)
}

/// Convert an already-loaded worksheet range
pub(crate) fn convert_range(
    range: &Range<Data>,
    config: &ExcelConverterConfig,
) -> Result<Vec<Record>, ConversionError> {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());

    let header_row = rows.next().unwrap_or_default();
    let columns = map_columns(&header_row, config.fields())?;

    let data_rows: Vec<Vec<String>> = rows.take_while(|row| !is_blank_row(row)).collect();
    if data_rows.len() < config.min_rows() {
        return Err(ConversionError::RowCount {
            min_rows: config.min_rows(),
            found: data_rows.len(),
        });
    }

    let collect_all = config.error_mode() == ErrorMode::CollectAll;
    let mut records = Vec::with_capacity(data_rows.len());
    let mut errors = Vec::new();

    for (index, cells) in data_rows.iter().enumerate() {
        let row_number = index + 1;
        match convert_row(cells, row_number, &columns, config.fields(), collect_all) {
            Ok(record) => records.push(record),
            Err(mut row_errors) => {
                if !collect_all {
                    return Err(row_errors.remove(0));
                }
                errors.append(&mut row_errors);
            }
        }
    }

    if !errors.is_empty() {
        debug!("Conversion collected {} error(s)", errors.len());
        return Err(ConversionError::Multiple(errors));
    }

    Ok(records)
}

/// Column index for each configured field, `None` for absent optional columns
fn map_columns(
    header_row: &[String],
    fields: &[FieldConfig],
) -> Result<Vec<Option<usize>>, ConversionError> {
    let columns: Vec<Option<usize>> = fields
        .iter()
        .map(|field| header_row.iter().position(|h| h == &field.header))
        .collect();

    let missing: Vec<&str> = fields
        .iter()
        .zip(&columns)
        .filter(|(field, column)| field.required && column.is_none())
        .map(|(field, _)| field.header.as_str())
        .collect();

    if !missing.is_empty() {
        return Err(ConversionError::Config(format!(
            "Missing required column(s): {}",
            missing.join(", ")
        )));
    }

    Ok(columns)
}

fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.is_empty())
}

/// Convert one row; in fail-fast mode the error list holds a single entry
fn convert_row(
    cells: &[String],
    row_number: usize,
    columns: &[Option<usize>],
    fields: &[FieldConfig],
    collect_all: bool,
) -> Result<Record, Vec<ConversionError>> {
    let mut record = Record::new();
    let mut errors = Vec::new();

    for (field, column) in fields.iter().zip(columns) {
        let value = column
            .and_then(|index| cells.get(index))
            .map(String::as_str)
            .unwrap_or("");

        if let Err(error) = check_cell(field, value, row_number) {
            errors.push(error);
            if !collect_all {
                return Err(errors);
            }
            continue;
        }

        record.insert(field.field_name.clone(), value.to_string());
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        Err(errors)
    }
}

fn check_cell(field: &FieldConfig, value: &str, row_number: usize) -> Result<(), ConversionError> {
    if value.is_empty() {
        if field.required {
            return Err(ConversionError::RequiredField {
                row: row_number,
                field: field.header.clone(),
            });
        }
        return Ok(());
    }

    for validator in &field.validators {
        validator
            .validate(value, row_number)
            .map_err(|e| ConversionError::Validation {
                row: e.row,
                field: field.header.clone(),
                value: e.value,
                message: e.message,
            })?;
    }
    Ok(())
}
