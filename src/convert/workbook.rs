//! Workbook access and cell rendering.
//!
//! Opens an in-memory workbook (xlsx, xls, xlsb or ods) and renders cells to
//! the trimmed strings the converter validates.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto_from_rs};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::ConversionError;

pub(crate) type Workbook<'a> = Sheets<Cursor<&'a [u8]>>;

/// Open a workbook held in memory
pub(crate) fn open(buffer: &[u8]) -> Result<Workbook<'_>, ConversionError> {
    if buffer.is_empty() {
        return Err(ConversionError::Workbook("Uploaded file is empty".to_string()));
    }
    open_workbook_auto_from_rs(Cursor::new(buffer))
        .map_err(|e| ConversionError::Workbook(format!("Failed to open workbook: {}", e)))
}

/// First worksheet and its name
pub(crate) fn first_sheet(
    workbook: &mut Workbook<'_>,
) -> Result<(String, Range<Data>), ConversionError> {
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ConversionError::Workbook("Workbook contains no worksheets".to_string()))?;
    let range = read_sheet(workbook, &name)?;
    Ok((name, range))
}

/// Worksheet located by name, falling back to its position
pub(crate) fn sheet_by_name_or_index(
    workbook: &mut Workbook<'_>,
    name: &str,
    index: usize,
) -> Result<(String, Range<Data>), ConversionError> {
    let names = workbook.sheet_names();
    let resolved = names
        .iter()
        .find(|n| n.as_str() == name)
        .or_else(|| names.get(index))
        .cloned()
        .ok_or_else(|| {
            ConversionError::Config(format!(
                "Worksheet '{}' (index {}) not found in workbook",
                name, index
            ))
        })?;
    let range = read_sheet(workbook, &resolved)?;
    Ok((resolved, range))
}

fn read_sheet(workbook: &mut Workbook<'_>, name: &str) -> Result<Range<Data>, ConversionError> {
    workbook
        .worksheet_range(name)
        .map_err(|e| ConversionError::Workbook(format!("Failed to read sheet '{}': {}", name, e)))
}

/// Render a cell as the trimmed text an uploader would see.
///
/// Error cells render as blank.
pub(crate) fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_excel_datetime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Serial day values count from 1899-12-30; the fraction is the time of day.
fn format_excel_datetime(value: f64) -> String {
    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30) else {
        return value.to_string();
    };
    let days = value.floor() as i64;
    let seconds = ((value - value.floor()) * 86_400.0).round() as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds.min(86_399), 0)
        .unwrap_or_default();

    if days == 0 {
        // Time-only cell, shown the way uploaders type times
        return time.format("%-I:%M%P").to_string();
    }

    let date = epoch + Duration::days(days);
    if seconds == 0 {
        date.format("%d/%m/%Y").to_string()
    } else {
        NaiveDateTime::new(date, time)
            .format("%d/%m/%Y %H:%M")
            .to_string()
    }
}
