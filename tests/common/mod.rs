//! Shared helpers for integration tests

#![allow(dead_code)]

use rust_xlsxwriter::{Format, Workbook};

/// Build an xlsx workbook in memory. Each sheet is `(name, rows)`; empty
/// strings are left as blank cells.
pub fn workbook(sheets: &[(&str, &[&[&str]])]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// Single-sheet workbook named "Sheet1"
pub fn single_sheet(rows: &[&[&str]]) -> Vec<u8> {
    workbook(&[("Sheet1", rows)])
}

/// Workbook whose second row holds a date cell and a time cell, both stored
/// as Excel serial numbers with a display format
pub fn workbook_with_serial_cells(date_serial: f64, time_serial: f64) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Date").unwrap();
    worksheet.write_string(0, 1, "Time").unwrap();
    worksheet.write_string(0, 2, "Count").unwrap();

    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let time_format = Format::new().set_num_format("hh:mm");
    worksheet
        .write_number_with_format(1, 0, date_serial, &date_format)
        .unwrap();
    worksheet
        .write_number_with_format(1, 1, time_serial, &time_format)
        .unwrap();
    worksheet.write_number(1, 2, 42.0).unwrap();
    workbook.save_to_buffer().unwrap()
}

pub const RCJ_HEADERS: &[&str] = &[
    "Venue",
    "Judge",
    "Time",
    "Case number",
    "Case details",
    "Hearing type",
    "Additional information",
];

pub const RCJ_ROW: &[&str] = &[
    "Court 1",
    "Mr Justice Smith",
    "10:30am",
    "KB-2025-000123",
    "A v B",
    "Application",
    "",
];

pub const TRIBUNAL_HEADERS: &[&str] = &[
    "Date",
    "Case name",
    "Hearing length",
    "Hearing type",
    "Venue",
    "Additional information",
];

pub const TRIBUNAL_ROW: &[&str] = &[
    "02/01/2025",
    "A Care Home Ltd v Ofsted",
    "1 day",
    "Final hearing",
    "Remote - CVP",
    "",
];

pub const UTIAC_HEADERS: &[&str] = &[
    "Hearing time",
    "Appellant",
    "Representative",
    "Appeal reference number",
    "Judge(s)",
    "Hearing type",
    "Location",
    "Additional information",
];

pub const UTIAC_ROW: &[&str] = &[
    "10am",
    "Appellant One",
    "Counsel",
    "UI-2025-000001",
    "UTJ Jones",
    "Substantive",
    "Field House",
    "",
];
