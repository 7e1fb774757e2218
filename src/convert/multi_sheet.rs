//! Conversion of workbooks made of several fixed, distinct worksheets.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use super::excel::convert_range;
use super::workbook;
use super::{ConversionError, ExcelConverterConfig, Record};

/// Where one worksheet lives and how to convert it
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Worksheet tab name, matched exactly
    pub worksheet_name: String,
    /// Position used when no tab carries `worksheet_name`
    pub worksheet_index: usize,
    /// Key of this sheet's rows in the combined output
    pub data_key: String,
    pub config: Arc<ExcelConverterConfig>,
}

impl SheetConfig {
    pub fn new(
        worksheet_name: impl Into<String>,
        worksheet_index: usize,
        data_key: impl Into<String>,
        config: impl Into<Arc<ExcelConverterConfig>>,
    ) -> Self {
        Self {
            worksheet_name: worksheet_name.into(),
            worksheet_index,
            data_key: data_key.into(),
            config: config.into(),
        }
    }
}

/// Convert every configured worksheet and key the rows by `data_key`.
///
/// Sheets are converted independently with their own configuration. The
/// first failing sheet fails the whole conversion. Each configuration must
/// resolve to a different worksheet.
pub fn convert_multi_sheet_excel_to_json(
    buffer: &[u8],
    sheets: &[SheetConfig],
) -> Result<BTreeMap<String, Vec<Record>>, ConversionError> {
    let mut workbook = workbook::open(buffer)?;
    let mut result = BTreeMap::new();
    let mut resolved = HashSet::new();

    for sheet in sheets {
        let (name, range) = workbook::sheet_by_name_or_index(
            &mut workbook,
            &sheet.worksheet_name,
            sheet.worksheet_index,
        )
        .map_err(|e| wrap(&sheet.worksheet_name, e))?;

        if !resolved.insert(name.clone()) {
            return Err(wrap(
                &sheet.worksheet_name,
                ConversionError::Config(format!(
                    "Worksheet '{}' is already used for another data key",
                    name
                )),
            ));
        }

        debug!("Converting worksheet '{}' into '{}'", name, sheet.data_key);
        let records = convert_range(&range, &sheet.config).map_err(|e| wrap(&name, e))?;

        if result.insert(sheet.data_key.clone(), records).is_some() {
            return Err(ConversionError::Config(format!(
                "Duplicate data key in sheet configuration: {}",
                sheet.data_key
            )));
        }
    }

    info!(
        "Converted {} worksheet(s), {} row(s) in total",
        result.len(),
        result.values().map(Vec::len).sum::<usize>()
    );
    Ok(result)
}

fn wrap(sheet: &str, error: ConversionError) -> ConversionError {
    ConversionError::Sheet {
        sheet: sheet.to_string(),
        source: Box::new(error),
    }
}
