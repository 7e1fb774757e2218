//! London Administrative Court daily cause list
//!
//! Uploaded as one workbook with a "Main hearings" tab and a "Planning Court"
//! tab. The Planning Court tab may be empty.

use super::shared;
use crate::convert::{ErrorMode, SheetConfig};
use crate::registry::{
    ListTypeDefinition, ListTypeId, RegistryError, create_multi_sheet_converter,
};

pub const LIST_TYPE_ID: ListTypeId = 12;
pub const NAME: &str = "london-administrative-court-daily-cause-list";
pub const ENGLISH_FRIENDLY_NAME: &str = "London Administrative Court Daily Cause List";

pub const MAIN_HEARINGS_SHEET: &str = "Main hearings";
pub const MAIN_HEARINGS_KEY: &str = "mainHearings";
pub const PLANNING_COURT_SHEET: &str = "Planning Court";
pub const PLANNING_COURT_KEY: &str = "planningCourt";

const SCHEMA: &str =
    include_str!("../../schemas/london-administrative-court-daily-cause-list.json");

pub fn definition(error_mode: ErrorMode) -> Result<ListTypeDefinition, RegistryError> {
    let sheets = vec![
        SheetConfig::new(
            MAIN_HEARINGS_SHEET,
            0,
            MAIN_HEARINGS_KEY,
            shared::config(shared::rcj_fields(), 1, error_mode)?,
        ),
        SheetConfig::new(
            PLANNING_COURT_SHEET,
            1,
            PLANNING_COURT_KEY,
            shared::config(shared::rcj_fields(), 0, error_mode)?,
        ),
    ];
    let converter =
        create_multi_sheet_converter(sheets).with_json_validator(shared::schema(SCHEMA)?);
    Ok(shared::definition(
        LIST_TYPE_ID,
        NAME,
        ENGLISH_FRIENDLY_NAME,
        converter,
    ))
}
