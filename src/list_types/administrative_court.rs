//! Administrative Court daily cause list (regional centres)

use super::shared;
use crate::convert::ErrorMode;
use crate::registry::{ListTypeDefinition, ListTypeId, RegistryError};

pub const LIST_TYPE_ID: ListTypeId = 13;
pub const NAME: &str = "administrative-court-daily-cause-list";
pub const ENGLISH_FRIENDLY_NAME: &str = "Administrative Court Daily Cause List";

const SCHEMA: &str = include_str!("../../schemas/rcj-daily-cause-list.json");

pub fn definition(error_mode: ErrorMode) -> Result<ListTypeDefinition, RegistryError> {
    shared::single_sheet(
        LIST_TYPE_ID,
        NAME,
        ENGLISH_FRIENDLY_NAME,
        shared::rcj_fields(),
        SCHEMA,
        error_mode,
    )
}
