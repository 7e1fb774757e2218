//! Primary Health Lists tribunal weekly hearing list

use super::shared;
use crate::convert::ErrorMode;
use crate::registry::{ListTypeDefinition, ListTypeId, RegistryError};

pub const LIST_TYPE_ID: ListTypeId = 10;
pub const NAME: &str = "primary-health-tribunal-weekly-hearing-list";
pub const ENGLISH_FRIENDLY_NAME: &str = "Primary Health Lists Weekly Hearing List";

const SCHEMA: &str = include_str!("../../schemas/tribunal-weekly-hearing-list.json");

pub fn definition(error_mode: ErrorMode) -> Result<ListTypeDefinition, RegistryError> {
    shared::single_sheet(
        LIST_TYPE_ID,
        NAME,
        ENGLISH_FRIENDLY_NAME,
        shared::tribunal_weekly_fields(),
        SCHEMA,
        error_mode,
    )
}
