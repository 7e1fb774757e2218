//! Upper Tribunal (Immigration and Asylum Chamber) statutory appeals daily
//! hearing list

use super::shared::{self, text, time};
use crate::convert::{ErrorMode, FieldConfig};
use crate::registry::{ListTypeDefinition, ListTypeId, RegistryError};

pub const LIST_TYPE_ID: ListTypeId = 14;
pub const NAME: &str = "utiac-statutory-appeals-daily-hearing-list";
pub const ENGLISH_FRIENDLY_NAME: &str =
    "Upper Tribunal (Immigration and Asylum Chamber) Statutory Appeals Daily Hearing List";

const SCHEMA: &str = include_str!("../../schemas/utiac-statutory-appeals-daily-hearing-list.json");

fn fields() -> Vec<FieldConfig> {
    vec![
        time("Hearing time", "hearingTime"),
        text("Appellant", "appellant", true),
        text("Representative", "representative", false),
        text("Appeal reference number", "appealReferenceNumber", true),
        text("Judge(s)", "judges", true),
        text("Hearing type", "hearingType", true),
        text("Location", "location", true),
        text("Additional information", "additionalInformation", false),
    ]
}

pub fn definition(error_mode: ErrorMode) -> Result<ListTypeDefinition, RegistryError> {
    shared::single_sheet(
        LIST_TYPE_ID,
        NAME,
        ENGLISH_FRIENDLY_NAME,
        fields(),
        SCHEMA,
        error_mode,
    )
}
