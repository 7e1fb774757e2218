//! Built-in list types
//!
//! Each list type the service accepts as a spreadsheet lives in its own
//! module exposing its identifier, name and a `definition` constructor.
//! [`builtin_registry`] registers all of them; there is no registration by
//! side effect.

pub mod administrative_court;
pub mod care_standards_tribunal;
pub mod london_administrative_court;
pub mod primary_health_tribunal;
pub mod rcj_standard;
mod shared;
pub mod utiac_statutory_appeals;

use crate::convert::ErrorMode;
use crate::registry::{
    ConverterRegistry, ListTypeDefinition, RegistryError, build_converter_registry,
};

pub use shared::SCHEMA_VERSION;

/// Definitions of every built-in list type, in identifier order
pub fn builtin_definitions(
    error_mode: ErrorMode,
) -> Result<Vec<ListTypeDefinition>, RegistryError> {
    Ok(vec![
        care_standards_tribunal::definition(error_mode)?,
        primary_health_tribunal::definition(error_mode)?,
        rcj_standard::definition(error_mode)?,
        london_administrative_court::definition(error_mode)?,
        administrative_court::definition(error_mode)?,
        utiac_statutory_appeals::definition(error_mode)?,
    ])
}

/// Registry holding every built-in list type
pub fn builtin_registry(error_mode: ErrorMode) -> Result<ConverterRegistry, RegistryError> {
    build_converter_registry(builtin_definitions(error_mode)?)
}
