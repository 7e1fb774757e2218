//! List-types command implementation

use crate::cli::error::CliError;
use crate::convert::ErrorMode;
use crate::list_types::builtin_definitions;

/// Print every built-in list type
pub fn handle_list_types() -> Result<(), CliError> {
    for definition in builtin_definitions(ErrorMode::default())? {
        let kind = if definition.converter.sheets().is_some() {
            "multi-sheet"
        } else {
            "single-sheet"
        };
        println!(
            "{:>3}  {:<48} {} ({})",
            definition.id, definition.name, definition.english_friendly_name, kind
        );
    }
    Ok(())
}
