//! Validation of collected IR before anything is emitted.

mod structure;

use crate::diagnostic::GeneratorError;
use crate::ir::ApiIR;

/// Validates the whole API surface.
pub fn validate_api(api: &ApiIR) -> Result<(), GeneratorError> {
    structure::validate_routes(api)?;
    Ok(())
}
