//! Structural checks on the route table.

use std::collections::HashMap;

use crate::diagnostic::GeneratorError;
use crate::ir::ApiIR;

/// Rejects two handlers claiming the same path within one group.
///
/// Paths are compared exactly, matching the generated dispatcher, so
/// `/user` and `/user/` are different routes.
pub fn validate_routes(api: &ApiIR) -> Result<(), GeneratorError> {
    for group in &api.groups {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for handler in &group.handlers {
            if let Some(first) = seen.insert(&handler.api.route, &handler.method_name) {
                return Err(GeneratorError::DuplicateRoute {
                    group: group.name.clone(),
                    path: handler.api.route.clone(),
                    first: first.to_string(),
                    second: handler.method_name.clone(),
                });
            }
        }
    }
    Ok(())
}
