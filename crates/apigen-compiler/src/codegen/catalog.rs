//! Deduplicated registry of validation error payloads.
//!
//! Every check a rule can fail maps to one `const` holding its JSON body.
//! Handlers in the same group that validate the same parameter the same way
//! share a constant; the same identifier with a different message is a
//! conflict and aborts generation.

use std::collections::BTreeMap;

use crate::diagnostic::GeneratorError;
use crate::ir::{ApiIR, CheckKind, ParameterRule};

use super::naming::{error_payload, string_literal, to_screaming_snake};

/// Error payload constants keyed by identifier.
#[derive(Debug, Default)]
pub struct ErrorCatalog {
    entries: BTreeMap<String, String>,
}

impl ErrorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every check of every rule in the API.
    pub fn collect(api: &ApiIR) -> Result<Self, GeneratorError> {
        let mut catalog = Self::new();
        for handler in api.handlers() {
            for rule in &handler.rules {
                for check in rule.checks() {
                    catalog.register(
                        identifier(&handler.group, rule, check),
                        rule.message(check),
                    )?;
                }
            }
        }
        Ok(catalog)
    }

    /// Adds an entry, or confirms an identical one already exists.
    pub fn register(&mut self, identifier: String, message: String) -> Result<(), GeneratorError> {
        match self.entries.get(&identifier) {
            Some(existing) if *existing == message => Ok(()),
            Some(existing) => Err(GeneratorError::CatalogConflict {
                identifier,
                existing: existing.clone(),
                requested: message,
            }),
            None => {
                self.entries.insert(identifier, message);
                Ok(())
            }
        }
    }

    /// Identifier of a registered check.
    pub fn constant_for(
        &self,
        group: &str,
        rule: &ParameterRule,
        check: CheckKind,
    ) -> Result<String, GeneratorError> {
        let id = identifier(group, rule, check);
        if self.entries.contains_key(&id) {
            Ok(id)
        } else {
            Err(GeneratorError::codegen(format!(
                "error payload '{}' was never registered",
                id
            )))
        }
    }

    pub fn lookup(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders all constants sorted by identifier.
    pub fn render(&self) -> String {
        let mut output = String::new();
        for (identifier, message) in &self.entries {
            output.push_str(&format!(
                "const {}: &str = {};\n",
                identifier,
                string_literal(&error_payload(message))
            ));
        }
        output
    }
}

/// `<PARAM>_<KIND>_<GROUP>`, e.g. `LOGIN_MIN_MY_API`.
pub fn identifier(group: &str, rule: &ParameterRule, check: CheckKind) -> String {
    format!(
        "{}_{}_{}",
        to_screaming_snake(&rule.external_name),
        check.suffix(),
        to_screaming_snake(group)
    )
}
