//! Language frontends for collecting annotated handlers into IR.
//!
//! A frontend is responsible for:
//! 1. Parsing one source file in its language
//! 2. Lowering annotated methods and their input structs to the common IR
//!
//! Validation and code generation only ever see the IR.

pub mod rust;

use std::path::Path;

use crate::config::GeneratorConfig;
use crate::diagnostic::GeneratorError;
use crate::ir::ApiIR;

/// Trait for language frontends.
pub trait Frontend {
    /// Returns the language name (e.g., "rust").
    fn language(&self) -> &str;

    /// Parses one source file and returns its IR.
    fn collect(&mut self, source: &str, path: &Path) -> Result<ApiIR, GeneratorError>;
}

/// Creates the frontend for annotated Rust sources.
pub fn create_frontend(config: &GeneratorConfig) -> Result<Box<dyn Frontend>, GeneratorError> {
    Ok(Box::new(rust::RustFrontend::new(config)?))
}
