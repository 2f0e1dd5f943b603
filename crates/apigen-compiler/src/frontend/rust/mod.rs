//! Rust frontend: tree-sitter parsing plus lowering into the API IR.

pub mod ast;
pub mod parser;
pub mod to_ir;

use std::path::Path;

use super::Frontend;
use crate::config::GeneratorConfig;
use crate::diagnostic::GeneratorError;
use crate::ir::ApiIR;
use parser::RustParser;

/// Rust frontend implementation.
pub struct RustFrontend {
    parser: RustParser,
    config: GeneratorConfig,
}

impl RustFrontend {
    /// Creates a new Rust frontend.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        Ok(Self {
            parser: RustParser::new()?,
            config: config.clone(),
        })
    }
}

impl Frontend for RustFrontend {
    fn language(&self) -> &str {
        "rust"
    }

    fn collect(&mut self, source: &str, path: &Path) -> Result<ApiIR, GeneratorError> {
        let parsed = self.parser.parse(source, path)?;
        to_ir::to_ir(&parsed, &self.config)
    }
}
