//! # apigen compiler
//!
//! Generates HTTP dispatch code for annotated Rust handler methods. Each
//! method carrying an `apigen:api` doc annotation gets a handler that checks
//! auth and verb, reads and validates its form parameters according to the
//! `apivalidator:` tags on its input struct, calls the method and maps the
//! result to a JSON response. Handlers are grouped per receiver type into a
//! `serve_http` dispatcher.
//!
//! ## Architecture
//!
//! ```text
//! Annotated source (.rs)
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  tree-sitter parse, annotation & tag lowering
//! │ (Rust → IR)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Route uniqueness
//! │   (IR)       │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Error catalog, handlers, dispatchers
//! │ (IR → Rust)  │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apigen_compiler::{Generator, GeneratorConfig};
//!
//! let generator = Generator::new(GeneratorConfig::new("src/api.rs", "src/api/handlers.rs"));
//! let result = generator.generate()?;
//! println!("{} handlers", result.handlers);
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;
pub mod validate;

use std::io::Write;
use std::path::Path;

use tracing::info;

pub use config::GeneratorConfig;
pub use diagnostic::GeneratorError;

/// Orchestrates the generation pipeline.
pub struct Generator {
    config: GeneratorConfig,
}

/// Summary of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateResult {
    pub groups: usize,
    pub handlers: usize,
    /// Distinct validation error constants emitted.
    pub error_payloads: usize,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs the full pipeline and writes the output file.
    ///
    /// 1. Read the input file
    /// 2. Parse and lower it into IR
    /// 3. Validate the IR
    /// 4. Generate the dispatch module
    /// 5. Atomically replace the output file
    pub fn generate(&self) -> Result<GenerateResult, GeneratorError> {
        let (code, result) = self.render()?;
        self.write_output(&code)?;

        info!(
            output = %self.config.output.display(),
            groups = result.groups,
            handlers = result.handlers,
            error_payloads = result.error_payloads,
            "generated dispatch code"
        );
        Ok(result)
    }

    /// Generates code for the configured input without writing anything.
    pub fn render(&self) -> Result<(String, GenerateResult), GeneratorError> {
        let source = std::fs::read_to_string(&self.config.input)
            .map_err(|e| GeneratorError::io(&self.config.input, e.to_string()))?;
        self.render_source(&source, &self.config.input)
    }

    /// Generates code for in-memory source attributed to `path`.
    pub fn render_source(
        &self,
        source: &str,
        path: &Path,
    ) -> Result<(String, GenerateResult), GeneratorError> {
        // Collect
        let mut frontend = frontend::create_frontend(&self.config)?;
        let api = frontend.collect(source, path)?;

        // Validate
        validate::validate_api(&api)?;

        // Emit
        let generated = codegen::generate(&api, &self.config)?;

        let result = GenerateResult {
            groups: api.groups.len(),
            handlers: api.handlers().count(),
            error_payloads: generated.error_payloads,
        };
        Ok((generated.source, result))
    }

    /// Writes through a temporary file in the destination directory and
    /// renames it into place. The temporary file is removed on any failure.
    fn write_output(&self, code: &str) -> Result<(), GeneratorError> {
        let output = &self.config.output;
        let write_error = |message: String| GeneratorError::WriteError {
            path: output.clone(),
            message,
        };

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_error(e.to_string()))?;
        file.write_all(code.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| write_error(e.to_string()))?;
        file.persist(output)
            .map_err(|e| write_error(e.error.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SOURCE: &str = r#"
pub struct MyApi;

pub struct ProfileParams {
    /// apivalidator: required
    pub login: String,
}

impl MyApi {
    /// apigen:api {"url": "/user/profile"}
    pub async fn profile(&self, ctx: &Context, params: ProfileParams) -> Result<User, ApiError> {
        todo!()
    }
}
"#;

    #[test]
    fn test_generate_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("api.rs");
        let output = dir.path().join("api_handlers.rs");
        std::fs::write(&input, SOURCE).unwrap();

        let generator = Generator::new(GeneratorConfig::new(&input, &output));
        let result = generator.generate().unwrap();

        assert_eq!(
            result,
            GenerateResult {
                groups: 1,
                handlers: 1,
                error_payloads: 1,
            }
        );
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("pub async fn handler_profile(&self, req: &Request) -> Response"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = TempDir::new().unwrap();
        let generator = Generator::new(GeneratorConfig::new(
            dir.path().join("missing.rs"),
            dir.path().join("out.rs"),
        ));
        assert!(matches!(generator.generate(), Err(GeneratorError::IoError { .. })));
        assert!(!dir.path().join("out.rs").exists());
    }

    #[test]
    fn test_failed_generation_keeps_previous_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("api.rs");
        let output = dir.path().join("api_handlers.rs");
        std::fs::write(&input, SOURCE.replace(r#"{"url": "/user/profile"}"#, "{not json")).unwrap();
        std::fs::write(&output, "// previous\n").unwrap();

        let generator = Generator::new(GeneratorConfig::new(&input, &output));
        assert!(matches!(
            generator.generate(),
            Err(GeneratorError::InvalidAnnotation { .. })
        ));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "// previous\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("api.rs");
        std::fs::write(&input, SOURCE).unwrap();

        let generator = Generator::new(GeneratorConfig::new(
            &input,
            dir.path().join("no_such_dir").join("out.rs"),
        ));
        assert!(matches!(generator.generate(), Err(GeneratorError::WriteError { .. })));
    }
}
