//! Generator configuration.

use std::path::PathBuf;

/// Configuration for the apigen generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Annotated Rust source file.
    pub input: PathBuf,

    /// File the generated dispatch code is written to.
    pub output: PathBuf,

    /// Request header carrying the auth token.
    pub auth_header: String,

    /// Shared secret the auth header must equal on `auth: true` routes.
    pub auth_token: String,

    /// Doc-line marker introducing a method's route annotation.
    pub annotation_marker: String,

    /// Doc-line marker introducing a field's validation tag.
    pub validator_marker: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("src/api.rs"),
            output: PathBuf::from("src/api_handlers.rs"),
            auth_header: "X-Auth".to_string(),
            auth_token: "100500".to_string(),
            annotation_marker: "apigen:api".to_string(),
            validator_marker: "apivalidator:".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Configuration for one input/output pair with default markers and auth.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }
}
