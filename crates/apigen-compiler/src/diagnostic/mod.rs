//! Diagnostic types for error reporting.

mod error;
mod span;

pub use error::GeneratorError;
pub use span::Span;
