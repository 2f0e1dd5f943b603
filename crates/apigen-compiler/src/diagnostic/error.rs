//! Generator error types.
#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors that can occur while generating dispatch code.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to read file '{}': {message}", path.display())]
    #[diagnostic(code(apigen::io::read_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to write file '{}': {message}", path.display())]
    #[diagnostic(code(apigen::io::write_error))]
    WriteError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("Failed to initialize parser")]
    #[diagnostic(code(apigen::parse::init_failed))]
    ParserInitFailed,

    #[error("Failed to parse file: {}", path.display())]
    #[diagnostic(code(apigen::parse::parse_failed))]
    ParseFailed {
        path: PathBuf,
    },

    #[error("Syntax error in {}:{line}:{column}: {message}", file.display())]
    #[diagnostic(code(apigen::parse::syntax_error))]
    SyntaxError {
        message: String,
        file: PathBuf,
        line: usize,
        column: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("unexpected input here")]
        at: SourceSpan,
    },

    // =========================================================================
    // Annotation Errors
    // =========================================================================
    #[error("Invalid apigen:api annotation on '{group}::{method}': {message}")]
    #[diagnostic(
        code(apigen::annotation::invalid_payload),
        help(r#"Annotations look like: /// apigen:api {{"url": "/user/create", "auth": true, "method": "POST"}}"#)
    )]
    InvalidAnnotation {
        group: String,
        method: String,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("this annotation")]
        at: SourceSpan,
    },

    #[error("Method '{group}::{method}' has no usable input parameter: {message}")]
    #[diagnostic(
        code(apigen::annotation::bad_signature),
        help("Annotated methods take (&self, ctx: &Context, params: SomeParams), where SomeParams is a struct in the same file")
    )]
    BadSignature {
        group: String,
        method: String,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        at: SourceSpan,
    },

    // =========================================================================
    // Directive Errors
    // =========================================================================
    #[error("Invalid apivalidator tag on '{strukt}.{field}': {message}")]
    #[diagnostic(
        code(apigen::directive::invalid),
        help("Tags are comma separated: required, paramname=<ident>, default=<value>, min=<int>, max=<int>, enum=<a>|<b>")
    )]
    InvalidDirective {
        strukt: String,
        field: String,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("malformed directive")]
        at: SourceSpan,
    },

    // =========================================================================
    // Structure Errors
    // =========================================================================
    #[error("Field '{strukt}.{field}' has type '{type_desc}', which cannot be read from a form value")]
    #[diagnostic(
        code(apigen::structure::unresolved_kind),
        help("Input struct fields must be String or a primitive integer type")
    )]
    UnresolvedFieldKind {
        strukt: String,
        field: String,
        type_desc: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unsupported type")]
        at: SourceSpan,
    },

    #[error("Route '{path}' is claimed by both '{first}' and '{second}' in group '{group}'")]
    #[diagnostic(
        code(apigen::structure::duplicate_route),
        help("Every route path must map to exactly one handler within a group")
    )]
    DuplicateRoute {
        group: String,
        path: String,
        first: String,
        second: String,
    },

    #[error("Error payload '{identifier}' is requested with two different messages: '{existing}' and '{requested}'")]
    #[diagnostic(
        code(apigen::structure::catalog_conflict),
        help("Two parameters in one group map to the same constant name; rename one with paramname=")
    )]
    CatalogConflict {
        identifier: String,
        existing: String,
        requested: String,
    },

    // =========================================================================
    // Code Generation Errors
    // =========================================================================
    #[error("Failed to generate Rust code: {message}")]
    #[diagnostic(code(apigen::codegen::generation_failed))]
    CodegenFailed {
        message: String,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a codegen error.
    pub fn codegen(message: impl Into<String>) -> Self {
        Self::CodegenFailed {
            message: message.into(),
        }
    }
}
