//! Rust declarations the generator cares about.
//!
//! Only structs, impl blocks, method signatures and their `///` doc lines
//! are kept.

use std::path::PathBuf;

use crate::diagnostic::Span;

/// A parsed Rust source file.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub structs: Vec<StructDecl>,
    pub impls: Vec<ImplBlock>,
}

impl ParsedFile {
    pub fn find_struct(&self, name: &str) -> Option<&StructDecl> {
        self.structs.iter().find(|s| s.name == name)
    }
}

/// One `///` doc line.
#[derive(Debug, Clone)]
pub struct DocLine {
    /// Text after the `///` marker, trimmed.
    pub text: String,
    /// Byte offset of `text` within the source.
    pub text_start: usize,
    /// Span of the whole comment.
    pub span: Span,
}

/// A struct with named fields.
#[derive(Debug, Clone)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub span: Span,
}

/// A named struct field.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    /// Declared type as written, whitespace-normalized.
    pub type_text: String,
    pub docs: Vec<DocLine>,
    pub type_span: Span,
    pub span: Span,
}

/// An `impl` block.
#[derive(Debug)]
pub struct ImplBlock {
    /// Self type name without generic arguments.
    pub self_type: String,
    /// Impl type parameters (`<T>`), or the self type's arguments
    /// (`<u8>`) for a concrete generic type.
    pub generics: Option<String>,
    /// Implemented trait, `None` for inherent impls.
    pub trait_name: Option<String>,
    pub methods: Vec<MethodDecl>,
    pub span: Span,
}

/// A function inside an `impl` block.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub is_async: bool,
    /// Whether the first parameter is some form of `self`.
    pub has_self: bool,
    pub docs: Vec<DocLine>,
    pub parameters: Vec<Parameter>,
    pub span: Span,
}

/// A non-self function parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub type_text: String,
    pub span: Span,
}
