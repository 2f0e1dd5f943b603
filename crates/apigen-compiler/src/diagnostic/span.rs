//! Source location tracking.

use std::path::PathBuf;

use miette::SourceSpan;

/// A span in the source code.
///
/// Lines and columns are zero-based, as reported by tree-sitter. Byte offsets
/// index into the original source text and are what miette labels point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub file: PathBuf,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Span {
    /// Human-facing line number (one-based).
    pub fn line(&self) -> usize {
        self.start_line + 1
    }

    /// Human-facing column number (one-based).
    pub fn column(&self) -> usize {
        self.start_col + 1
    }

    /// Byte range suitable for a miette label.
    pub fn source_span(&self) -> SourceSpan {
        (self.start_byte, self.end_byte.saturating_sub(self.start_byte)).into()
    }
}
