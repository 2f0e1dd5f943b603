//! Rust parser using tree-sitter.

use std::path::Path;

use miette::NamedSource;
use tree_sitter::{Node, Parser};

use super::ast::*;
use crate::diagnostic::{GeneratorError, Span};

/// Rust source parser.
pub struct RustParser {
    parser: Parser,
}

impl RustParser {
    /// Creates a new Rust parser.
    pub fn new() -> Result<Self, GeneratorError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|_| GeneratorError::ParserInitFailed)?;
        Ok(Self { parser })
    }

    /// Parses a Rust source file. Any syntax error is fatal.
    pub fn parse(&mut self, source: &str, path: &Path) -> Result<ParsedFile, GeneratorError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| GeneratorError::ParseFailed {
                path: path.to_path_buf(),
            })?;

        let root = tree.root_node();
        if let Some(bad) = first_error(root) {
            let snippet = bad
                .utf8_text(source.as_bytes())
                .unwrap_or("")
                .chars()
                .take(40)
                .collect::<String>();
            let message = if bad.is_missing() {
                format!("missing '{}'", bad.kind())
            } else {
                format!("unexpected '{}'", snippet.trim())
            };
            return Err(GeneratorError::SyntaxError {
                message,
                file: path.to_path_buf(),
                line: bad.start_position().row + 1,
                column: bad.start_position().column + 1,
                src: NamedSource::new(path.display().to_string(), source.to_string()),
                at: (bad.start_byte(), bad.end_byte() - bad.start_byte()).into(),
            });
        }

        let mut visitor = Visitor::new(source, path);
        visitor.visit_items(root);

        Ok(ParsedFile {
            path: path.to_path_buf(),
            source: source.to_string(),
            structs: visitor.structs,
            impls: visitor.impls,
        })
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(bad) = first_error(child) {
            return Some(bad);
        }
    }
    None
}

/// AST visitor that extracts declarations from tree-sitter nodes.
struct Visitor<'a> {
    source: &'a str,
    path: &'a Path,
    structs: Vec<StructDecl>,
    impls: Vec<ImplBlock>,
}

impl<'a> Visitor<'a> {
    fn new(source: &'a str, path: &'a Path) -> Self {
        Self {
            source,
            path,
            structs: Vec::new(),
            impls: Vec::new(),
        }
    }

    fn span(&self, node: Node) -> Span {
        Span {
            file: self.path.to_path_buf(),
            start_line: node.start_position().row,
            start_col: node.start_position().column,
            end_line: node.end_position().row,
            end_col: node.end_position().column,
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
        }
    }

    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Returns the `///` doc line carried by a comment node, if any.
    fn doc_line(&self, node: Node) -> Option<DocLine> {
        let raw = self.node_text(node);
        if !raw.starts_with("///") || raw.starts_with("////") {
            return None;
        }
        let body = &raw[3..];
        let leading = body.len() - body.trim_start().len();
        Some(DocLine {
            text: body.trim().to_string(),
            text_start: node.start_byte() + 3 + leading,
            span: self.span(node),
        })
    }

    /// Visits top-level items. Items nested in inline modules are not
    /// candidates.
    fn visit_items(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "struct_item" => {
                    if let Some(decl) = self.visit_struct(child) {
                        self.structs.push(decl);
                    }
                }
                "impl_item" => {
                    if let Some(block) = self.visit_impl(child) {
                        self.impls.push(block);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_struct(&self, node: Node) -> Option<StructDecl> {
        let name = self.node_text(node.child_by_field_name("name")?).to_string();
        let mut fields = Vec::new();

        if let Some(body) = node.child_by_field_name("body") {
            if body.kind() == "field_declaration_list" {
                fields = self.visit_fields(body);
            }
        }

        Some(StructDecl {
            name,
            fields,
            span: self.span(node),
        })
    }

    fn visit_fields(&self, node: Node) -> Vec<FieldDecl> {
        let mut fields = Vec::new();
        let mut docs = Vec::new();
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            match child.kind() {
                "line_comment" => {
                    if let Some(doc) = self.doc_line(child) {
                        docs.push(doc);
                    }
                }
                "attribute_item" | "block_comment" | "," | "{" | "}" => {}
                "field_declaration" => {
                    let (Some(name), Some(typ)) = (
                        child.child_by_field_name("name"),
                        child.child_by_field_name("type"),
                    ) else {
                        docs.clear();
                        continue;
                    };
                    fields.push(FieldDecl {
                        name: self.node_text(name).to_string(),
                        type_text: normalize_type(self.node_text(typ)),
                        docs: std::mem::take(&mut docs),
                        type_span: self.span(typ),
                        span: self.span(child),
                    });
                }
                _ => docs.clear(),
            }
        }

        fields
    }

    fn visit_impl(&self, node: Node) -> Option<ImplBlock> {
        let declared_type = node.child_by_field_name("type")?;
        let self_type = match declared_type.kind() {
            "generic_type" => declared_type.child_by_field_name("type").unwrap_or(declared_type),
            _ => declared_type,
        };
        let generics = node
            .child_by_field_name("type_parameters")
            .or_else(|| declared_type.child_by_field_name("type_arguments"))
            .map(|g| normalize_type(self.node_text(g)));
        let trait_name = node
            .child_by_field_name("trait")
            .map(|t| self.node_text(t).to_string());

        let mut methods = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut docs = Vec::new();
            let mut cursor = body.walk();
            for child in body.children(&mut cursor) {
                match child.kind() {
                    "line_comment" => {
                        if let Some(doc) = self.doc_line(child) {
                            docs.push(doc);
                        }
                        continue;
                    }
                    "attribute_item" | "block_comment" => continue,
                    "function_item" => {
                        if let Some(method) = self.visit_method(child, std::mem::take(&mut docs)) {
                            methods.push(method);
                        }
                    }
                    _ => {}
                }
                docs.clear();
            }
        }

        Some(ImplBlock {
            self_type: self.node_text(self_type).to_string(),
            generics,
            trait_name,
            methods,
            span: self.span(node),
        })
    }

    fn visit_method(&self, node: Node, docs: Vec<DocLine>) -> Option<MethodDecl> {
        let name = self.node_text(node.child_by_field_name("name")?).to_string();

        let mut is_async = false;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "function_modifiers" {
                is_async = self
                    .node_text(child)
                    .split_whitespace()
                    .any(|m| m == "async");
            }
        }

        let mut has_self = false;
        let mut parameters = Vec::new();
        if let Some(params) = node.child_by_field_name("parameters") {
            let mut cursor = params.walk();
            for param in params.children(&mut cursor) {
                match param.kind() {
                    "self_parameter" => has_self = true,
                    "parameter" => {
                        let (Some(pattern), Some(typ)) = (
                            param.child_by_field_name("pattern"),
                            param.child_by_field_name("type"),
                        ) else {
                            continue;
                        };
                        parameters.push(Parameter {
                            name: self.node_text(pattern).to_string(),
                            type_text: normalize_type(self.node_text(typ)),
                            span: self.span(param),
                        });
                    }
                    _ => {}
                }
            }
        }

        Some(MethodDecl {
            name,
            is_async,
            has_self,
            docs,
            parameters,
            span: self.span(node),
        })
    }
}

/// Collapses internal whitespace so `std :: string :: String` and
/// `std::string::String` compare equal.
fn normalize_type(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in text.split_whitespace() {
        let joins = out.ends_with(|c: char| c == ':' || c == '&' || c == '<')
            || token.starts_with(|c: char| c == ':' || c == '>' || c == '<' || c == ',');
        if !out.is_empty() && !joins {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
