//! Rust code generation from the API IR.
//!
//! The output is a single module meant to be mounted as a child of the
//! annotated module (`use super::*;`). Layout:
//! - header and imports
//! - shared payloads (`UNKNOWN_METHOD_RESPONSE`, then `UNAUTHORIZED_RESPONSE` /
//!   `BAD_METHOD_RESPONSE` right before the first group that needs them)
//! - one `impl` block of handlers per group, in first-seen order
//! - the error catalog, sorted by identifier
//! - one `serve_http` dispatcher per group, in first-seen order

mod catalog;
mod handlers;
mod naming;
mod router;

pub use catalog::ErrorCatalog;

use crate::config::GeneratorConfig;
use crate::diagnostic::GeneratorError;
use crate::ir::{ApiIR, RouteEntry};
use naming::{error_payload, string_literal};

pub(crate) const UNKNOWN_METHOD_CONST: &str = "UNKNOWN_METHOD_RESPONSE";
pub(crate) const UNAUTHORIZED_CONST: &str = "UNAUTHORIZED_RESPONSE";
pub(crate) const BAD_METHOD_CONST: &str = "BAD_METHOD_RESPONSE";

/// Generated Rust code.
pub struct GeneratedCode {
    /// Full content of the output module.
    pub source: String,
    /// Number of distinct validation error constants.
    pub error_payloads: usize,
}

/// Generates the dispatch module for a validated API.
///
/// Output depends only on the IR and config, so the same input always
/// yields byte-identical code.
pub fn generate(api: &ApiIR, config: &GeneratorConfig) -> Result<GeneratedCode, GeneratorError> {
    let catalog = ErrorCatalog::collect(api)?;
    let mut output = String::new();

    // Header
    let source_name = api
        .source_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| api.source_path.display().to_string());
    output.push_str(&format!(
        "// Code generated by apigen from {}. DO NOT EDIT.\n",
        source_name
    ));
    output.push_str("#![allow(unused_comparisons)]\n\n");
    output.push_str("use apigen_runtime::http::StatusCode;\n");
    output.push_str("use apigen_runtime::{ApiError, Request, Response};\n\n");
    output.push_str("use super::*;\n\n");

    output.push_str(&shared_payload(UNKNOWN_METHOD_CONST, "unknown method"));

    let mut unauthorized_emitted = false;
    let mut bad_method_emitted = false;
    for group in &api.groups {
        output.push('\n');
        let mut shared = String::new();
        if !unauthorized_emitted && group.handlers.iter().any(|h| h.api.requires_auth) {
            shared.push_str(&shared_payload(UNAUTHORIZED_CONST, "unauthorized"));
            unauthorized_emitted = true;
        }
        if !bad_method_emitted && group.handlers.iter().any(|h| !h.api.http_method.is_empty()) {
            shared.push_str(&shared_payload(BAD_METHOD_CONST, "bad method"));
            bad_method_emitted = true;
        }
        if !shared.is_empty() {
            output.push_str(&shared);
            output.push('\n');
        }
        output.push_str(&handlers::generate_handlers(group, &catalog, config)?);
    }

    if !catalog.is_empty() {
        output.push('\n');
        output.push_str(&catalog.render());
    }

    for group in &api.groups {
        let routes: Vec<RouteEntry> = api.routes().filter(|r| r.group == group.name).collect();
        output.push('\n');
        output.push_str(&router::generate_router(&group.name, &routes));
    }

    Ok(GeneratedCode {
        source: output,
        error_payloads: catalog.len(),
    })
}

fn shared_payload(name: &str, message: &str) -> String {
    format!(
        "const {}: &str = {};\n",
        name,
        string_literal(&error_payload(message))
    )
}
