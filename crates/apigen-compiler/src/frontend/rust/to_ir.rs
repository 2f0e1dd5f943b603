//! Lowers parsed Rust declarations into the API IR.

use miette::NamedSource;
use tracing::{debug, warn};

use super::ast::{DocLine, FieldDecl, ImplBlock, MethodDecl, ParsedFile, StructDecl};
use crate::config::GeneratorConfig;
use crate::diagnostic::GeneratorError;
use crate::ir::{
    parse_tag, ApiDescriptor, ApiIR, CallArg, CallShape, DirectiveError, FieldKind, HandlerIR,
    ParameterRule,
};

/// Name of the method parameter that carries the input struct.
pub const PARAMS_ARGUMENT: &str = "params";

/// Converts a parsed file into IR.
///
/// Methods without an annotation line are skipped. Everything else that is
/// wrong with an annotated method is an error.
pub fn to_ir(file: &ParsedFile, config: &GeneratorConfig) -> Result<ApiIR, GeneratorError> {
    let lowering = Lowering { file, config };
    let mut ir = ApiIR::new(file.path.clone());

    for block in &file.impls {
        for method in &block.methods {
            let Some(annotation) = lowering.annotation(method) else {
                continue;
            };
            if let Some(trait_name) = &block.trait_name {
                warn!(
                    group = %block.self_type,
                    method = %method.name,
                    trait_name = %trait_name,
                    "ignoring annotated method in a trait impl"
                );
                continue;
            }

            let handler = lowering.handler(block, method, annotation)?;
            debug!(
                group = %handler.group,
                method = %handler.method_name,
                route = %handler.api.route,
                rules = handler.rules.len(),
                "collected handler"
            );
            ir.push_handler(handler);
        }
    }

    Ok(ir)
}

struct Lowering<'a> {
    file: &'a ParsedFile,
    config: &'a GeneratorConfig,
}

impl<'a> Lowering<'a> {
    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.file.path.display().to_string(), self.file.source.clone())
    }

    /// Finds the annotation line of a method.
    fn annotation<'m>(&self, method: &'m MethodDecl) -> Option<(&'m DocLine, &'m str)> {
        method
            .docs
            .iter()
            .find_map(|doc| marker_payload(&doc.text, &self.config.annotation_marker).map(|p| (doc, p)))
    }

    fn handler(
        &self,
        block: &ImplBlock,
        method: &MethodDecl,
        (doc, payload): (&DocLine, &str),
    ) -> Result<HandlerIR, GeneratorError> {
        let api = ApiDescriptor::parse_payload(payload).map_err(|message| {
            GeneratorError::InvalidAnnotation {
                group: block.self_type.clone(),
                method: method.name.clone(),
                message,
                src: self.named_source(),
                at: doc.span.source_span(),
            }
        })?;

        let bad_signature = |message: String, at: miette::SourceSpan| GeneratorError::BadSignature {
            group: block.self_type.clone(),
            method: method.name.clone(),
            message,
            src: self.named_source(),
            at,
        };

        if let Some(generics) = &block.generics {
            return Err(bad_signature(
                format!(
                    "'impl {}{}' is generic; handlers must live in an impl of a concrete, non-generic type",
                    block.self_type, generics
                ),
                block.span.source_span(),
            ));
        }

        if !method.has_self {
            return Err(bad_signature(
                "handlers must take &self".to_string(),
                method.span.source_span(),
            ));
        }

        let mut args = Vec::new();
        let mut params_struct = None;
        for param in &method.parameters {
            if param.name == PARAMS_ARGUMENT {
                let strukt = self.file.find_struct(&param.type_text).ok_or_else(|| {
                    bad_signature(
                        format!(
                            "'{}' is not a struct declared in {}",
                            param.type_text,
                            self.file.path.display()
                        ),
                        param.span.source_span(),
                    )
                })?;
                params_struct = Some(strukt);
                args.push(CallArg::Params);
            } else if let Some(by_ref) = context_arg(&param.type_text) {
                args.push(CallArg::Context { by_ref });
            } else {
                return Err(bad_signature(
                    format!(
                        "parameter '{}: {}' is neither the request context nor '{}'",
                        param.name, param.type_text, PARAMS_ARGUMENT
                    ),
                    param.span.source_span(),
                ));
            }
        }

        let Some(strukt) = params_struct else {
            return Err(bad_signature(
                format!("missing a '{}' parameter", PARAMS_ARGUMENT),
                method.span.source_span(),
            ));
        };

        let rules = strukt
            .fields
            .iter()
            .map(|field| self.rule(strukt, field))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(HandlerIR {
            group: block.self_type.clone(),
            method_name: method.name.clone(),
            api,
            params_type: strukt.name.clone(),
            rules,
            call: CallShape {
                is_async: method.is_async,
                args,
            },
            span: method.span.clone(),
        })
    }

    fn rule(&self, strukt: &StructDecl, field: &FieldDecl) -> Result<ParameterRule, GeneratorError> {
        let kind = FieldKind::from_type_name(&field.type_text).ok_or_else(|| {
            GeneratorError::UnresolvedFieldKind {
                strukt: strukt.name.clone(),
                field: field.name.clone(),
                type_desc: field.type_text.clone(),
                src: self.named_source(),
                at: field.type_span.source_span(),
            }
        })?;

        let (tag, tag_start) = field
            .docs
            .iter()
            .find_map(|doc| {
                marker_payload(&doc.text, &self.config.validator_marker).map(|payload| {
                    let offset = doc.text_start + (doc.text.len() - payload.len());
                    (payload, offset)
                })
            })
            .unwrap_or(("", field.span.start_byte));

        let invalid = |err: DirectiveError| GeneratorError::InvalidDirective {
            strukt: strukt.name.clone(),
            field: field.name.clone(),
            message: err.message,
            src: self.named_source(),
            at: (tag_start + err.offset, err.len).into(),
        };

        let directives = parse_tag(tag).map_err(invalid)?;
        let rule = ParameterRule::build(&field.name, kind, &directives).map_err(invalid)?;

        if rule.required && rule.default.is_some() {
            warn!(
                strukt = %strukt.name,
                field = %field.name,
                "field is both required and defaulted; the default is never used"
            );
        }

        Ok(rule)
    }
}

/// Returns the text after `marker` when a doc line starts with it.
///
/// The marker must be followed by whitespace or end the line, so
/// `apigen:apiary` is not mistaken for `apigen:api`.
fn marker_payload<'t>(text: &'t str, marker: &str) -> Option<&'t str> {
    let rest = text.strip_prefix(marker)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) || marker.ends_with(':') {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Recognizes `&Context`, `Context` and path-qualified forms.
/// Returns whether the context is taken by reference.
fn context_arg(type_text: &str) -> Option<bool> {
    let by_ref = type_text.starts_with('&');
    let tokens: Vec<&str> = type_text.trim_start_matches('&').split_whitespace().collect();
    if tokens.contains(&"mut") {
        return None;
    }
    let last = tokens.last()?;
    (last.rsplit("::").next() == Some("Context")).then_some(by_ref)
}
