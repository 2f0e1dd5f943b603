//! Handler method generation.
//!
//! Each annotated method gets a `handler_<method>` that runs, in order:
//! the auth check, the verb check, per-field extraction and validation in
//! declaration order, then the business call and response mapping.

use crate::config::GeneratorConfig;
use crate::diagnostic::GeneratorError;
use crate::ir::{
    CallArg, CheckKind, DefaultValue, FieldKind, GroupIR, HandlerIR, IntType, ParameterRule,
};

use super::catalog::ErrorCatalog;
use super::naming::string_literal;
use super::{BAD_METHOD_CONST, UNAUTHORIZED_CONST};

/// Generates the `impl <Group>` block holding every handler of a group.
pub fn generate_handlers(
    group: &GroupIR,
    catalog: &ErrorCatalog,
    config: &GeneratorConfig,
) -> Result<String, GeneratorError> {
    let mut output = String::new();
    output.push_str(&format!("impl {} {{\n", group.name));

    for (i, handler) in group.handlers.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&generate_handler(handler, catalog, config)?);
    }

    output.push_str("}\n");
    Ok(output)
}

fn generate_handler(
    handler: &HandlerIR,
    catalog: &ErrorCatalog,
    config: &GeneratorConfig,
) -> Result<String, GeneratorError> {
    let mut output = String::new();

    output.push_str(&format!(
        "    /// Serves `{}` by calling `{}::{}`.\n",
        handler.api.route, handler.group, handler.method_name
    ));
    output.push_str(&format!(
        "    pub async fn {}(&self, req: &Request) -> Response {{\n",
        handler.handler_name()
    ));

    if handler.api.requires_auth {
        output.push_str(&format!(
            "        if req.header({}) != Some({}) {{\n",
            string_literal(&config.auth_header),
            string_literal(&config.auth_token)
        ));
        output.push_str(&format!(
            "            return Response::payload(StatusCode::FORBIDDEN, {});\n",
            UNAUTHORIZED_CONST
        ));
        output.push_str("        }\n");
    }

    if !handler.api.http_method.is_empty() {
        output.push_str(&format!(
            "        if req.method() != {} {{\n",
            string_literal(&handler.api.http_method)
        ));
        output.push_str(&format!(
            "            return Response::payload(StatusCode::NOT_ACCEPTABLE, {});\n",
            BAD_METHOD_CONST
        ));
        output.push_str("        }\n");
    }

    // Blank line between sections, none right after the signature
    let mut has_section = handler.api.requires_auth || !handler.api.http_method.is_empty();
    for rule in &handler.rules {
        if has_section {
            output.push('\n');
        }
        output.push_str(&generate_rule(&handler.group, rule, catalog)?);
        has_section = true;
    }

    // Input struct, fields in declaration order
    if has_section {
        output.push('\n');
    }
    output.push_str(&format!("        let params = {} {{\n", handler.params_type));
    for rule in &handler.rules {
        output.push_str(&format!(
            "            {}: {},\n",
            rule.field_name,
            param_local(rule)
        ));
    }
    output.push_str("        };\n");

    let args: Vec<&str> = handler
        .call
        .args
        .iter()
        .map(|arg| match arg {
            CallArg::Context { by_ref: true } => "req.context()",
            CallArg::Context { by_ref: false } => "req.context().clone()",
            CallArg::Params => "params",
        })
        .collect();
    let await_suffix = if handler.call.is_async { ".await" } else { "" };

    output.push_str(&format!(
        "        let result = self.{}({}){}.map_err(ApiError::from);\n",
        handler.method_name,
        args.join(", "),
        await_suffix
    ));
    output.push_str("        match result {\n");
    output.push_str("            Ok(response) => Response::ok(&response),\n");
    output.push_str("            Err(ApiError::Api { status, message }) => Response::error(status, &message),\n");
    output.push_str("            Err(ApiError::Internal(message)) => {\n");
    output.push_str("                Response::error(StatusCode::INTERNAL_SERVER_ERROR, &message)\n");
    output.push_str("            }\n");
    output.push_str("        }\n");
    output.push_str("    }\n");

    Ok(output)
}

/// Extraction and validation of one field.
fn generate_rule(
    group: &str,
    rule: &ParameterRule,
    catalog: &ErrorCatalog,
) -> Result<String, GeneratorError> {
    let mut output = String::new();
    let raw = raw_local(rule);
    let param = param_local(rule);
    let reject = |check: CheckKind| -> Result<String, GeneratorError> {
        Ok(format!(
            "return Response::payload(StatusCode::BAD_REQUEST, {})",
            catalog.constant_for(group, rule, check)?
        ))
    };

    output.push_str(&format!(
        "        let {} = req.form_value({});\n",
        raw,
        string_literal(&rule.external_name)
    ));

    if rule.required {
        output.push_str(&format!("        if {}.is_empty() {{\n", raw));
        output.push_str(&format!("            {};\n", reject(CheckKind::Empty)?));
        output.push_str("        }\n");
    }

    match rule.kind {
        FieldKind::String => {
            match &rule.default {
                Some(DefaultValue::String(default)) => output.push_str(&format!(
                    "        let {} = if {}.is_empty() {{ {}.to_string() }} else {{ {}.to_string() }};\n",
                    param,
                    raw,
                    string_literal(default),
                    raw
                )),
                _ => output.push_str(&format!("        let {} = {}.to_string();\n", param, raw)),
            }
            if let Some(min) = rule.min {
                output.push_str(&format!("        if {}.chars().count() < {} {{\n", param, min));
                output.push_str(&format!("            {};\n", reject(CheckKind::Min)?));
                output.push_str("        }\n");
            }
            if let Some(max) = rule.max {
                output.push_str(&format!("        if {}.chars().count() > {} {{\n", param, max));
                output.push_str(&format!("            {};\n", reject(CheckKind::Max)?));
                output.push_str("        }\n");
            }
            if let Some(values) = &rule.enum_values {
                let members: Vec<String> = values.iter().map(|v| string_literal(v)).collect();
                output.push_str(&format!(
                    "        if ![{}].contains(&{}.as_str()) {{\n",
                    members.join(", "),
                    param
                ));
                output.push_str(&format!("            {};\n", reject(CheckKind::Enum)?));
                output.push_str("        }\n");
            }
        }
        FieldKind::Integer(int) => {
            // Parsed and range-checked as i64, then narrowed to the field type
            let value = if int == IntType::I64 {
                param.clone()
            } else {
                value_local(rule)
            };
            let parse = format!(
                "match {}.parse::<i64>() {{\n{indent}    Ok(value) => value,\n{indent}    Err(_) => {},\n{indent}}}",
                raw,
                reject(CheckKind::Int)?,
                indent = match rule.default {
                    Some(_) => "            ",
                    None => "        ",
                },
            );
            match &rule.default {
                Some(DefaultValue::Integer(default)) => {
                    output.push_str(&format!(
                        "        let {}: i64 = if {}.is_empty() {{\n",
                        value, raw
                    ));
                    output.push_str(&format!("            {}\n", default));
                    output.push_str("        } else {\n");
                    output.push_str(&format!("            {}\n", parse));
                    output.push_str("        };\n");
                }
                _ => output.push_str(&format!("        let {}: i64 = {};\n", value, parse)),
            }
            if let Some(min) = rule.min {
                output.push_str(&format!("        if {} < {} {{\n", value, min));
                output.push_str(&format!("            {};\n", reject(CheckKind::Min)?));
                output.push_str("        }\n");
            }
            if let Some(max) = rule.max {
                output.push_str(&format!("        if {} > {} {{\n", value, max));
                output.push_str(&format!("            {};\n", reject(CheckKind::Max)?));
                output.push_str("        }\n");
            }
            if int != IntType::I64 {
                output.push_str(&format!(
                    "        let {} = match {}::try_from({}) {{\n",
                    param,
                    int.as_str(),
                    value
                ));
                output.push_str("            Ok(value) => value,\n");
                output.push_str(&format!("            Err(_) => {},\n", reject(CheckKind::Int)?));
                output.push_str("        };\n");
            }
            if let Some(values) = &rule.enum_values {
                output.push_str(&format!(
                    "        if ![{}].contains(&{}) {{\n",
                    values.join(", "),
                    param
                ));
                output.push_str(&format!("            {};\n", reject(CheckKind::Enum)?));
                output.push_str("        }\n");
            }
        }
    }

    Ok(output)
}

fn local_stem(rule: &ParameterRule) -> &str {
    rule.field_name.trim_start_matches("r#")
}

fn raw_local(rule: &ParameterRule) -> String {
    format!("raw_{}", local_stem(rule))
}

fn param_local(rule: &ParameterRule) -> String {
    format!("param_{}", local_stem(rule))
}

fn value_local(rule: &ParameterRule) -> String {
    format!("value_{}", local_stem(rule))
}
