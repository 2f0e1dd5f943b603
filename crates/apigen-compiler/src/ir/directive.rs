//! The `apivalidator:` tag grammar.
//!
//! ```text
//! tag       := directive ("," directive)*
//! directive := "required"
//!            | "paramname=" ident
//!            | "default=" token
//!            | "min=" int
//!            | "max=" int
//!            | "enum=" token ("|" token)*
//! ```
//!
//! Whitespace around directives is ignored. Every malformed directive is
//! reported with its byte range inside the tag so diagnostics can point at it.

use std::fmt;

/// A single parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Required,
    ParamName(String),
    Default(String),
    Min(i64),
    Max(i64),
    Enum(Vec<String>),
}

impl Directive {
    /// Directive keyword as written in the tag.
    pub fn keyword(&self) -> &'static str {
        match self {
            Directive::Required => "required",
            Directive::ParamName(_) => "paramname",
            Directive::Default(_) => "default",
            Directive::Min(_) => "min",
            Directive::Max(_) => "max",
            Directive::Enum(_) => "enum",
        }
    }
}

/// A directive with its byte range inside the tag text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<T> {
    pub value: T,
    pub offset: usize,
    pub len: usize,
}

/// A malformed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveError {
    pub message: String,
    pub offset: usize,
    pub len: usize,
}

impl DirectiveError {
    fn new(message: impl Into<String>, offset: usize, len: usize) -> Self {
        Self {
            message: message.into(),
            offset,
            len,
        }
    }
}

impl fmt::Display for DirectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Parses a tag into its directives, in written order.
///
/// An empty (or all-whitespace) tag has no directives. Duplicate keywords are
/// rejected.
pub fn parse_tag(tag: &str) -> Result<Vec<Located<Directive>>, DirectiveError> {
    let mut directives: Vec<Located<Directive>> = Vec::new();
    if tag.trim().is_empty() {
        return Ok(directives);
    }

    let mut start = 0;
    for item in tag.split(',') {
        let item_start = start;
        start += item.len() + 1;

        let leading = item.len() - item.trim_start().len();
        let trimmed = item.trim();
        let offset = item_start + leading;

        if trimmed.is_empty() {
            return Err(DirectiveError::new("empty directive", item_start, item.len().max(1)));
        }

        let directive = parse_directive(trimmed, offset)?;
        if let Some(previous) = directives
            .iter()
            .find(|d| d.value.keyword() == directive.keyword())
        {
            return Err(DirectiveError::new(
                format!(
                    "'{}' is given more than once (first at offset {})",
                    directive.keyword(),
                    previous.offset
                ),
                offset,
                trimmed.len(),
            ));
        }

        directives.push(Located {
            value: directive,
            offset,
            len: trimmed.len(),
        });
    }

    Ok(directives)
}

fn parse_directive(text: &str, offset: usize) -> Result<Directive, DirectiveError> {
    let Some((raw_key, raw_value)) = text.split_once('=') else {
        return match text {
            "required" => Ok(Directive::Required),
            "paramname" | "default" | "min" | "max" | "enum" => Err(DirectiveError::new(
                format!("'{}' needs a value, e.g. {}=...", text, text),
                offset,
                text.len(),
            )),
            _ => Err(DirectiveError::new(
                format!("unknown directive '{}'", text),
                offset,
                text.len(),
            )),
        };
    };

    let key = raw_key.trim();
    let value = raw_value.trim();
    let value_offset = offset + (text.len() - raw_value.trim_start().len());

    if value.is_empty() && key != "required" {
        return Err(DirectiveError::new(
            format!("'{}' needs a value", key),
            offset,
            text.len(),
        ));
    }

    match key {
        "required" => Err(DirectiveError::new(
            "'required' takes no value",
            offset,
            text.len(),
        )),
        "paramname" => {
            if value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                Ok(Directive::ParamName(value.to_string()))
            } else {
                Err(DirectiveError::new(
                    format!("paramname '{}' must contain only letters, digits and '_'", value),
                    value_offset,
                    value.len(),
                ))
            }
        }
        "default" => Ok(Directive::Default(value.to_string())),
        "min" => parse_int(value, value_offset).map(Directive::Min),
        "max" => parse_int(value, value_offset).map(Directive::Max),
        "enum" => {
            let mut values = Vec::new();
            let mut member_offset = value_offset;
            for member in value.split('|') {
                let trimmed = member.trim();
                if trimmed.is_empty() {
                    return Err(DirectiveError::new(
                        "enum has an empty member",
                        member_offset,
                        member.len().max(1),
                    ));
                }
                if values.iter().any(|v| v == trimmed) {
                    return Err(DirectiveError::new(
                        format!("enum lists '{}' twice", trimmed),
                        member_offset,
                        member.len(),
                    ));
                }
                values.push(trimmed.to_string());
                member_offset += member.len() + 1;
            }
            Ok(Directive::Enum(values))
        }
        _ => Err(DirectiveError::new(
            format!("unknown directive '{}'", key),
            offset,
            key.len(),
        )),
    }
}

fn parse_int(value: &str, offset: usize) -> Result<i64, DirectiveError> {
    value.parse::<i64>().map_err(|_| {
        DirectiveError::new(
            format!("'{}' is not a base-10 integer", value),
            offset,
            value.len(),
        )
    })
}
