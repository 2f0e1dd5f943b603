//! Validation rules for input-struct fields.

use super::directive::{Directive, DirectiveError, Located};

/// Primitive integer types accepted on input-struct fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntType {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl IntType {
    pub fn from_type_name(name: &str) -> Option<Self> {
        let int = match name {
            "i8" => IntType::I8,
            "i16" => IntType::I16,
            "i32" => IntType::I32,
            "i64" => IntType::I64,
            "isize" => IntType::Isize,
            "u8" => IntType::U8,
            "u16" => IntType::U16,
            "u32" => IntType::U32,
            "u64" => IntType::U64,
            "usize" => IntType::Usize,
            _ => return None,
        };
        Some(int)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntType::I8 => "i8",
            IntType::I16 => "i16",
            IntType::I32 => "i32",
            IntType::I64 => "i64",
            IntType::Isize => "isize",
            IntType::U8 => "u8",
            IntType::U16 => "u16",
            IntType::U32 => "u32",
            IntType::U64 => "u64",
            IntType::Usize => "usize",
        }
    }

    /// Inclusive value range, clamped to what an `i64` directive can express.
    /// Pointer-sized types are treated as 64-bit.
    pub fn bounds(&self) -> (i64, i64) {
        match self {
            IntType::I8 => (i8::MIN.into(), i8::MAX.into()),
            IntType::I16 => (i16::MIN.into(), i16::MAX.into()),
            IntType::I32 => (i32::MIN.into(), i32::MAX.into()),
            IntType::I64 | IntType::Isize => (i64::MIN, i64::MAX),
            IntType::U8 => (0, u8::MAX.into()),
            IntType::U16 => (0, u16::MAX.into()),
            IntType::U32 => (0, u32::MAX.into()),
            IntType::U64 | IntType::Usize => (0, i64::MAX),
        }
    }

    fn contains(&self, value: i64) -> bool {
        let (lo, hi) = self.bounds();
        (lo..=hi).contains(&value)
    }
}

/// How a form value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer(IntType),
}

impl FieldKind {
    /// Resolves a declared field type. Returns `None` for anything that
    /// cannot be read from a single form value.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "String" | "std::string::String" | "alloc::string::String" => Some(FieldKind::String),
            _ => IntType::from_type_name(name).map(FieldKind::Integer),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, FieldKind::Integer(_))
    }
}

/// A default substituted when the request value is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    String(String),
    Integer(i64),
}

/// The individual checks a rule can fail, each with its own error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckKind {
    Empty,
    Int,
    Min,
    Max,
    Enum,
}

impl CheckKind {
    /// Segment used in the error constant identifier.
    pub fn suffix(&self) -> &'static str {
        match self {
            CheckKind::Empty => "EMPTY",
            CheckKind::Int => "INT",
            CheckKind::Min => "MIN",
            CheckKind::Max => "MAX",
            CheckKind::Enum => "ENUM",
        }
    }
}

/// Normalized validation rule for one input-struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRule {
    /// Field name in the input struct.
    pub field_name: String,
    /// Form key the value is read from.
    pub external_name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Allowed values in declaration order. Integer members are normalized
    /// to their canonical decimal form.
    pub enum_values: Option<Vec<String>>,
}

impl ParameterRule {
    /// Builds a rule from a field's parsed directives.
    ///
    /// Semantic problems (a default that does not fit the field, `min > max`,
    /// negative string lengths, ...) are reported against the directive that
    /// caused them.
    pub fn build(
        field_name: &str,
        kind: FieldKind,
        directives: &[Located<Directive>],
    ) -> Result<Self, DirectiveError> {
        let mut rule = ParameterRule {
            field_name: field_name.to_string(),
            external_name: field_name.to_lowercase(),
            kind,
            required: false,
            default: None,
            min: None,
            max: None,
            enum_values: None,
        };

        let mut default_at = None;
        for located in directives {
            let fail = |message: String| DirectiveError {
                message,
                offset: located.offset,
                len: located.len,
            };

            match &located.value {
                Directive::Required => rule.required = true,
                Directive::ParamName(name) => rule.external_name = name.clone(),
                Directive::Default(token) => {
                    rule.default = Some(match kind {
                        FieldKind::String => DefaultValue::String(token.clone()),
                        FieldKind::Integer(int) => {
                            DefaultValue::Integer(parse_member(token, int).map_err(fail)?)
                        }
                    });
                    default_at = Some(located);
                }
                Directive::Min(n) | Directive::Max(n) => {
                    match kind {
                        FieldKind::String if *n < 0 => {
                            return Err(fail(format!(
                                "{} is a length and cannot be negative",
                                located.value.keyword()
                            )));
                        }
                        FieldKind::Integer(int) if !int.contains(*n) => {
                            return Err(fail(format!(
                                "{} {} is out of range for {}",
                                located.value.keyword(),
                                n,
                                int.as_str()
                            )));
                        }
                        _ => {}
                    }
                    if matches!(located.value, Directive::Min(_)) {
                        rule.min = Some(*n);
                    } else {
                        rule.max = Some(*n);
                    }
                }
                Directive::Enum(values) => {
                    let values = match kind {
                        FieldKind::String => values.clone(),
                        FieldKind::Integer(int) => values
                            .iter()
                            .map(|v| parse_member(v, int).map(|n| n.to_string()))
                            .collect::<Result<Vec<_>, _>>()
                            .map_err(fail)?,
                    };
                    rule.enum_values = Some(values);
                }
            }
        }

        if let (Some(min), Some(max)) = (rule.min, rule.max) {
            if min > max {
                let at = directives
                    .iter()
                    .find(|d| matches!(d.value, Directive::Max(_)))
                    .map_or((0, 0), |d| (d.offset, d.len));
                return Err(DirectiveError {
                    message: format!("max {} is smaller than min {}", max, min),
                    offset: at.0,
                    len: at.1,
                });
            }
        }

        if let (Some(default), Some(values), Some(at)) =
            (&rule.default, &rule.enum_values, default_at)
        {
            let literal = match default {
                DefaultValue::String(s) => s.clone(),
                DefaultValue::Integer(n) => n.to_string(),
            };
            if !values.contains(&literal) {
                return Err(DirectiveError {
                    message: format!("default '{}' is not one of the enum values", literal),
                    offset: at.offset,
                    len: at.len,
                });
            }
        }

        Ok(rule)
    }

    /// Checks this rule can fail, in the order the generated code runs them.
    pub fn checks(&self) -> Vec<CheckKind> {
        let mut checks = Vec::new();
        if self.required {
            checks.push(CheckKind::Empty);
        }
        if self.kind.is_integer() {
            checks.push(CheckKind::Int);
        }
        if self.min.is_some() {
            checks.push(CheckKind::Min);
        }
        if self.max.is_some() {
            checks.push(CheckKind::Max);
        }
        if self.enum_values.is_some() {
            checks.push(CheckKind::Enum);
        }
        checks
    }

    /// Human-readable message for a failed check.
    pub fn message(&self, check: CheckKind) -> String {
        let name = &self.external_name;
        let len = match self.kind {
            FieldKind::String => " len",
            FieldKind::Integer(_) => "",
        };
        match check {
            CheckKind::Empty => format!("{} must be not empty", name),
            CheckKind::Int => format!("{} must be int", name),
            CheckKind::Min => format!("{}{} must be >= {}", name, len, self.min.unwrap_or_default()),
            CheckKind::Max => format!("{}{} must be <= {}", name, len, self.max.unwrap_or_default()),
            CheckKind::Enum => format!(
                "{} must be one of [{}]",
                name,
                self.enum_values.as_deref().unwrap_or_default().join(", ")
            ),
        }
    }
}

fn parse_member(token: &str, int: IntType) -> Result<i64, String> {
    let value = token
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a base-10 integer", token))?;
    if !int.contains(value) {
        return Err(format!("{} is out of range for {}", value, int.as_str()));
    }
    Ok(value)
}
