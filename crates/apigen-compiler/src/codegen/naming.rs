//! Identifier and literal helpers for emitted Rust.

/// Converts a snake_case, PascalCase or camelCase name to SCREAMING_SNAKE_CASE.
///
/// Acronym runs stay together: `HTTPApi` becomes `HTTP_API`.
pub fn to_screaming_snake(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 && !result.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                result.push('_');
            }
        }
        result.push(c.to_ascii_uppercase());
    }

    result.trim_end_matches('_').to_string()
}

/// Renders `s` as a Rust string literal.
pub fn string_literal(s: &str) -> String {
    format!("{:?}", s)
}

/// JSON body `{"error": message}` as emitted into payload constants.
pub fn error_payload(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screaming_snake() {
        assert_eq!(to_screaming_snake("MyApi"), "MY_API");
        assert_eq!(to_screaming_snake("login"), "LOGIN");
        assert_eq!(to_screaming_snake("full_name"), "FULL_NAME");
        assert_eq!(to_screaming_snake("userId"), "USER_ID");
        assert_eq!(to_screaming_snake("HTTPApi"), "HTTP_API");
        assert_eq!(to_screaming_snake("OtherApi2"), "OTHER_API2");
        assert_eq!(to_screaming_snake("v2Api"), "V2_API");
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal(r#"{"error":"x"}"#), r#""{\"error\":\"x\"}""#);
        assert_eq!(string_literal("a\\b"), r#""a\\b""#);
    }

    #[test]
    fn test_error_payload() {
        assert_eq!(error_payload("login must be not empty"), r#"{"error":"login must be not empty"}"#);
        assert_eq!(error_payload(r#"say "hi""#), r#"{"error":"say \"hi\""}"#);
    }
}
