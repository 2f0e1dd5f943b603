//! Route-level descriptor parsed from a method's `apigen:api` annotation.

use serde::Deserialize;

/// What an annotated method exposes over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDescriptor {
    /// Exact request path, e.g. `/user/create`.
    pub route: String,
    /// Whether the auth header must carry the shared secret.
    pub requires_auth: bool,
    /// Required HTTP verb; empty accepts any.
    pub http_method: String,
}

/// Wire shape of the annotation payload.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiAnnotation {
    #[serde(default)]
    url: String,
    #[serde(default)]
    auth: bool,
    #[serde(default)]
    method: String,
}

impl ApiDescriptor {
    /// Decodes the JSON payload that follows the annotation marker.
    pub fn parse_payload(payload: &str) -> Result<Self, String> {
        let annotation: ApiAnnotation =
            serde_json::from_str(payload.trim()).map_err(|e| e.to_string())?;

        if annotation.url.is_empty() {
            return Err("missing \"url\"".to_string());
        }
        if !annotation.url.starts_with('/') {
            return Err(format!("url '{}' must start with '/'", annotation.url));
        }
        if annotation.url.chars().any(char::is_whitespace) {
            return Err(format!("url '{}' must not contain whitespace", annotation.url));
        }
        if !annotation.method.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(format!(
                "method '{}' must be an upper-case HTTP verb",
                annotation.method
            ));
        }

        Ok(Self {
            route: annotation.url,
            requires_auth: annotation.auth,
            http_method: annotation.method,
        })
    }
}
