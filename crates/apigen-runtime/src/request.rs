//! Incoming request as seen by generated handlers.

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::form_urlencoded;

use crate::Context;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Method, path, headers and decoded form values of one request.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    /// Form-encoded body pairs; looked up before `query`.
    form: Vec<(String, String)>,
    query: Vec<(String, String)>,
    context: Context,
}

impl Request {
    /// Creates a request for `target`, which may carry a `?query` suffix.
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, decode(query.as_bytes())),
            None => (target, Vec::new()),
        };
        Self {
            method,
            path: path.to_string(),
            headers: HeaderMap::new(),
            form: Vec::new(),
            query,
            context: Context::background(),
        }
    }

    /// Converts an `http` request, decoding the body when it is form-encoded.
    pub fn from_http<B: AsRef<[u8]>>(req: http::Request<B>) -> Self {
        let (parts, body) = req.into_parts();
        let is_form = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with(FORM_CONTENT_TYPE));

        let mut request = Self::new(parts.method, parts.uri.path());
        request.query = parts.uri.query().map(|q| decode(q.as_bytes())).unwrap_or_default();
        request.headers = parts.headers;
        if is_form {
            request.form = decode(body.as_ref());
        }
        request
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replaces the query values with those decoded from `query`.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = decode(query.as_bytes());
        self
    }

    /// Sets the form-encoded body.
    pub fn with_form_body(mut self, body: impl AsRef<[u8]>) -> Self {
        self.form = decode(body.as_ref());
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub fn method(&self) -> &str {
        self.method.as_str()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value for `key`, body before query string; empty when absent.
    pub fn form_value(&self, key: &str) -> &str {
        self.form
            .iter()
            .chain(self.query.iter())
            .find(|(k, _)| k == key)
            .map_or("", |(_, v)| v.as_str())
    }

    pub fn context(&self) -> &Context {
        &self.context
    }
}

fn decode(input: &[u8]) -> Vec<(String, String)> {
    form_urlencoded::parse(input).into_owned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_is_split() {
        let req = Request::new(Method::GET, "/user/profile?login=rvasily&x=1");
        assert_eq!(req.path(), "/user/profile");
        assert_eq!(req.method(), "GET");
        assert_eq!(req.form_value("login"), "rvasily");
        assert_eq!(req.form_value("missing"), "");
    }

    #[test]
    fn test_body_wins_over_query() {
        let req = Request::new(Method::POST, "/user/create?login=from_query&age=1")
            .with_form_body("login=from+body&name=%D0%98%D0%B2%D0%B0%D0%BD");
        assert_eq!(req.form_value("login"), "from body");
        assert_eq!(req.form_value("name"), "Иван");
        assert_eq!(req.form_value("age"), "1");
    }

    #[test]
    fn test_first_value_wins() {
        let req = Request::new(Method::GET, "/").with_query("a=1&a=2");
        assert_eq!(req.form_value("a"), "1");
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let req = Request::new(Method::GET, "/")
            .with_header(HeaderName::from_static("x-auth"), HeaderValue::from_static("100500"));
        assert_eq!(req.header("X-Auth"), Some("100500"));
        assert_eq!(req.header("x-other"), None);
    }

    #[test]
    fn test_from_http_decodes_form_body() {
        let req = http::Request::builder()
            .method(Method::POST)
            .uri("/user/create?age=10")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded; charset=utf-8")
            .header("X-Auth", "100500")
            .body(b"login=mr.moderator".to_vec())
            .unwrap();

        let req = Request::from_http(req);
        assert_eq!(req.path(), "/user/create");
        assert_eq!(req.method(), "POST");
        assert_eq!(req.form_value("login"), "mr.moderator");
        assert_eq!(req.form_value("age"), "10");
        assert_eq!(req.header("x-auth"), Some("100500"));
    }

    #[test]
    fn test_from_http_ignores_non_form_body() {
        let req = http::Request::builder()
            .method(Method::POST)
            .uri("/user/create")
            .header(CONTENT_TYPE, "application/json")
            .body(r#"{"login":"x"}"#)
            .unwrap();

        assert_eq!(Request::from_http(req).form_value("login"), "");
    }
}
