//! Per-group dispatcher generation.

use crate::ir::RouteEntry;

use super::naming::string_literal;
use super::UNKNOWN_METHOD_CONST;

/// Generates `serve_http` for a group: exact path match in registration
/// order, 404 otherwise.
pub fn generate_router(group: &str, routes: &[RouteEntry]) -> String {
    let mut output = String::new();

    output.push_str(&format!("impl {} {{\n", group));
    output.push_str("    pub async fn serve_http(&self, req: &Request) -> Response {\n");
    output.push_str("        match req.path() {\n");
    for route in routes {
        output.push_str(&format!(
            "            {} => self.{}(req).await,\n",
            string_literal(&route.path),
            route.handler_name
        ));
    }
    output.push_str(&format!(
        "            _ => Response::payload(StatusCode::NOT_FOUND, {}),\n",
        UNKNOWN_METHOD_CONST
    ));
    output.push_str("        }\n");
    output.push_str("    }\n");
    output.push_str("}\n");

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_in_registration_order() {
        let routes = vec![
            RouteEntry {
                group: "MyApi".to_string(),
                path: "/user/profile".to_string(),
                handler_name: "handler_profile".to_string(),
            },
            RouteEntry {
                group: "MyApi".to_string(),
                path: "/user/create".to_string(),
                handler_name: "handler_create".to_string(),
            },
        ];

        let code = generate_router("MyApi", &routes);
        assert_eq!(
            code,
            "impl MyApi {\n    pub async fn serve_http(&self, req: &Request) -> Response {\n        match req.path() {\n            \"/user/profile\" => self.handler_profile(req).await,\n            \"/user/create\" => self.handler_create(req).await,\n            _ => Response::payload(StatusCode::NOT_FOUND, UNKNOWN_METHOD_RESPONSE),\n        }\n    }\n}\n"
        );
    }
}
