//! Drives the module apigen emits for the `MyApi` example. The compiler's
//! tests check that `fixtures/my_api_handlers.rs` is byte-identical to what
//! it generates.

use apigen_runtime::http::{HeaderName, HeaderValue, Method, StatusCode};
use apigen_runtime::{ApiError, Context, Request};
use serde::Serialize;
use serde_json::{json, Value};

pub struct MyApi;

pub struct ProfileParams {
    pub login: String,
}

pub struct CreateParams {
    pub login: String,
    pub name: String,
    pub status: String,
    pub age: i64,
}

#[derive(Serialize)]
pub struct User {
    pub login: String,
    pub full_name: String,
    pub status: String,
    pub age: i64,
}

#[derive(Serialize)]
pub struct NewUser {
    pub id: u64,
    pub full_name: String,
}

impl MyApi {
    pub async fn profile(&self, _ctx: &Context, params: ProfileParams) -> Result<User, ApiError> {
        if params.login == "bad_user" {
            return Err(ApiError::internal("bad user"));
        }
        if params.login != "rvasily" {
            return Err(ApiError::new(StatusCode::NOT_FOUND, "user not exist"));
        }
        Ok(User {
            login: params.login,
            full_name: "Vasily Romanov".to_string(),
            status: "user".to_string(),
            age: 33,
        })
    }

    pub async fn create(&self, ctx: &Context, params: CreateParams) -> Result<NewUser, ApiError> {
        if ctx.is_cancelled() {
            return Err(ApiError::internal("request cancelled"));
        }
        if params.login == "bad_username" {
            return Err(ApiError::new(StatusCode::CONFLICT, "user bad_username exist"));
        }
        let id = match params.status.as_str() {
            "admin" => 1,
            "moderator" => 2,
            _ => 42,
        };
        Ok(NewUser {
            id: id + params.age as u64,
            full_name: params.name,
        })
    }
}

#[path = "fixtures/my_api_handlers.rs"]
mod handlers;

fn authed(req: Request) -> Request {
    req.with_header(HeaderName::from_static("x-auth"), HeaderValue::from_static("100500"))
}

async fn call(req: Request) -> (StatusCode, Value) {
    let response = MyApi.serve_http(&req).await;
    (response.status(), response.json().unwrap())
}

#[tokio::test]
async fn profile_ok() {
    let (status, body) = call(Request::new(Method::GET, "/user/profile?login=rvasily")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "error": "",
            "response": {"login": "rvasily", "full_name": "Vasily Romanov", "status": "user", "age": 33}
        })
    );
}

#[tokio::test]
async fn profile_accepts_any_method_and_body_values() {
    let req = Request::new(Method::POST, "/user/profile").with_form_body("login=rvasily");
    let (status, _) = call(req).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn required_field_empty() {
    let (status, body) = call(Request::new(Method::GET, "/user/profile")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "login must be not empty"}));
}

#[tokio::test]
async fn business_error_passes_status_through() {
    let (status, body) = call(Request::new(Method::GET, "/user/profile?login=nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "user not exist"}));
}

#[tokio::test]
async fn internal_error_is_500() {
    let (status, body) = call(Request::new(Method::GET, "/user/profile?login=bad_user")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "bad user"}));
}

#[tokio::test]
async fn unknown_path_is_404() {
    for path in ["/user/unknown", "/user/profile/", "/User/profile"] {
        let (status, body) = call(Request::new(Method::GET, path)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body, json!({"error": "unknown method"}));
    }
}

#[tokio::test]
async fn auth_is_checked_before_fields() {
    let req = Request::new(Method::POST, "/user/create").with_header(
        HeaderName::from_static("x-auth"),
        HeaderValue::from_static("123"),
    );
    let (status, body) = call(req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"error": "unauthorized"}));

    let (status, _) = call(Request::new(Method::POST, "/user/create")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn method_is_checked_before_fields() {
    let (status, body) = call(authed(Request::new(Method::GET, "/user/create"))).await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body, json!({"error": "bad method"}));
}

#[tokio::test]
async fn create_validation_order() {
    let cases = [
        ("", "login must be not empty"),
        ("login=short&age=abc", "login len must be >= 10"),
        ("login=mr.moderator&age=abc", "age must be int"),
        ("login=mr.moderator", "age must be int"),
        ("login=mr.moderator&age=-1", "age must be >= 0"),
        ("login=mr.moderator&age=200", "age must be <= 128"),
        ("login=mr.moderator&age=32&status=root", "status must be one of [user, moderator, admin]"),
    ];

    for (form, message) in cases {
        let req = authed(Request::new(Method::POST, "/user/create")).with_form_body(form);
        let (status, body) = call(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{form}");
        assert_eq!(body, json!({ "error": message }), "{form}");
    }
}

#[tokio::test]
async fn create_uses_default_status() {
    let req = authed(Request::new(Method::POST, "/user/create"))
        .with_form_body("login=mr.moderator&age=32&full_name=Ivan");
    let (status, body) = call(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"error": "", "response": {"id": 74, "full_name": "Ivan"}})
    );
}

#[tokio::test]
async fn create_accepts_enum_member() {
    let req = authed(Request::new(Method::POST, "/user/create"))
        .with_form_body("login=mr.moderator&age=32&status=admin");
    let (status, body) = call(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["id"], 33);
}

#[tokio::test]
async fn create_conflict() {
    let req = authed(Request::new(Method::POST, "/user/create"))
        .with_form_body("login=bad_username&age=32");
    let (status, body) = call(req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"error": "user bad_username exist"}));
}

#[tokio::test]
async fn context_reaches_business_method() {
    let (ctx, handle) = Context::with_cancel();
    handle.cancel();
    let req = authed(Request::new(Method::POST, "/user/create"))
        .with_form_body("login=mr.moderator&age=32")
        .with_context(ctx);
    let (status, body) = call(req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "request cancelled"}));
}
