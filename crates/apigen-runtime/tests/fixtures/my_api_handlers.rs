// Code generated by apigen from api.rs. DO NOT EDIT.
#![allow(unused_comparisons)]

use apigen_runtime::http::StatusCode;
use apigen_runtime::{ApiError, Request, Response};

use super::*;

const UNKNOWN_METHOD_RESPONSE: &str = "{\"error\":\"unknown method\"}";

const UNAUTHORIZED_RESPONSE: &str = "{\"error\":\"unauthorized\"}";
const BAD_METHOD_RESPONSE: &str = "{\"error\":\"bad method\"}";

impl MyApi {
    /// Serves `/user/profile` by calling `MyApi::profile`.
    pub async fn handler_profile(&self, req: &Request) -> Response {
        let raw_login = req.form_value("login");
        if raw_login.is_empty() {
            return Response::payload(StatusCode::BAD_REQUEST, LOGIN_EMPTY_MY_API);
        }
        let param_login = raw_login.to_string();

        let params = ProfileParams {
            login: param_login,
        };
        let result = self.profile(req.context(), params).await.map_err(ApiError::from);
        match result {
            Ok(response) => Response::ok(&response),
            Err(ApiError::Api { status, message }) => Response::error(status, &message),
            Err(ApiError::Internal(message)) => {
                Response::error(StatusCode::INTERNAL_SERVER_ERROR, &message)
            }
        }
    }

    /// Serves `/user/create` by calling `MyApi::create`.
    pub async fn handler_create(&self, req: &Request) -> Response {
        if req.header("X-Auth") != Some("100500") {
            return Response::payload(StatusCode::FORBIDDEN, UNAUTHORIZED_RESPONSE);
        }
        if req.method() != "POST" {
            return Response::payload(StatusCode::NOT_ACCEPTABLE, BAD_METHOD_RESPONSE);
        }

        let raw_login = req.form_value("login");
        if raw_login.is_empty() {
            return Response::payload(StatusCode::BAD_REQUEST, LOGIN_EMPTY_MY_API);
        }
        let param_login = raw_login.to_string();
        if param_login.chars().count() < 10 {
            return Response::payload(StatusCode::BAD_REQUEST, LOGIN_MIN_MY_API);
        }

        let raw_name = req.form_value("full_name");
        let param_name = raw_name.to_string();

        let raw_status = req.form_value("status");
        let param_status = if raw_status.is_empty() { "user".to_string() } else { raw_status.to_string() };
        if !["user", "moderator", "admin"].contains(&param_status.as_str()) {
            return Response::payload(StatusCode::BAD_REQUEST, STATUS_ENUM_MY_API);
        }

        let raw_age = req.form_value("age");
        let param_age: i64 = match raw_age.parse::<i64>() {
            Ok(value) => value,
            Err(_) => return Response::payload(StatusCode::BAD_REQUEST, AGE_INT_MY_API),
        };
        if param_age < 0 {
            return Response::payload(StatusCode::BAD_REQUEST, AGE_MIN_MY_API);
        }
        if param_age > 128 {
            return Response::payload(StatusCode::BAD_REQUEST, AGE_MAX_MY_API);
        }

        let params = CreateParams {
            login: param_login,
            name: param_name,
            status: param_status,
            age: param_age,
        };
        let result = self.create(req.context(), params).await.map_err(ApiError::from);
        match result {
            Ok(response) => Response::ok(&response),
            Err(ApiError::Api { status, message }) => Response::error(status, &message),
            Err(ApiError::Internal(message)) => {
                Response::error(StatusCode::INTERNAL_SERVER_ERROR, &message)
            }
        }
    }
}

const AGE_INT_MY_API: &str = "{\"error\":\"age must be int\"}";
const AGE_MAX_MY_API: &str = "{\"error\":\"age must be <= 128\"}";
const AGE_MIN_MY_API: &str = "{\"error\":\"age must be >= 0\"}";
const LOGIN_EMPTY_MY_API: &str = "{\"error\":\"login must be not empty\"}";
const LOGIN_MIN_MY_API: &str = "{\"error\":\"login len must be >= 10\"}";
const STATUS_ENUM_MY_API: &str = "{\"error\":\"status must be one of [user, moderator, admin]\"}";

impl MyApi {
    pub async fn serve_http(&self, req: &Request) -> Response {
        match req.path() {
            "/user/profile" => self.handler_profile(req).await,
            "/user/create" => self.handler_create(req).await,
            _ => Response::payload(StatusCode::NOT_FOUND, UNKNOWN_METHOD_RESPONSE),
        }
    }
}
