//! # apigen runtime
//!
//! Request, response, error and context types that apigen-generated
//! handlers are written against. Adapting a concrete HTTP server to
//! [`Request`] and [`Response`] is left to the host application;
//! [`Request::from_http`] and [`Response::into_http`] cover the `http` crate
//! types.

mod context;
mod error;
mod request;
mod response;

pub use http;

pub use context::{CancelHandle, Context};
pub use error::ApiError;
pub use request::Request;
pub use response::Response;
