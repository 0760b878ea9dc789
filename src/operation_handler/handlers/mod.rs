//! Operation handlers
//!
//! One axum handler per discovery operation, grouped by what they serve.

pub mod discovery;
pub mod schema;

use crate::error::ScimError;
use axum::extract::rejection::PathRejection;
use axum::http::{HeaderValue, Method, Uri, header};
use axum::response::IntoResponse;

/// Methods every discovery route answers.
const ALLOWED_METHODS: &str = "GET, HEAD";

/// Answer any path no operation is mounted at with a SCIM 404.
pub async fn route_not_found(uri: Uri) -> ScimError {
    ScimError::route_not_found(uri.path())
}

/// Answer a non-GET request on a discovery route with a SCIM 405.
pub async fn method_not_allowed(method: Method, uri: Uri) -> impl IntoResponse {
    (
        [(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS))],
        ScimError::MethodNotAllowed {
            method: method.to_string(),
            path: uri.path().to_string(),
        },
    )
}

pub(crate) fn invalid_path(rejection: PathRejection) -> ScimError {
    ScimError::InvalidPath {
        message: rejection.body_text(),
    }
}
