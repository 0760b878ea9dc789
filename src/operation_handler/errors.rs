//! SCIM error envelope
//!
//! Every request-scoped failure is rendered as an RFC 7644 section 3.12 error
//! response. The `detail` text comes from the error's `Display` output, which
//! never contains the configured or the presented API key.

use super::core::SCIM_CONTENT_TYPE;
use crate::error::ScimError;
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use log::error;
use serde::{Deserialize, Serialize};

/// Schema URI of SCIM error responses.
pub const ERROR_SCHEMA_URI: &str = "urn:ietf:params:scim:api:messages:2.0:Error";

/// Body of a SCIM error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScimErrorResponse {
    pub schemas: Vec<String>,
    /// HTTP status code, serialized as a string as RFC 7644 requires
    pub status: String,
    pub detail: String,
    /// Stable error classification tag
    pub kind: String,
}

impl ScimError {
    /// HTTP status code reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScimError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ScimError::SchemaNotFound { .. }
            | ScimError::ResourceTypeNotFound { .. }
            | ScimError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ScimError::InvalidQuery { .. } | ScimError::InvalidPath { .. } => {
                StatusCode::BAD_REQUEST
            }
            ScimError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ScimError::RequestTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ScimError::Json(_) | ScimError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Build the error envelope for an error.
pub fn create_error_response(error: &ScimError) -> ScimErrorResponse {
    ScimErrorResponse {
        schemas: vec![ERROR_SCHEMA_URI.to_string()],
        status: error.status_code().as_u16().to_string(),
        detail: error.to_string(),
        kind: error.kind().as_str().to_string(),
    }
}

impl IntoResponse for ScimError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Discovery request failed: {}", self);
        }

        let body = match serde_json::to_vec(&create_error_response(&self)) {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to serialize error envelope: {}", e);
                return status.into_response();
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(SCIM_CONTENT_TYPE))],
            body,
        )
            .into_response()
    }
}
