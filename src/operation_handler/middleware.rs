//! Request middleware: API key gate and request logging.

use super::core::GatewayState;
use crate::auth::{API_KEY_HEADER, AuthenticationError};
use crate::error::ScimError;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::{Level, debug, log, warn};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Request ID header name
pub const X_REQUEST_ID: &str = "x-request-id";

/// Replace the empty `408` of the timeout layer with a SCIM error envelope.
pub async fn timeout_envelope(State(timeout): State<Duration>, response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        warn!("Request exceeded the {:?} time limit", timeout);
        return ScimError::RequestTimeout { timeout }.into_response();
    }
    response
}

/// Reject the request unless it carries the configured API key.
///
/// On success the [`Principal`](crate::auth::Principal) is stored in the
/// request extensions for the operations to use.
pub async fn require_api_key(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = match request.headers().get(API_KEY_HEADER) {
        None => state.authenticator.authenticate(None),
        // Not visible ASCII, so it cannot be the configured key.
        Some(value) => match value.to_str() {
            Ok(value) => state.authenticator.authenticate(Some(value)),
            Err(_) => Err(AuthenticationError::InvalidCredential),
        },
    };

    match outcome {
        Ok(principal) => {
            debug!(
                "Authenticated {} {} with key {}",
                request.method(),
                request.uri().path(),
                principal.fingerprint()
            );
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => {
            warn!(
                "Rejected {} {}: {}",
                request.method(),
                request.uri().path(),
                e
            );
            ScimError::from(e).into_response()
        }
    }
}

/// Log every request with its method, path, status and latency.
///
/// A request id is taken from `x-request-id` when the client sends a valid
/// UUID, generated otherwise, and echoed on the response.
pub async fn log_requests(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    request.extensions_mut().insert(request_id);

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let mut response = next.run(request).await;

    let status = response.status();
    let level = match status.as_u16() {
        500..=599 => Level::Error,
        400..=499 => Level::Warn,
        _ => Level::Info,
    };
    log!(
        level,
        "request_id={} method={} path={} status={} duration_ms={}",
        request_id,
        method,
        path,
        status.as_u16(),
        start.elapsed().as_millis()
    );

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}
