//! Common test utilities for driving the gateway in-process.

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use scim_gateway::auth::{API_KEY_HEADER, ApiKeyAuthenticator, AuthConfig};
use scim_gateway::{SchemaDiscovery, ScimOperationHandler};
use serde_json::Value;
use tower::ServiceExt as _;

pub const TEST_API_KEY: &str = "test-key-0123456789";

/// Operation handler over the embedded definitions, guarded by [`TEST_API_KEY`].
pub fn handler() -> ScimOperationHandler {
    ScimOperationHandler::new(
        SchemaDiscovery::new().expect("embedded definitions are valid"),
        ApiKeyAuthenticator::new(&AuthConfig::new(TEST_API_KEY).unwrap()),
    )
}

pub fn app() -> Router {
    handler().router()
}

/// A response read to completion.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
    }
}

/// Send `GET path` with an optional `X-API-KEY` header value.
pub async fn get(app: Router, path: &str, api_key: Option<&str>) -> TestResponse {
    send(app, Method::GET, path, api_key).await
}

/// Send a bodiless request with an optional `X-API-KEY` header value.
pub async fn send(app: Router, method: Method, path: &str, api_key: Option<&str>) -> TestResponse {
    let mut request = Request::builder().method(method).uri(path);
    if let Some(key) = api_key {
        request = request.header(API_KEY_HEADER, key);
    }
    let request = request.body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Send an authenticated `GET path`.
pub async fn get_authenticated(app: Router, path: &str) -> TestResponse {
    get(app, path, Some(TEST_API_KEY)).await
}

/// Assert that `response` is a SCIM error envelope with the given status.
pub fn assert_error_envelope(response: &TestResponse, status: StatusCode, kind: &str) {
    assert_eq!(response.status, status);
    assert_eq!(response.content_type(), Some("application/scim+json"));

    let body = response.json();
    assert_eq!(
        body["schemas"],
        serde_json::json!(["urn:ietf:params:scim:api:messages:2.0:Error"])
    );
    assert_eq!(body["status"], status.as_u16().to_string());
    assert_eq!(body["kind"], kind);
    assert!(body["detail"].is_string());
    assert!(body.get("Resources").is_none());
}
