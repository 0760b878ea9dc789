//! The API key gate in front of every route.

use crate::common::{TEST_API_KEY, app, assert_error_envelope, get};
use axum::http::StatusCode;

const ENDPOINTS: [&str; 6] = [
    "/scim/v2/ServiceProviderConfig",
    "/scim/v2/Schemas",
    "/scim/v2/Schemas/urn:ietf:params:scim:schemas:core:2.0:User",
    "/scim/v2/ResourceTypes",
    "/scim/v2/ResourceTypes/User",
    "/scim/v2/NoSuchEndpoint",
];

#[tokio::test]
async fn test_missing_key_is_rejected_everywhere() {
    for endpoint in ENDPOINTS {
        let response = get(app(), endpoint, None).await;
        assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "unauthenticated");
    }
}

#[tokio::test]
async fn test_wrong_key_is_rejected_everywhere() {
    for endpoint in ENDPOINTS {
        for key in ["wrong", "", "Bearer wrong", "test-key-012345678", "TEST-KEY-0123456789"] {
            let response = get(app(), endpoint, Some(key)).await;
            assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{} {:?}", endpoint, key);
        }
    }
}

#[tokio::test]
async fn test_invalid_key_on_schemas_returns_only_the_error_envelope() {
    let response = get(app(), "/scim/v2/Schemas", Some("not-the-key")).await;
    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "unauthenticated");

    let body = response.json();
    let mut fields: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    fields.sort();
    assert_eq!(fields, vec!["detail", "kind", "schemas", "status"]);
}

#[tokio::test]
async fn test_keys_never_appear_in_responses() {
    let response = get(app(), "/scim/v2/Schemas", Some("presented-guess")).await;
    let body = String::from_utf8(response.body).unwrap();
    assert!(!body.contains(TEST_API_KEY));
    assert!(!body.contains("presented-guess"));
}

#[tokio::test]
async fn test_raw_and_bearer_forms_are_accepted() {
    let raw = get(app(), "/scim/v2/Schemas", Some(TEST_API_KEY)).await;
    assert_eq!(raw.status, StatusCode::OK);

    let bearer = format!("Bearer {}", TEST_API_KEY);
    let bearer = get(app(), "/scim/v2/Schemas", Some(&bearer)).await;
    assert_eq!(bearer.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_requires_authentication_first() {
    let response = get(app(), "/totally/elsewhere", Some("wrong")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = get(app(), "/totally/elsewhere", Some(TEST_API_KEY)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
