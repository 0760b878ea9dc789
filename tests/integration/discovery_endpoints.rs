//! Discovery operations through the router.

use crate::common::{TEST_API_KEY, app, assert_error_envelope, get_authenticated, send};
use axum::http::{Method, StatusCode};
use scim_gateway::auth::{ApiKeyAuthenticator, AuthConfig};
use scim_gateway::schema_discovery::ServiceProviderConfig;
use scim_gateway::{SchemaDiscovery, SchemaRegistry, ScimOperationHandler};
use serde_json::json;

const USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";

#[tokio::test]
async fn test_service_provider_config() {
    let response = get_authenticated(app(), "/scim/v2/ServiceProviderConfig").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type(), Some("application/scim+json"));

    let body = response.json();
    assert_eq!(body["patch"], json!({"supported": true}));
    assert_eq!(body["bulk"]["supported"], true);
    assert_eq!(body["filter"], json!({"supported": true, "maxResults": 50}));
    assert_eq!(body["changePassword"], json!({"supported": true}));
    assert_eq!(body["sort"], json!({"supported": false}));
    assert_eq!(body["etag"], json!({"supported": false}));
    assert_eq!(
        body["schemas"],
        json!(["urn:ietf:params:scim:schemas:core:2.0:ServiceProviderConfig"])
    );

    let schemes = body["authenticationSchemes"].as_array().unwrap();
    assert!(!schemes.is_empty());
    assert_eq!(
        schemes
            .iter()
            .filter(|scheme| scheme["primary"] == true)
            .count(),
        1
    );
}

#[tokio::test]
async fn test_service_provider_config_is_byte_identical() {
    let app = app();
    let first = get_authenticated(app.clone(), "/scim/v2/ServiceProviderConfig").await;
    let second = get_authenticated(app, "/scim/v2/ServiceProviderConfig").await;
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_list_schemas() {
    let response = get_authenticated(app(), "/scim/v2/Schemas").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(
        body["schemas"],
        json!(["urn:ietf:params:scim:api:messages:2.0:ListResponse"])
    );

    let resources = body["Resources"].as_array().unwrap();
    assert_eq!(resources.len(), 6);
    assert_eq!(body["totalResults"], resources.len());
    assert_eq!(body["itemsPerPage"], resources.len());
    assert_eq!(body["startIndex"], 1);

    let ids: Vec<&str> = resources
        .iter()
        .map(|schema| schema["id"].as_str().unwrap())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn test_get_schema_matches_list_entry() {
    let app = app();
    let list = get_authenticated(app.clone(), "/scim/v2/Schemas").await.json();

    for entry in list["Resources"].as_array().unwrap() {
        let id = entry["id"].as_str().unwrap();
        let single = get_authenticated(app.clone(), &format!("/scim/v2/Schemas/{}", id)).await;
        assert_eq!(single.status, StatusCode::OK, "{}", id);
        assert_eq!(&single.json(), entry, "{}", id);
    }
}

#[tokio::test]
async fn test_get_user_schema() {
    let response =
        get_authenticated(app(), &format!("/scim/v2/Schemas/{}", USER_SCHEMA)).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["name"], "User");
    assert_eq!(body["meta"]["resourceType"], "Schema");
    assert_eq!(
        body["meta"]["location"],
        format!("http://localhost:8080/scim/v2/Schemas/{}", USER_SCHEMA)
    );

    let user_name = body["attributes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|attr| attr["name"] == "userName")
        .unwrap();
    assert_eq!(user_name["required"], true);
    assert_eq!(user_name["multiValued"], false);
    assert_eq!(user_name["caseExact"], false);
}

#[tokio::test]
async fn test_unknown_schema_is_not_found() {
    let response = get_authenticated(app(), "/scim/v2/Schemas/urn:unknown").await;
    assert_error_envelope(&response, StatusCode::NOT_FOUND, "notFound");
    assert!(
        response.json()["detail"]
            .as_str()
            .unwrap()
            .contains("urn:unknown")
    );
}

#[tokio::test]
async fn test_list_resource_types() {
    let response = get_authenticated(app(), "/scim/v2/ResourceTypes").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["totalResults"], 2);
    let names: Vec<&str> = body["Resources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|rt| rt["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Group", "User"]);

    let user = &body["Resources"][1];
    assert_eq!(user["endpoint"], "/Users");
    assert_eq!(user["schema"], USER_SCHEMA);
    assert_eq!(
        user["schemaExtensions"][0]["schema"],
        "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User"
    );
    assert_eq!(user["meta"]["resourceType"], "ResourceType");
}

#[tokio::test]
async fn test_get_resource_type() {
    let app = app();
    let group = get_authenticated(app.clone(), "/scim/v2/ResourceTypes/Group").await;
    assert_eq!(group.status, StatusCode::OK);
    assert_eq!(group.json()["endpoint"], "/Groups");

    let missing = get_authenticated(app, "/scim/v2/ResourceTypes/Device").await;
    assert_error_envelope(&missing, StatusCode::NOT_FOUND, "notFound");
}

#[tokio::test]
async fn test_pagination() {
    let response = get_authenticated(app(), "/scim/v2/Schemas?startIndex=2&count=3").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["totalResults"], 6);
    assert_eq!(body["itemsPerPage"], 3);
    assert_eq!(body["startIndex"], 2);
    assert_eq!(body["Resources"].as_array().unwrap().len(), 3);

    let empty = get_authenticated(app(), "/scim/v2/ResourceTypes?count=0").await.json();
    assert_eq!(empty["totalResults"], 2);
    assert_eq!(empty["Resources"], json!([]));
}

#[tokio::test]
async fn test_malformed_pagination_is_rejected() {
    let response = get_authenticated(app(), "/scim/v2/Schemas?count=many").await;
    assert_error_envelope(&response, StatusCode::BAD_REQUEST, "invalidValue");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = get_authenticated(app(), "/scim/v2/Users").await;
    assert_error_envelope(&response, StatusCode::NOT_FOUND, "notFound");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let response = get_authenticated(app(), "/scim/v2/Schemas").await;
    let request_id = response
        .headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_write_methods_are_not_allowed() {
    for (method, path) in [
        (Method::POST, "/scim/v2/Schemas"),
        (Method::PUT, "/scim/v2/ServiceProviderConfig"),
        (Method::DELETE, "/scim/v2/ResourceTypes/User"),
        (Method::PATCH, "/scim/v2/Schemas/urn:ietf:params:scim:schemas:core:2.0:User"),
    ] {
        let response = send(app(), method.clone(), path, Some(TEST_API_KEY)).await;
        assert_error_envelope(&response, StatusCode::METHOD_NOT_ALLOWED, "methodNotAllowed");
        assert_eq!(
            response.headers.get("allow").and_then(|v| v.to_str().ok()),
            Some("GET, HEAD"),
            "{} {}",
            method,
            path
        );
    }
}

#[tokio::test]
async fn test_write_methods_still_require_a_key() {
    let response = send(app(), Method::POST, "/scim/v2/Schemas", None).await;
    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "unauthenticated");
}

#[tokio::test]
async fn test_undecodable_path_segment_is_rejected() {
    for path in ["/scim/v2/Schemas/%FF", "/scim/v2/ResourceTypes/%C3%28"] {
        let response = get_authenticated(app(), path).await;
        assert_error_envelope(&response, StatusCode::BAD_REQUEST, "invalidValue");
    }
}

#[tokio::test]
async fn test_uri_schema_is_reachable_at_its_meta_location() {
    let schema_id = "https://schemas.example.com/scim/Device?v=1";
    let document = json!({
        "id": schema_id,
        "name": "Device",
        "attributes": [{"name": "serialNumber", "type": "string"}]
    });
    let registry = SchemaRegistry::builder()
        .base_url("http://localhost:8080/scim/v2")
        .with_embedded_definitions()
        .schema_json("device", &document.to_string())
        .build()
        .unwrap();
    let discovery =
        SchemaDiscovery::with_config(registry, ServiceProviderConfig::default()).unwrap();
    let app = ScimOperationHandler::new(
        discovery,
        ApiKeyAuthenticator::new(&AuthConfig::new(TEST_API_KEY).unwrap()),
    )
    .router();

    let listed = get_authenticated(app.clone(), "/scim/v2/Schemas").await.json();
    let location = listed["Resources"]
        .as_array()
        .unwrap()
        .iter()
        .find(|schema| schema["id"] == schema_id)
        .and_then(|schema| schema["meta"]["location"].as_str())
        .unwrap()
        .to_string();
    let path = location.strip_prefix("http://localhost:8080").unwrap();

    let response = get_authenticated(app, path).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["id"], schema_id);
}
