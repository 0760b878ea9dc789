//! Core operation handler infrastructure
//!
//! This module contains the shared request state, the response types used by
//! every discovery operation and the router that wires the operations behind
//! the authentication gate.

use super::{handlers, middleware};
use crate::auth::ApiKeyAuthenticator;
use crate::schema_discovery::SchemaDiscovery;

use axum::{
    Router,
    http::{HeaderValue, header},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Path prefix all discovery operations are mounted under.
pub const SCIM_PREFIX: &str = "/scim/v2";

/// Media type of every SCIM response body.
pub const SCIM_CONTENT_TYPE: &str = "application/scim+json";

/// Schema URI of list responses.
pub const LIST_RESPONSE_SCHEMA_URI: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

/// The discovery operations, each mounted under [`SCIM_PREFIX`] for `GET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetServiceProviderConfig,
    ListSchemas,
    GetSchema,
    ListResourceTypes,
    GetResourceType,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::GetServiceProviderConfig,
        Operation::ListSchemas,
        Operation::GetSchema,
        Operation::ListResourceTypes,
        Operation::GetResourceType,
    ];

    /// Route pattern relative to [`SCIM_PREFIX`].
    pub fn path(self) -> &'static str {
        match self {
            Operation::GetServiceProviderConfig => "/ServiceProviderConfig",
            Operation::ListSchemas => "/Schemas",
            Operation::GetSchema => "/Schemas/:id",
            Operation::ListResourceTypes => "/ResourceTypes",
            Operation::GetResourceType => "/ResourceTypes/:name",
        }
    }

    fn method_router(self) -> MethodRouter<GatewayState> {
        let route = match self {
            Operation::GetServiceProviderConfig => {
                get(handlers::discovery::get_service_provider_config)
            }
            Operation::ListSchemas => get(handlers::schema::list_schemas),
            Operation::GetSchema => get(handlers::schema::get_schema),
            Operation::ListResourceTypes => get(handlers::discovery::list_resource_types),
            Operation::GetResourceType => get(handlers::discovery::get_resource_type),
        };
        route.fallback(handlers::method_not_allowed)
    }
}

/// Request-scoped view of the gateway: the discovery data and the gate.
///
/// Cloned into every request task; both halves are cheap to clone and
/// read-only.
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub discovery: SchemaDiscovery,
    pub authenticator: ApiKeyAuthenticator,
}

/// HTTP operation handler for the SCIM discovery endpoints.
///
/// Owns the request state and builds the axum [`Router`] serving it. No
/// global state is involved: everything a request needs is passed in here.
#[derive(Debug, Clone)]
pub struct ScimOperationHandler {
    state: GatewayState,
    request_timeout: Option<Duration>,
}

impl ScimOperationHandler {
    /// Create a new operation handler.
    pub fn new(discovery: SchemaDiscovery, authenticator: ApiKeyAuthenticator) -> Self {
        Self {
            state: GatewayState {
                discovery,
                authenticator,
            },
            request_timeout: None,
        }
    }

    /// Bound the time a single request may spend in the handler stack.
    ///
    /// Requests exceeding it are answered with a `408` SCIM error.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Get the request state shared by all operations.
    pub fn state(&self) -> &GatewayState {
        &self.state
    }

    /// Build the router serving every discovery operation.
    ///
    /// Authentication wraps the routes and the fallback, so an
    /// unauthenticated request is rejected before any operation runs. The
    /// request log wraps everything, including the timeout.
    pub fn router(&self) -> Router {
        let operations = Operation::ALL
            .into_iter()
            .fold(Router::new(), |router, operation| {
                info!(
                    "{:?} mounted on GET {}{}",
                    operation,
                    SCIM_PREFIX,
                    operation.path()
                );
                router.route(operation.path(), operation.method_router())
            });

        let router = Router::new()
            .nest(SCIM_PREFIX, operations)
            .fallback(handlers::route_not_found)
            .with_state(self.state.clone())
            .layer(axum_middleware::from_fn_with_state(
                self.state.clone(),
                middleware::require_api_key,
            ));

        let router = match self.request_timeout {
            Some(timeout) => bound_request_time(router, timeout),
            None => router,
        };

        router.layer(axum_middleware::from_fn(middleware::log_requests))
    }
}

/// Answer requests still running after `timeout` with a SCIM `408`.
fn bound_request_time(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::new(timeout))
        .layer(axum_middleware::map_response_with_state(
            timeout,
            middleware::timeout_envelope,
        ))
}

/// JSON response with the `application/scim+json` content type.
#[derive(Debug, Clone)]
pub struct ScimJson<T>(pub T);

impl<T: Serialize> IntoResponse for ScimJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static(SCIM_CONTENT_TYPE))],
                body,
            )
                .into_response(),
            Err(e) => crate::error::ScimError::from(e).into_response(),
        }
    }
}

/// Pagination parameters accepted by the list operations.
///
/// Both are optional. `startIndex` is 1-based and values below 1 are treated
/// as 1; a negative `count` is treated as 0.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub start_index: Option<i64>,
    pub count: Option<i64>,
}

/// SCIM list response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub schemas: Vec<String>,
    pub total_results: usize,
    pub items_per_page: usize,
    pub start_index: usize,
    #[serde(rename = "Resources")]
    pub resources: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Page through `items` according to `query`.
    ///
    /// `totalResults` is always the number of items before paging.
    pub fn paginate(items: Vec<T>, query: &ListQuery) -> Self {
        let total_results = items.len();
        let start_index = query.start_index.unwrap_or(1).max(1);
        let count = query
            .count
            .map(|count| usize::try_from(count.max(0)).unwrap_or(usize::MAX))
            .unwrap_or(total_results);
        let skip = usize::try_from(start_index - 1).unwrap_or(usize::MAX);

        let resources: Vec<T> = items.into_iter().skip(skip).take(count).collect();

        Self {
            schemas: vec![LIST_RESPONSE_SCHEMA_URI.to_string()],
            total_results,
            items_per_page: resources.len(),
            start_index: usize::try_from(start_index).unwrap_or(usize::MAX),
            resources,
        }
    }
}
