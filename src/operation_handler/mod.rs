//! HTTP operation handler for the SCIM discovery endpoints.
//!
//! Every request passes the API key gate first and is then routed to one of
//! the read-only discovery operations:
//!
//! | Operation | Route |
//! |-----------|-------|
//! | Get service provider config | `GET /scim/v2/ServiceProviderConfig` |
//! | List schemas | `GET /scim/v2/Schemas` |
//! | Get schema | `GET /scim/v2/Schemas/{id}` |
//! | List resource types | `GET /scim/v2/ResourceTypes` |
//! | Get resource type | `GET /scim/v2/ResourceTypes/{name}` |
//!
//! Other methods on these routes get a SCIM 405. Successful bodies and error
//! envelopes are both `application/scim+json`.
//!
//! # Examples
//!
//! ```rust
//! use scim_gateway::auth::{ApiKeyAuthenticator, AuthConfig};
//! use scim_gateway::operation_handler::ScimOperationHandler;
//! use scim_gateway::SchemaDiscovery;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = ScimOperationHandler::new(
//!     SchemaDiscovery::new()?,
//!     ApiKeyAuthenticator::new(&AuthConfig::new("s3cret")?),
//! );
//! let app: axum::Router = handler.router();
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

mod core;
mod errors;
mod handlers;
mod middleware;

// Re-export all public types and functions
pub use self::core::{
    GatewayState, LIST_RESPONSE_SCHEMA_URI, ListQuery, ListResponse, Operation,
    SCIM_CONTENT_TYPE, SCIM_PREFIX, ScimJson, ScimOperationHandler,
};

// Re-export error utilities for advanced usage
pub use errors::{ERROR_SCHEMA_URI, ScimErrorResponse, create_error_response};

pub use middleware::X_REQUEST_ID;
