//! SCIM 2.0 discovery gateway.
//!
//! Advertises what a backing identity directory supports, ahead of any
//! provisioning traffic: the attribute schemas, the resource types and the
//! optional protocol features (filter, patch, bulk, sort, etag, password
//! change), together with the accepted authentication schemes. Every call is
//! gated behind a static API key.
//!
//! # Core Components
//!
//! - [`SchemaRegistry`] - Immutable catalog of schemas and resource types
//! - [`SchemaDiscovery`] - Registry plus the service provider configuration
//! - [`auth::ApiKeyAuthenticator`] - Constant-time API key gate
//! - [`ScimOperationHandler`] - axum router for the discovery endpoints
//! - [`GatewayServer`] - Listener lifecycle with bounded graceful shutdown
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scim_gateway::{GatewayConfig, GatewayServer, ScimOperationHandler};
//! use scim_gateway::auth::ApiKeyAuthenticator;
//! use scim_gateway::server::termination_signal;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::from_env()?;
//! let handler = ScimOperationHandler::new(
//!     config.discovery.build()?,
//!     ApiKeyAuthenticator::new(&config.auth),
//! )
//! .with_request_timeout(config.server.request_timeout());
//!
//! let mut server = GatewayServer::new(config.server.clone(), handler.router());
//! server.listen_and_serve();
//! server.shutdown(termination_signal()).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod operation_handler;
pub mod schema;
pub mod schema_discovery;
pub mod server;

// Re-export commonly used types for convenience
pub use config::GatewayConfig;
pub use error::{BuildError, ErrorKind, ScimError, ScimResult, ServerError};
pub use operation_handler::ScimOperationHandler;
pub use schema::{Schema, SchemaRegistry};
pub use schema_discovery::{AuthenticationScheme, SchemaDiscovery, ServiceProviderConfig};
pub use server::GatewayServer;
