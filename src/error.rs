//! Error types for SCIM gateway operations.
//!
//! Errors are split by the phase in which they can occur:
//!
//! * [`ScimError`] - request-scoped failures, turned into SCIM error responses
//!   by the operation handler and never fatal to the process
//! * [`BuildError`] - invalid static definitions or configuration, fatal before
//!   the listener starts
//! * [`ServerError`] - listener and shutdown failures owned by the lifecycle
//!   manager
//!
//! Every error reports a stable [`ErrorKind`] tag which is what clients see in
//! the `kind` field of an error envelope and what the process logs on exit.

use crate::auth::AuthenticationError;
use std::fmt;
use std::time::Duration;

/// Stable, wire-visible classification of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or non-matching API key
    Unauthenticated,
    /// Unknown schema, resource type or route
    NotFound,
    /// Malformed request parameter
    InvalidValue,
    /// Path exists but does not support the request method
    MethodNotAllowed,
    /// Request did not complete within the per-request time limit
    RequestTimeout,
    /// Unexpected failure while producing a response
    Internal,
    /// Invalid static definitions or configuration
    Misconfigured,
    /// Listener could not bind or serve
    ListenFailure,
    /// Graceful shutdown exceeded its grace period
    ShutdownTimeout,
}

impl ErrorKind {
    /// Tag used in error envelopes and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::NotFound => "notFound",
            ErrorKind::InvalidValue => "invalidValue",
            ErrorKind::MethodNotAllowed => "methodNotAllowed",
            ErrorKind::RequestTimeout => "requestTimeout",
            ErrorKind::Internal => "internal",
            ErrorKind::Misconfigured => "misconfigured",
            ErrorKind::ListenFailure => "listenFailure",
            ErrorKind::ShutdownTimeout => "shutdownTimeout",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request-scoped errors raised while dispatching a discovery operation.
#[derive(Debug, thiserror::Error)]
pub enum ScimError {
    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Unauthenticated(#[from] AuthenticationError),

    /// Schema not found errors
    #[error("Schema not found: {schema_id}")]
    SchemaNotFound { schema_id: String },

    /// Resource type not found errors
    #[error("Resource type not found: {name}")]
    ResourceTypeNotFound { name: String },

    /// No operation is mounted at the requested path
    #[error("No SCIM endpoint at {path}")]
    RouteNotFound { path: String },

    /// A query parameter could not be parsed
    #[error("Invalid query parameter: {message}")]
    InvalidQuery { message: String },

    /// A path segment could not be decoded
    #[error("Invalid path parameter: {message}")]
    InvalidPath { message: String },

    /// Discovery endpoints are read-only
    #[error("Method {method} is not supported on {path}")]
    MethodNotAllowed { method: String, path: String },

    /// The request exceeded the per-request time limit
    #[error("Request did not complete within {timeout:?}")]
    RequestTimeout { timeout: Duration },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ScimError {
    /// Create a schema not found error
    pub fn schema_not_found(schema_id: impl Into<String>) -> Self {
        Self::SchemaNotFound {
            schema_id: schema_id.into(),
        }
    }

    /// Create a resource type not found error
    pub fn resource_type_not_found(name: impl Into<String>) -> Self {
        Self::ResourceTypeNotFound { name: name.into() }
    }

    /// Create a route not found error
    pub fn route_not_found(path: impl Into<String>) -> Self {
        Self::RouteNotFound { path: path.into() }
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScimError::Unauthenticated(_) => ErrorKind::Unauthenticated,
            ScimError::SchemaNotFound { .. }
            | ScimError::ResourceTypeNotFound { .. }
            | ScimError::RouteNotFound { .. } => ErrorKind::NotFound,
            ScimError::InvalidQuery { .. } | ScimError::InvalidPath { .. } => {
                ErrorKind::InvalidValue
            }
            ScimError::MethodNotAllowed { .. } => ErrorKind::MethodNotAllowed,
            ScimError::RequestTimeout { .. } => ErrorKind::RequestTimeout,
            ScimError::Json(_) | ScimError::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Errors that can occur while building the registry, the service provider
/// configuration or the gateway configuration.
///
/// These surface before any connection is accepted and stop the process.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Schema loading failed
    #[error("Failed to load schema {source_name}: {message}")]
    SchemaLoadError {
        source_name: String,
        message: String,
    },

    /// A schema or attribute definition breaks a definition rule
    #[error("Invalid definition for schema '{schema_id}': {message}")]
    InvalidSchemaDefinition { schema_id: String, message: String },

    /// Two schemas were registered under the same identifier
    #[error("Duplicate schema identifier: {schema_id}")]
    DuplicateSchema { schema_id: String },

    /// A resource type refers to a schema the registry does not hold
    #[error("Resource type '{resource_type}' references unknown schema '{schema_id}'")]
    UnknownResourceTypeSchema {
        resource_type: String,
        schema_id: String,
    },

    /// The service provider configuration lists a schema the registry does not hold
    #[error("Service provider configuration references unknown schema '{schema_id}'")]
    UnknownDescriptorSchema { schema_id: String },

    /// The service provider configuration is internally inconsistent
    #[error("Invalid service provider configuration: {message}")]
    InvalidServiceProviderConfig { message: String },

    /// The API key secret is empty
    #[error("API key secret must not be empty")]
    EmptyApiKey,
}

impl BuildError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an invalid schema definition error
    pub fn invalid_definition(schema_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchemaDefinition {
            schema_id: schema_id.into(),
            message: message.into(),
        }
    }

    /// Create an invalid service provider configuration error
    pub fn invalid_service_provider_config(message: impl Into<String>) -> Self {
        Self::InvalidServiceProviderConfig {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Misconfigured
    }
}

/// Errors raised by the lifecycle manager.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Binding or serving the listener failed
    #[error("Listener failure on {address}: {source}")]
    ListenFailure {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// In-flight requests did not drain within the grace period
    #[error("Graceful shutdown did not complete within {grace_period:?}")]
    ShutdownTimeout { grace_period: Duration },
}

impl ServerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServerError::ListenFailure { .. } => ErrorKind::ListenFailure,
            ServerError::ShutdownTimeout { .. } => ErrorKind::ShutdownTimeout,
        }
    }
}

// Result type aliases for convenience
pub type ScimResult<T> = Result<T, ScimError>;
pub type BuildResult<T> = Result<T, BuildError>;
pub type ServerResult<T> = Result<T, ServerError>;
