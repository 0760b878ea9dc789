//! Schema discovery and service provider configuration.
//!
//! [`SchemaDiscovery`] is the read side of the gateway: it pairs the immutable
//! [`SchemaRegistry`] with the [`ServiceProviderConfig`] advertised to clients
//! and answers every discovery query from memory. Both halves are validated
//! against each other once, at construction, so nothing inconsistent can be
//! published.
//!
//! # Example
//! ```rust
//! use scim_gateway::SchemaDiscovery;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let discovery = SchemaDiscovery::new()?;
//!
//! let config = discovery.get_service_provider_config();
//! assert!(config.patch.supported);
//!
//! let schemas = discovery.list_schemas();
//! println!("Available schemas: {}", schemas.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{BuildError, BuildResult, ScimResult};
use crate::schema::embedded::SERVICE_PROVIDER_CONFIG_SCHEMA_URI;
use crate::schema::{ResourceMeta, ResourceTypeDefinition, Schema, SchemaRegistry};

use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default upper bound on the number of resources a filtered query returns.
pub const DEFAULT_FILTER_MAX_RESULTS: u32 = 50;

/// Default documentation link advertised in the service provider configuration.
pub const DEFAULT_DOCUMENTATION_URI: &str = "https://www.rfc-editor.org/info/rfc7644";

const DEFAULT_BULK_MAX_OPERATIONS: u32 = 1000;
const DEFAULT_BULK_MAX_PAYLOAD_SIZE: u64 = 1_048_576;

/// Schema discovery component.
///
/// Cloning is cheap: the registry is shared behind an `Arc` and the
/// configuration is small. All operations are pure reads.
#[derive(Debug, Clone)]
pub struct SchemaDiscovery {
    schema_registry: Arc<SchemaRegistry>,
    service_config: Arc<ServiceProviderConfig>,
}

impl SchemaDiscovery {
    /// Create a discovery component from the embedded definitions and the
    /// default service provider configuration.
    pub fn new() -> BuildResult<Self> {
        Self::with_config(SchemaRegistry::new()?, ServiceProviderConfig::default())
    }

    /// Create a discovery component from a registry and a configuration.
    ///
    /// The configuration is validated against the registry and receives its
    /// `meta` block, derived from the registry's base URL.
    pub fn with_config(
        schema_registry: SchemaRegistry,
        mut service_config: ServiceProviderConfig,
    ) -> BuildResult<Self> {
        service_config.normalize();
        service_config.validate(&schema_registry)?;
        service_config.meta = Some(ResourceMeta {
            resource_type: "ServiceProviderConfig".to_string(),
            location: format!("{}/ServiceProviderConfig", schema_registry.base_url()),
        });

        info!(
            "Service provider configuration ready: {} authentication scheme(s), filter maxResults {}",
            service_config.authentication_schemes.len(),
            service_config.filter.max_results
        );

        Ok(Self {
            schema_registry: Arc::new(schema_registry),
            service_config: Arc::new(service_config),
        })
    }

    /// Get the service provider configuration.
    ///
    /// Returns the capabilities and configuration of this SCIM service provider
    /// as defined in RFC 7644. The value never changes after construction.
    pub fn get_service_provider_config(&self) -> &ServiceProviderConfig {
        &self.service_config
    }

    /// Get all available schemas, ordered by identifier.
    pub fn list_schemas(&self) -> Vec<&Schema> {
        self.schema_registry.list_schemas()
    }

    /// Get a specific schema by ID.
    pub fn get_schema(&self, id: &str) -> ScimResult<&Schema> {
        self.schema_registry.get_schema(id)
    }

    /// Get all resource types, ordered by name.
    pub fn list_resource_types(&self) -> Vec<&ResourceTypeDefinition> {
        self.schema_registry.list_resource_types()
    }

    /// Get a resource type by name.
    pub fn get_resource_type(&self, name: &str) -> ScimResult<&ResourceTypeDefinition> {
        self.schema_registry.get_resource_type(name)
    }

    /// Get the schema registry for advanced usage.
    pub fn schema_registry(&self) -> &SchemaRegistry {
        &self.schema_registry
    }
}

/// `{"supported": bool}` capability flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Supported {
    pub supported: bool,
}

impl Supported {
    pub const fn yes() -> Self {
        Self { supported: true }
    }

    pub const fn no() -> Self {
        Self { supported: false }
    }
}

/// Bulk capability and its bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BulkSupport {
    pub supported: bool,
    pub max_operations: u32,
    pub max_payload_size: u64,
}

/// Filter capability and the maximum number of results a query may return.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterSupport {
    pub supported: bool,
    pub max_results: u32,
}

/// Service provider configuration as defined in RFC 7643 section 5.
///
/// Bound fields (`maxOperations`, `maxPayloadSize`, `maxResults`) are always
/// present on the wire and are zero when their feature is unsupported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProviderConfig {
    pub schemas: Vec<String>,

    /// Link to human-readable help for this service provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_uri: Option<String>,

    pub patch: Supported,
    pub bulk: BulkSupport,
    pub filter: FilterSupport,
    pub change_password: Supported,
    pub sort: Supported,
    pub etag: Supported,

    /// Authentication schemes supported
    pub authentication_schemes: Vec<AuthenticationScheme>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResourceMeta>,
}

impl Default for ServiceProviderConfig {
    fn default() -> Self {
        Self {
            schemas: vec![SERVICE_PROVIDER_CONFIG_SCHEMA_URI.to_string()],
            documentation_uri: Some(DEFAULT_DOCUMENTATION_URI.to_string()),
            patch: Supported::yes(),
            bulk: BulkSupport {
                supported: true,
                max_operations: DEFAULT_BULK_MAX_OPERATIONS,
                max_payload_size: DEFAULT_BULK_MAX_PAYLOAD_SIZE,
            },
            filter: FilterSupport {
                supported: true,
                max_results: DEFAULT_FILTER_MAX_RESULTS,
            },
            change_password: Supported::yes(),
            sort: Supported::no(),
            etag: Supported::no(),
            authentication_schemes: vec![AuthenticationScheme::api_key(Some(
                DEFAULT_DOCUMENTATION_URI.to_string(),
            ))],
            meta: None,
        }
    }
}

impl ServiceProviderConfig {
    /// Zero the bounds of unsupported features.
    fn normalize(&mut self) {
        if !self.bulk.supported {
            self.bulk.max_operations = 0;
            self.bulk.max_payload_size = 0;
        }
        if !self.filter.supported {
            self.filter.max_results = 0;
        }
    }

    /// Check the configuration against itself and the registry it describes.
    pub fn validate(&self, registry: &SchemaRegistry) -> BuildResult<()> {
        for schema_id in &self.schemas {
            if !registry.contains_schema(schema_id) {
                return Err(BuildError::UnknownDescriptorSchema {
                    schema_id: schema_id.clone(),
                });
            }
        }

        if self.bulk.supported && (self.bulk.max_operations == 0 || self.bulk.max_payload_size == 0)
        {
            return Err(BuildError::invalid_service_provider_config(
                "bulk.maxOperations and bulk.maxPayloadSize must be positive when bulk is supported",
            ));
        }

        match self
            .authentication_schemes
            .iter()
            .filter(|scheme| scheme.primary)
            .count()
        {
            _ if self.authentication_schemes.is_empty() => {
                Err(BuildError::invalid_service_provider_config(
                    "at least one authentication scheme is required",
                ))
            }
            1 => Ok(()),
            n => Err(BuildError::invalid_service_provider_config(format!(
                "exactly one authentication scheme must be primary, found {}",
                n
            ))),
        }
    }
}

/// Authentication scheme definition for service provider config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationScheme {
    /// Authentication type (e.g., "oauthbearertoken", "httpbasic")
    #[serde(rename = "type")]
    pub auth_type: String,
    /// Authentication scheme name
    pub name: String,
    /// Human-readable description
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_uri: Option<String>,
    /// Whether this scheme is the primary authentication method
    pub primary: bool,
}

impl AuthenticationScheme {
    /// The static API key scheme enforced by [`crate::auth`], marked primary.
    pub fn api_key(documentation_uri: Option<String>) -> Self {
        Self {
            auth_type: "oauthbearertoken".to_string(),
            name: "API Key".to_string(),
            description: "Static API key sent in the X-API-KEY header, raw or as 'Bearer <key>'"
                .to_string(),
            spec_uri: Some("https://www.rfc-editor.org/info/rfc6750".to_string()),
            documentation_uri,
            primary: true,
        }
    }
}
