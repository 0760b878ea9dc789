//! Schema definitions and the immutable schema registry.
//!
//! This module implements the RFC 7643 discovery catalog: attribute and schema
//! definitions, resource types, the embedded core definitions and the rules a
//! definition must satisfy before it can be published.
//!
//! # Key Types
//!
//! - [`Schema`] - SCIM schema definition with attributes and metadata
//! - [`SchemaRegistry`] - Read-only catalog of schemas and resource types
//! - [`AttributeDefinition`] - Individual attribute characteristics
//! - [`ResourceTypeDefinition`] - Schema-backed entity class and its endpoint
//!
//! # Examples
//!
//! ```rust
//! use scim_gateway::schema::SchemaRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let user = registry.get_schema("urn:ietf:params:scim:schemas:core:2.0:User")?;
//! assert_eq!(user.name, "User");
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod registry;
pub mod types;
pub mod validation;


// Re-export the main types for convenience
pub use registry::{DEFAULT_BASE_URL, SchemaRegistry, SchemaRegistryBuilder};
pub use types::{
    AttributeDefinition, AttributeType, Mutability, ResourceMeta, ResourceTypeDefinition,
    Returned, Schema, SchemaExtension, Uniqueness,
};
