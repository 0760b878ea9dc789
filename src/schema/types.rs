//! Core schema type definitions for SCIM discovery.
//!
//! This module contains the data structures that describe SCIM schemas,
//! attribute definitions, resource types and their characteristics as specified
//! in RFC 7643 sections 6 and 7. Field names serialize to the exact wire names
//! SCIM clients expect.

use serde::{Deserialize, Serialize};

/// Schema URI carried by every schema representation.
pub const SCHEMA_SCHEMA_URI: &str = "urn:ietf:params:scim:schemas:core:2.0:Schema";

/// Schema URI carried by every resource type representation.
pub const RESOURCE_TYPE_SCHEMA_URI: &str = "urn:ietf:params:scim:schemas:core:2.0:ResourceType";

/// A SCIM schema definition.
///
/// Represents a complete schema with its metadata and attribute definitions.
/// The identifier is the primary key clients use to fetch a single schema and
/// never changes once published.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    /// Schemas describing this representation
    #[serde(default = "schema_representation_schemas")]
    pub schemas: Vec<String>,
    /// Unique schema identifier (URI)
    pub id: String,
    /// Human-readable schema name
    pub name: String,
    /// Schema description
    #[serde(default)]
    pub description: String,
    /// List of attribute definitions, in publication order
    pub attributes: Vec<AttributeDefinition>,
    /// Resource metadata, assigned when the schema is registered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResourceMeta>,
}

fn schema_representation_schemas() -> Vec<String> {
    vec![SCHEMA_SCHEMA_URI.to_string()]
}

/// Resource metadata attached to discovery representations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMeta {
    /// Resource type tag, e.g. "Schema" or "ResourceType"
    pub resource_type: String,
    /// Canonical URI of the representation
    pub location: String,
}

/// Definition of a SCIM attribute.
///
/// Defines all characteristics of an attribute. Enumerated characteristics are
/// typed, so values outside the RFC 7643 sets are rejected while parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    /// Attribute name
    pub name: String,
    /// Data type of the attribute
    #[serde(rename = "type")]
    pub data_type: AttributeType,
    /// Whether this attribute can have multiple values
    #[serde(default)]
    pub multi_valued: bool,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Whether this attribute is required
    #[serde(default)]
    pub required: bool,
    /// Whether string comparison is case-sensitive
    #[serde(default)]
    pub case_exact: bool,
    /// Mutability characteristics
    #[serde(default)]
    pub mutability: Mutability,
    /// How the attribute is returned in responses
    #[serde(default)]
    pub returned: Returned,
    /// Uniqueness constraints
    #[serde(default)]
    pub uniqueness: Uniqueness,
    /// Allowed values for string attributes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub canonical_values: Vec<String>,
    /// Resource types a reference attribute may point at
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_types: Vec<String>,
    /// Sub-attributes for complex types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_attributes: Vec<AttributeDefinition>,
}

impl Default for AttributeDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            data_type: AttributeType::String,
            multi_valued: false,
            description: String::new(),
            required: false,
            case_exact: false,
            mutability: Mutability::ReadWrite,
            returned: Returned::Default,
            uniqueness: Uniqueness::None,
            canonical_values: Vec::new(),
            reference_types: Vec::new(),
            sub_attributes: Vec::new(),
        }
    }
}

/// SCIM attribute data types.
///
/// Represents the valid data types for SCIM attributes as defined in RFC 7643.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum AttributeType {
    /// String value
    #[default]
    String,
    /// Boolean value
    Boolean,
    /// Decimal number
    Decimal,
    /// Integer number
    Integer,
    /// DateTime in RFC3339 format
    DateTime,
    /// Binary data (base64 encoded)
    Binary,
    /// URI reference
    Reference,
    /// Complex attribute with sub-attributes
    Complex,
}

/// Attribute mutability characteristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    /// Read-only attribute (managed by server)
    ReadOnly,
    /// Read-write attribute (can be modified by clients)
    #[default]
    ReadWrite,
    /// Immutable attribute (set once, never modified)
    Immutable,
    /// Write-only attribute (passwords, etc.)
    WriteOnly,
}

/// When an attribute is included in responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Returned {
    /// Always returned, regardless of requested attributes
    Always,
    /// Never returned
    Never,
    /// Returned by default unless excluded
    #[default]
    Default,
    /// Returned only when explicitly requested
    Request,
}

/// Attribute uniqueness constraints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Uniqueness {
    /// No uniqueness constraint
    #[default]
    None,
    /// Unique within the server
    Server,
    /// Globally unique
    Global,
}

/// A schema extension attached to a resource type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaExtension {
    /// Extension schema URI
    pub schema: String,
    /// Whether resources of this type must carry the extension
    #[serde(default)]
    pub required: bool,
}

/// A SCIM resource type definition (RFC 7643 section 6).
///
/// Names a schema-backed entity class and the endpoint it is exposed at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTypeDefinition {
    /// Schemas describing this representation
    #[serde(default = "resource_type_representation_schemas")]
    pub schemas: Vec<String>,
    /// Resource type identifier, usually equal to the name
    pub id: String,
    /// Resource type name, e.g. "User"
    pub name: String,
    /// Endpoint path relative to the SCIM base, e.g. "/Users"
    pub endpoint: String,
    #[serde(default)]
    pub description: String,
    /// Base schema URI
    pub schema: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema_extensions: Vec<SchemaExtension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResourceMeta>,
}

fn resource_type_representation_schemas() -> Vec<String> {
    vec![RESOURCE_TYPE_SCHEMA_URI.to_string()]
}
