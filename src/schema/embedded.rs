//! Embedded SCIM discovery definitions.
//!
//! The core schemas (User, Group, the enterprise User extension and the three
//! discovery schemas) and the User/Group resource types ship inside the binary,
//! so a gateway can publish a complete catalog without any external files.
//! Definitions follow RFC 7643 sections 4, 5, 6 and 8.7.

/// Core User schema URI.
pub const USER_SCHEMA_URI: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
/// Core Group schema URI.
pub const GROUP_SCHEMA_URI: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
/// Enterprise User extension schema URI.
pub const ENTERPRISE_USER_SCHEMA_URI: &str =
    "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User";
/// ServiceProviderConfig schema URI.
pub const SERVICE_PROVIDER_CONFIG_SCHEMA_URI: &str =
    "urn:ietf:params:scim:schemas:core:2.0:ServiceProviderConfig";

/// All embedded schema documents, in registration order.
pub fn core_schemas() -> [(&'static str, &'static str); 6] {
    [
        ("User", core_user_schema()),
        ("Group", core_group_schema()),
        ("EnterpriseUser", enterprise_user_schema()),
        ("ServiceProviderConfig", service_provider_config_schema()),
        ("ResourceType", resource_type_schema()),
        ("Schema", schema_schema()),
    ]
}

/// All embedded resource type documents.
pub fn core_resource_types() -> [(&'static str, &'static str); 2] {
    [
        ("User", user_resource_type()),
        ("Group", group_resource_type()),
    ]
}

/// Returns the core User schema as a JSON string.
pub fn core_user_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:core:2.0:User",
  "name": "User",
  "description": "User Account",
  "attributes": [
    {"name": "userName", "type": "string", "multiValued": false, "required": true, "caseExact": false, "mutability": "readWrite", "returned": "default", "uniqueness": "server",
     "description": "Unique identifier for the User, typically used by the user to directly authenticate to the service provider."},
    {"name": "name", "type": "complex", "multiValued": false, "required": false, "mutability": "readWrite", "returned": "default", "uniqueness": "none",
     "description": "The components of the user's real name.",
     "subAttributes": [
       {"name": "formatted", "type": "string", "description": "The full name, including all middle names, titles, and suffixes as appropriate, formatted for display."},
       {"name": "familyName", "type": "string", "description": "The family name of the User, or last name in most Western languages."},
       {"name": "givenName", "type": "string", "description": "The given name of the User, or first name in most Western languages."},
       {"name": "middleName", "type": "string", "description": "The middle name(s) of the User."},
       {"name": "honorificPrefix", "type": "string", "description": "The honorific prefix(es) of the User, or title in most Western languages."},
       {"name": "honorificSuffix", "type": "string", "description": "The honorific suffix(es) of the User, or suffix in most Western languages."}
     ]},
    {"name": "displayName", "type": "string", "description": "The name of the User, suitable for display to end-users."},
    {"name": "nickName", "type": "string", "description": "The casual way to address the user in real life."},
    {"name": "profileUrl", "type": "reference", "referenceTypes": ["external"], "description": "A fully qualified URL pointing to a page representing the User's online profile."},
    {"name": "title", "type": "string", "description": "The user's title, such as \"Vice President\"."},
    {"name": "userType", "type": "string", "description": "Used to identify the relationship between the organization and the user."},
    {"name": "preferredLanguage", "type": "string", "description": "Indicates the User's preferred written or spoken language."},
    {"name": "locale", "type": "string", "description": "Used to indicate the User's default location for purposes of localizing items such as currency."},
    {"name": "timezone", "type": "string", "description": "The User's time zone in the 'Olson' time zone database format, e.g. 'America/Los_Angeles'."},
    {"name": "active", "type": "boolean", "description": "A Boolean value indicating the User's administrative status."},
    {"name": "password", "type": "string", "mutability": "writeOnly", "returned": "never", "description": "The User's cleartext password, used to set or compare a password."},
    {"name": "emails", "type": "complex", "multiValued": true, "description": "Email addresses for the user.",
     "subAttributes": [
       {"name": "value", "type": "string", "description": "Email addresses for the user, canonicalized according to RFC 5321."},
       {"name": "display", "type": "string", "description": "A human-readable name, primarily used for display purposes."},
       {"name": "type", "type": "string", "canonicalValues": ["work", "home", "other"], "description": "A label indicating the attribute's function."},
       {"name": "primary", "type": "boolean", "description": "Indicates the 'primary' or preferred attribute value for this attribute."}
     ]},
    {"name": "phoneNumbers", "type": "complex", "multiValued": true, "description": "Phone numbers for the User.",
     "subAttributes": [
       {"name": "value", "type": "string", "description": "Phone number of the User."},
       {"name": "display", "type": "string", "description": "A human-readable name, primarily used for display purposes."},
       {"name": "type", "type": "string", "canonicalValues": ["work", "home", "mobile", "fax", "pager", "other"], "description": "A label indicating the attribute's function."},
       {"name": "primary", "type": "boolean", "description": "Indicates the 'primary' or preferred attribute value for this attribute."}
     ]},
    {"name": "addresses", "type": "complex", "multiValued": true, "description": "A physical mailing address for this User.",
     "subAttributes": [
       {"name": "formatted", "type": "string", "description": "The full mailing address, formatted for display or use with a mailing label."},
       {"name": "streetAddress", "type": "string", "description": "The full street address component."},
       {"name": "locality", "type": "string", "description": "The city or locality component."},
       {"name": "region", "type": "string", "description": "The state or region component."},
       {"name": "postalCode", "type": "string", "description": "The zip code or postal code component."},
       {"name": "country", "type": "string", "description": "The country name component."},
       {"name": "type", "type": "string", "canonicalValues": ["work", "home", "other"], "description": "A label indicating the attribute's function."},
       {"name": "primary", "type": "boolean", "description": "Indicates the 'primary' or preferred attribute value for this attribute."}
     ]},
    {"name": "groups", "type": "complex", "multiValued": true, "mutability": "readOnly", "description": "A list of groups to which the user belongs.",
     "subAttributes": [
       {"name": "value", "type": "string", "mutability": "readOnly", "description": "The identifier of the User's group."},
       {"name": "$ref", "type": "reference", "referenceTypes": ["User", "Group"], "mutability": "readOnly", "description": "The URI of the corresponding 'Group' resource to which the user belongs."},
       {"name": "display", "type": "string", "mutability": "readOnly", "description": "A human-readable name, primarily used for display purposes."},
       {"name": "type", "type": "string", "canonicalValues": ["direct", "indirect"], "mutability": "readOnly", "description": "A label indicating the attribute's function."}
     ]},
    {"name": "roles", "type": "complex", "multiValued": true, "description": "A list of roles for the User that collectively represent who the User is.",
     "subAttributes": [
       {"name": "value", "type": "string", "description": "The value of a role."},
       {"name": "display", "type": "string", "description": "A human-readable name, primarily used for display purposes."},
       {"name": "type", "type": "string", "description": "A label indicating the attribute's function."},
       {"name": "primary", "type": "boolean", "description": "Indicates the 'primary' or preferred attribute value for this attribute."}
     ]}
  ]
}"#
}

/// Returns the core Group schema as a JSON string.
pub fn core_group_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:core:2.0:Group",
  "name": "Group",
  "description": "Group",
  "attributes": [
    {"name": "displayName", "type": "string", "required": true, "uniqueness": "none", "description": "A human-readable name for the Group."},
    {"name": "members", "type": "complex", "multiValued": true, "description": "A list of members of the Group.",
     "subAttributes": [
       {"name": "value", "type": "string", "mutability": "immutable", "description": "Identifier of the member of this Group."},
       {"name": "$ref", "type": "reference", "referenceTypes": ["User", "Group"], "mutability": "immutable", "description": "The URI corresponding to a SCIM resource that is a member of this Group."},
       {"name": "type", "type": "string", "canonicalValues": ["User", "Group"], "mutability": "immutable", "description": "A label indicating the type of resource, e.g. 'User' or 'Group'."}
     ]}
  ]
}"#
}

/// Returns the enterprise User extension schema as a JSON string.
pub fn enterprise_user_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User",
  "name": "EnterpriseUser",
  "description": "Enterprise User",
  "attributes": [
    {"name": "employeeNumber", "type": "string", "description": "Numeric or alphanumeric identifier assigned to a person, typically based on order of hire or association with an organization."},
    {"name": "costCenter", "type": "string", "description": "Identifies the name of a cost center."},
    {"name": "organization", "type": "string", "description": "Identifies the name of an organization."},
    {"name": "division", "type": "string", "description": "Identifies the name of a division."},
    {"name": "department", "type": "string", "description": "Identifies the name of a department."},
    {"name": "manager", "type": "complex", "description": "The User's manager.",
     "subAttributes": [
       {"name": "value", "type": "string", "description": "The id of the SCIM resource representing the User's manager."},
       {"name": "$ref", "type": "reference", "referenceTypes": ["User"], "description": "The URI of the SCIM resource representing the User's manager."},
       {"name": "displayName", "type": "string", "mutability": "readOnly", "description": "The displayName of the User's manager."}
     ]}
  ]
}"#
}

/// Returns the ServiceProviderConfig schema as a JSON string.
pub fn service_provider_config_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:core:2.0:ServiceProviderConfig",
  "name": "Service Provider Configuration",
  "description": "Schema for representing the service provider's configuration",
  "attributes": [
    {"name": "documentationUri", "type": "reference", "referenceTypes": ["external"], "mutability": "readOnly", "description": "An HTTP-addressable URL pointing to the service provider's human-consumable help documentation."},
    {"name": "patch", "type": "complex", "required": true, "mutability": "readOnly", "description": "A complex type that specifies PATCH configuration options.",
     "subAttributes": [
       {"name": "supported", "type": "boolean", "required": true, "mutability": "readOnly", "description": "A Boolean value specifying whether or not the operation is supported."}
     ]},
    {"name": "bulk", "type": "complex", "required": true, "mutability": "readOnly", "description": "A complex type that specifies bulk configuration options.",
     "subAttributes": [
       {"name": "supported", "type": "boolean", "required": true, "mutability": "readOnly", "description": "A Boolean value specifying whether or not the operation is supported."},
       {"name": "maxOperations", "type": "integer", "required": true, "mutability": "readOnly", "description": "An integer value specifying the maximum number of operations."},
       {"name": "maxPayloadSize", "type": "integer", "required": true, "mutability": "readOnly", "description": "An integer value specifying the maximum payload size in bytes."}
     ]},
    {"name": "filter", "type": "complex", "required": true, "mutability": "readOnly", "description": "A complex type that specifies FILTER options.",
     "subAttributes": [
       {"name": "supported", "type": "boolean", "required": true, "mutability": "readOnly", "description": "A Boolean value specifying whether or not the operation is supported."},
       {"name": "maxResults", "type": "integer", "required": true, "mutability": "readOnly", "description": "An integer value specifying the maximum number of resources returned in a response."}
     ]},
    {"name": "changePassword", "type": "complex", "required": true, "mutability": "readOnly", "description": "A complex type that specifies configuration options related to changing a password.",
     "subAttributes": [
       {"name": "supported", "type": "boolean", "required": true, "mutability": "readOnly", "description": "A Boolean value specifying whether or not the operation is supported."}
     ]},
    {"name": "sort", "type": "complex", "required": true, "mutability": "readOnly", "description": "A complex type that specifies sort result options.",
     "subAttributes": [
       {"name": "supported", "type": "boolean", "required": true, "mutability": "readOnly", "description": "A Boolean value specifying whether or not sorting is supported."}
     ]},
    {"name": "etag", "type": "complex", "required": true, "mutability": "readOnly", "description": "A complex type that specifies ETag configuration options.",
     "subAttributes": [
       {"name": "supported", "type": "boolean", "required": true, "mutability": "readOnly", "description": "A Boolean value specifying whether or not the operation is supported."}
     ]},
    {"name": "authenticationSchemes", "type": "complex", "multiValued": true, "required": true, "mutability": "readOnly", "description": "A complex type that specifies supported authentication scheme properties.",
     "subAttributes": [
       {"name": "type", "type": "string", "required": true, "mutability": "readOnly", "description": "The authentication scheme."},
       {"name": "name", "type": "string", "required": true, "mutability": "readOnly", "description": "The common authentication scheme name, e.g. HTTP Basic."},
       {"name": "description", "type": "string", "required": true, "mutability": "readOnly", "description": "A description of the authentication scheme."},
       {"name": "specUri", "type": "reference", "referenceTypes": ["external"], "mutability": "readOnly", "description": "An HTTP-addressable URL pointing to the authentication scheme's specification."},
       {"name": "documentationUri", "type": "reference", "referenceTypes": ["external"], "mutability": "readOnly", "description": "An HTTP-addressable URL pointing to the authentication scheme's usage documentation."},
       {"name": "primary", "type": "boolean", "mutability": "readOnly", "description": "Indicates the preferred authentication scheme."}
     ]}
  ]
}"#
}

/// Returns the ResourceType schema as a JSON string.
pub fn resource_type_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:core:2.0:ResourceType",
  "name": "ResourceType",
  "description": "Specifies the schema that describes a SCIM resource type",
  "attributes": [
    {"name": "id", "type": "string", "mutability": "readOnly", "caseExact": false, "description": "The resource type's server unique id."},
    {"name": "name", "type": "string", "required": true, "mutability": "readOnly", "description": "The resource type name."},
    {"name": "description", "type": "string", "mutability": "readOnly", "description": "The resource type's human-readable description."},
    {"name": "endpoint", "type": "reference", "referenceTypes": ["uri"], "required": true, "mutability": "readOnly", "description": "The resource type's HTTP-addressable endpoint relative to the Base URL, e.g. '/Users'."},
    {"name": "schema", "type": "reference", "referenceTypes": ["uri"], "required": true, "caseExact": true, "mutability": "readOnly", "description": "The resource type's primary/base schema URI."},
    {"name": "schemaExtensions", "type": "complex", "multiValued": true, "mutability": "readOnly", "description": "A list of URIs of the resource type's schema extensions.",
     "subAttributes": [
       {"name": "schema", "type": "reference", "referenceTypes": ["uri"], "required": true, "caseExact": true, "mutability": "readOnly", "description": "The URI of a schema extension."},
       {"name": "required", "type": "boolean", "required": true, "mutability": "readOnly", "description": "Whether resources of this type must include the schema extension."}
     ]}
  ]
}"#
}

/// Returns the Schema schema as a JSON string.
pub fn schema_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:core:2.0:Schema",
  "name": "Schema",
  "description": "Specifies the schema attribute definitions of a SCIM resource",
  "attributes": [
    {"name": "id", "type": "reference", "referenceTypes": ["uri"], "required": true, "caseExact": true, "mutability": "readOnly", "description": "The unique URI of the schema."},
    {"name": "name", "type": "string", "mutability": "readOnly", "description": "The schema's human-readable name."},
    {"name": "description", "type": "string", "mutability": "readOnly", "description": "The schema's human-readable description."},
    {"name": "attributes", "type": "complex", "multiValued": true, "required": true, "mutability": "readOnly", "description": "A complex attribute that includes the attributes of a schema.",
     "subAttributes": [
       {"name": "name", "type": "string", "required": true, "caseExact": true, "mutability": "readOnly", "description": "The attribute's name."},
       {"name": "type", "type": "string", "required": true, "mutability": "readOnly", "canonicalValues": ["string", "complex", "boolean", "decimal", "integer", "dateTime", "reference", "binary"], "description": "The attribute's data type."},
       {"name": "multiValued", "type": "boolean", "required": true, "mutability": "readOnly", "description": "A Boolean value indicating an attribute's plurality."},
       {"name": "description", "type": "string", "mutability": "readOnly", "description": "A human-readable description of the attribute."},
       {"name": "required", "type": "boolean", "mutability": "readOnly", "description": "A boolean value indicating whether or not the attribute is required."},
       {"name": "canonicalValues", "type": "string", "multiValued": true, "mutability": "readOnly", "description": "A collection of canonical values."},
       {"name": "caseExact", "type": "boolean", "mutability": "readOnly", "description": "Indicates whether or not a string attribute is case sensitive."},
       {"name": "mutability", "type": "string", "mutability": "readOnly", "canonicalValues": ["readOnly", "readWrite", "immutable", "writeOnly"], "description": "Indicates whether or not an attribute is modifiable."},
       {"name": "returned", "type": "string", "mutability": "readOnly", "canonicalValues": ["always", "never", "default", "request"], "description": "Indicates when an attribute is returned in a response."},
       {"name": "uniqueness", "type": "string", "mutability": "readOnly", "canonicalValues": ["none", "server", "global"], "description": "Indicates how unique a value must be."},
       {"name": "referenceTypes", "type": "string", "multiValued": true, "mutability": "readOnly", "description": "Used only with an attribute of type 'reference'."}
     ]}
  ]
}"#
}

/// Returns the User resource type as a JSON string.
pub fn user_resource_type() -> &'static str {
    r#"{
  "id": "User",
  "name": "User",
  "endpoint": "/Users",
  "description": "User Account",
  "schema": "urn:ietf:params:scim:schemas:core:2.0:User",
  "schemaExtensions": [
    {"schema": "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User", "required": false}
  ]
}"#
}

/// Returns the Group resource type as a JSON string.
pub fn group_resource_type() -> &'static str {
    r#"{
  "id": "Group",
  "name": "Group",
  "endpoint": "/Groups",
  "description": "Group",
  "schema": "urn:ietf:params:scim:schemas:core:2.0:Group"
}"#
}
