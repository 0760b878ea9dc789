//! Definition rules for schemas and resource types.
//!
//! The registry applies these checks while it is being populated, so a
//! malformed definition stops the gateway at startup and can never reach a
//! client. The schema-validator binary runs the same checks against files.

use super::types::{AttributeDefinition, AttributeType, Returned, Schema};
use crate::error::{BuildError, BuildResult};
use std::collections::HashSet;

/// Check that a schema identifier is an absolute URI.
///
/// SCIM schema ids are URNs in practice; HTTP(S) URIs are tolerated for
/// custom schemas.
pub fn is_valid_schema_uri(value: &str) -> bool {
    if let Some(rest) = value.strip_prefix("urn:") {
        return rest.split(':').filter(|part| !part.is_empty()).count() >= 2
            && !value.chars().any(char::is_whitespace);
    }
    (value.starts_with("https://") || value.starts_with("http://"))
        && !value.chars().any(char::is_whitespace)
}

/// Validate a complete schema definition.
pub fn validate_schema(schema: &Schema) -> BuildResult<()> {
    if !is_valid_schema_uri(&schema.id) {
        return Err(BuildError::invalid_definition(
            &schema.id,
            "schema id must be a URN or an absolute HTTP(S) URI",
        ));
    }
    if schema.name.trim().is_empty() {
        return Err(BuildError::invalid_definition(
            &schema.id,
            "schema name cannot be empty",
        ));
    }
    if schema.attributes.is_empty() {
        return Err(BuildError::invalid_definition(
            &schema.id,
            "schema must define at least one attribute",
        ));
    }

    validate_attribute_list(&schema.id, "", &schema.attributes)
}

fn validate_attribute_list(
    schema_id: &str,
    parent: &str,
    attributes: &[AttributeDefinition],
) -> BuildResult<()> {
    let mut seen = HashSet::new();
    for attribute in attributes {
        // Attribute names are case-insensitive in SCIM.
        if !seen.insert(attribute.name.to_ascii_lowercase()) {
            return Err(BuildError::invalid_definition(
                schema_id,
                format!("duplicate attribute '{}{}'", parent, attribute.name),
            ));
        }
        validate_attribute(schema_id, parent, attribute)?;
    }
    Ok(())
}

/// Validate a single attribute definition and, recursively, its sub-attributes.
pub fn validate_attribute(
    schema_id: &str,
    parent: &str,
    attribute: &AttributeDefinition,
) -> BuildResult<()> {
    let path = format!("{}{}", parent, attribute.name);

    if attribute.name.trim().is_empty() {
        return Err(BuildError::invalid_definition(
            schema_id,
            format!("attribute under '{}' has an empty name", parent),
        ));
    }

    if attribute.required && attribute.returned == Returned::Never {
        return Err(BuildError::invalid_definition(
            schema_id,
            format!("required attribute '{}' cannot have returned=never", path),
        ));
    }

    if !attribute.canonical_values.is_empty() && attribute.data_type != AttributeType::String {
        return Err(BuildError::invalid_definition(
            schema_id,
            format!("canonical values are only allowed on string attribute '{}'", path),
        ));
    }

    if !attribute.reference_types.is_empty() && attribute.data_type != AttributeType::Reference {
        return Err(BuildError::invalid_definition(
            schema_id,
            format!("referenceTypes are only allowed on reference attribute '{}'", path),
        ));
    }

    match attribute.data_type {
        AttributeType::Complex => {
            if attribute.sub_attributes.is_empty() {
                return Err(BuildError::invalid_definition(
                    schema_id,
                    format!("complex attribute '{}' must have sub-attributes", path),
                ));
            }
            if !parent.is_empty() {
                return Err(BuildError::invalid_definition(
                    schema_id,
                    format!("complex attribute '{}' cannot be nested", path),
                ));
            }
            validate_attribute_list(schema_id, &format!("{}.", path), &attribute.sub_attributes)
        }
        _ if !attribute.sub_attributes.is_empty() => Err(BuildError::invalid_definition(
            schema_id,
            format!("non-complex attribute '{}' cannot have sub-attributes", path),
        )),
        _ => Ok(()),
    }
}
