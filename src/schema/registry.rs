//! Schema registry holding the published schemas and resource types.
//!
//! The registry is assembled once by [`SchemaRegistryBuilder`], validated as a
//! whole, and never mutated afterwards. Request handlers share it behind an
//! `Arc` and only ever read from it, so no locking is involved.

use super::embedded;
use super::types::{ResourceMeta, ResourceTypeDefinition, Schema};
use super::validation::validate_schema;
use crate::error::{BuildError, BuildResult, ScimError, ScimResult};

use log::{debug, info};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Base URL used for `meta.location` when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/scim/v2";

/// Characters escaped when an identifier is placed in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Immutable catalog of SCIM schemas and resource types.
///
/// Schemas are keyed and ordered by identifier, resource types by name, so
/// listings are stable across calls and across restarts.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    base_url: String,
    schemas: BTreeMap<String, Schema>,
    resource_types: BTreeMap<String, ResourceTypeDefinition>,
}

impl SchemaRegistry {
    /// Create a registry with the embedded core schemas and resource types.
    pub fn new() -> BuildResult<Self> {
        Self::builder().with_embedded_definitions().build()
    }

    /// Start assembling a registry.
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    /// All schemas, ordered by identifier.
    pub fn list_schemas(&self) -> Vec<&Schema> {
        self.schemas.values().collect()
    }

    /// Get a specific schema by ID.
    pub fn get_schema(&self, id: &str) -> ScimResult<&Schema> {
        self.schemas
            .get(id)
            .ok_or_else(|| ScimError::schema_not_found(id))
    }

    /// Whether a schema with this identifier is registered.
    pub fn contains_schema(&self, id: &str) -> bool {
        self.schemas.contains_key(id)
    }

    /// All resource types, ordered by name.
    pub fn list_resource_types(&self) -> Vec<&ResourceTypeDefinition> {
        self.resource_types.values().collect()
    }

    /// Get a resource type by name.
    pub fn get_resource_type(&self, name: &str) -> ScimResult<&ResourceTypeDefinition> {
        self.resource_types
            .get(name)
            .ok_or_else(|| ScimError::resource_type_not_found(name))
    }

    /// Base URL the `meta.location` values were derived from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

/// Collects definitions from embedded documents, files and values, then
/// validates them together in [`build`](SchemaRegistryBuilder::build).
#[derive(Debug)]
pub struct SchemaRegistryBuilder {
    base_url: String,
    schemas: Vec<Schema>,
    resource_types: Vec<ResourceTypeDefinition>,
    pending_errors: Vec<BuildError>,
}

impl SchemaRegistryBuilder {
    fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            schemas: Vec::new(),
            resource_types: Vec::new(),
            pending_errors: Vec::new(),
        }
    }

    /// Set the base URL used to derive `meta.location`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Add the embedded core schemas and the User/Group resource types.
    pub fn with_embedded_definitions(mut self) -> Self {
        for (label, document) in embedded::core_schemas() {
            self = self.schema_json(label, document);
        }
        for (label, document) in embedded::core_resource_types() {
            match serde_json::from_str::<ResourceTypeDefinition>(document) {
                Ok(resource_type) => self.resource_types.push(resource_type),
                Err(e) => self.pending_errors.push(BuildError::SchemaLoadError {
                    source_name: format!("embedded resource type {}", label),
                    message: e.to_string(),
                }),
            }
        }
        self
    }

    /// Add a schema from a JSON document.
    pub fn schema_json(mut self, source_name: &str, content: &str) -> Self {
        match load_schema_from_str(source_name, content) {
            Ok(schema) => self.schemas.push(schema),
            Err(e) => self.pending_errors.push(e),
        }
        self
    }

    /// Add an already parsed schema.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Add every `*.json` schema file found in a directory.
    ///
    /// Files are read in name order so that error reporting is deterministic.
    pub fn schema_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        let dir = dir.as_ref();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.pending_errors.push(BuildError::SchemaLoadError {
                    source_name: dir.display().to_string(),
                    message: e.to_string(),
                });
                return self;
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in paths {
            debug!("Loading schema file {}", path.display());
            match load_schema_from_file(&path) {
                Ok(schema) => self.schemas.push(schema),
                Err(e) => self.pending_errors.push(e),
            }
        }
        self
    }

    /// Add a resource type definition.
    pub fn resource_type(mut self, resource_type: ResourceTypeDefinition) -> Self {
        self.resource_types.push(resource_type);
        self
    }

    /// Validate everything collected and produce the immutable registry.
    ///
    /// The first loading error, definition error, duplicate identifier or
    /// dangling resource type reference aborts the build.
    pub fn build(self) -> BuildResult<SchemaRegistry> {
        if let Some(error) = self.pending_errors.into_iter().next() {
            return Err(error);
        }

        let mut schemas = BTreeMap::new();
        for mut schema in self.schemas {
            validate_schema(&schema)?;
            if schemas.contains_key(&schema.id) {
                return Err(BuildError::DuplicateSchema {
                    schema_id: schema.id,
                });
            }
            schema.meta = Some(ResourceMeta {
                resource_type: "Schema".to_string(),
                location: format!(
                    "{}/Schemas/{}",
                    self.base_url,
                    utf8_percent_encode(&schema.id, PATH_SEGMENT)
                ),
            });
            schemas.insert(schema.id.clone(), schema);
        }

        let mut resource_types = BTreeMap::new();
        for mut resource_type in self.resource_types {
            validate_resource_type(&resource_type, &schemas)?;
            if resource_types.contains_key(&resource_type.name) {
                return Err(BuildError::invalid_configuration(format!(
                    "duplicate resource type '{}'",
                    resource_type.name
                )));
            }
            resource_type.meta = Some(ResourceMeta {
                resource_type: "ResourceType".to_string(),
                location: format!(
                    "{}/ResourceTypes/{}",
                    self.base_url,
                    utf8_percent_encode(&resource_type.name, PATH_SEGMENT)
                ),
            });
            resource_types.insert(resource_type.name.clone(), resource_type);
        }

        info!(
            "Schema registry ready: {} schemas, {} resource types",
            schemas.len(),
            resource_types.len()
        );

        Ok(SchemaRegistry {
            base_url: self.base_url,
            schemas,
            resource_types,
        })
    }
}

fn validate_resource_type(
    resource_type: &ResourceTypeDefinition,
    schemas: &BTreeMap<String, Schema>,
) -> BuildResult<()> {
    if resource_type.name.trim().is_empty() || !resource_type.endpoint.starts_with('/') {
        return Err(BuildError::invalid_configuration(format!(
            "resource type '{}' needs a name and an endpoint starting with '/'",
            resource_type.name
        )));
    }

    let referenced = std::iter::once(&resource_type.schema)
        .chain(resource_type.schema_extensions.iter().map(|ext| &ext.schema));
    for schema_id in referenced {
        if !schemas.contains_key(schema_id) {
            return Err(BuildError::UnknownResourceTypeSchema {
                resource_type: resource_type.name.clone(),
                schema_id: schema_id.clone(),
            });
        }
    }
    Ok(())
}

/// Load a schema from a JSON file.
pub fn load_schema_from_file<P: AsRef<Path>>(path: P) -> BuildResult<Schema> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| BuildError::SchemaLoadError {
        source_name: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_schema_from_str(&path.display().to_string(), &content)
}

/// Load a schema from a JSON string.
pub fn load_schema_from_str(source_name: &str, content: &str) -> BuildResult<Schema> {
    serde_json::from_str(content).map_err(|e| BuildError::SchemaLoadError {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}
