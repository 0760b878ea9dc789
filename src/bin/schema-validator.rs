//! # SCIM Schema Validator
//!
//! Checks SCIM schema files against the same definition rules the gateway
//! applies when it loads `SCIM_SCHEMA_DIR` at startup, so a file that passes
//! here will not stop the gateway from starting.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schema-validator schemas/Device.json
//! cargo run --bin schema-validator ./schemas/
//! ```
//!
//! ## Output Examples
//!
//! ```text
//! Validating schemas in directory: ./schemas/
//!
//! Validating: Device.json
//!   ✓ Valid - Device (urn:example:params:scim:schemas:Device)
//!
//! Validation Summary:
//!   Valid schemas: 1
//!   Invalid schemas: 0
//!
//! Testing schema registry loading...
//! ✓ Schema registry loaded successfully
//!   Total schemas loaded: 7
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: All schemas are valid
//! - `1`: One or more schemas are invalid or validation error occurred

use scim_gateway::schema::registry::load_schema_from_file;
use scim_gateway::schema::validation::validate_schema;
use scim_gateway::schema::{Schema, SchemaRegistry};
use scim_gateway::BuildError;

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let Some(target) = args.get(1) else {
        let program = args.first().map(String::as_str).unwrap_or("schema-validator");
        eprintln!("Usage: {} <schema-file-or-directory>", program);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} schemas/Device.json", program);
        eprintln!("  {} ./schemas/", program);
        return ExitCode::FAILURE;
    };

    let path = Path::new(target);
    let valid = if path.is_file() {
        validate_single_file(path)
    } else if path.is_dir() {
        validate_directory(path)
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        false
    };

    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn validate_single_file(file_path: &Path) -> bool {
    println!("Validating schema file: {}", file_path.display());

    match load_and_validate_schema(file_path) {
        Ok(schema) => {
            println!("✓ Schema is valid!");
            print_schema_summary(&schema);
            true
        }
        Err(e) => {
            eprintln!("❌ Schema validation failed: {}", e);
            false
        }
    }
}

fn validate_directory(dir_path: &Path) -> bool {
    println!("Validating schemas in directory: {}", dir_path.display());

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            return false;
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut valid_count = 0;
    let mut error_count = 0;
    for path in &paths {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("\nValidating: {}", file_name);

        match load_and_validate_schema(path) {
            Ok(schema) => {
                println!("  ✓ Valid - {} ({})", schema.name, schema.id);
                valid_count += 1;
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid schemas: {}", valid_count);
    println!("  Invalid schemas: {}", error_count);

    if error_count > 0 {
        return false;
    }

    // Files that are valid on their own can still clash with each other or
    // with the embedded core schemas.
    println!("\nTesting schema registry loading...");
    match SchemaRegistry::builder()
        .with_embedded_definitions()
        .schema_dir(dir_path)
        .build()
    {
        Ok(registry) => {
            println!("✓ Schema registry loaded successfully");
            println!("  Total schemas loaded: {}", registry.schema_count());
            true
        }
        Err(e) => {
            eprintln!("❌ Failed to load schema registry: {}", e);
            false
        }
    }
}

fn load_and_validate_schema(file_path: &Path) -> Result<Schema, BuildError> {
    let schema = load_schema_from_file(file_path)?;
    validate_schema(&schema)?;
    Ok(schema)
}

fn print_schema_summary(schema: &Schema) {
    println!();
    println!("Schema Summary:");
    println!("  ID: {}", schema.id);
    println!("  Name: {}", schema.name);
    println!("  Description: {}", schema.description);
    println!("  Attributes: {}", schema.attributes.len());

    let mut type_counts = BTreeMap::new();
    for attr in &schema.attributes {
        *type_counts
            .entry(format!("{:?}", attr.data_type))
            .or_insert(0) += 1;
    }

    println!(
        "  Required attributes: {}",
        schema.attributes.iter().filter(|attr| attr.required).count()
    );
    println!(
        "  Multi-valued attributes: {}",
        schema.attributes.iter().filter(|attr| attr.multi_valued).count()
    );
    println!("  Attribute types:");
    for (attr_type, count) in type_counts {
        println!("    - {}: {}", attr_type, count);
    }

    let required_attrs: Vec<&str> = schema
        .attributes
        .iter()
        .filter(|attr| attr.required)
        .map(|attr| attr.name.as_str())
        .collect();

    if !required_attrs.is_empty() {
        println!("  Required attribute names: {}", required_attrs.join(", "));
    }
}
