//! Integration tests for the SCIM discovery gateway.

pub mod authentication;
pub mod discovery_endpoints;
pub mod lifecycle;
pub mod process;
pub mod properties;
