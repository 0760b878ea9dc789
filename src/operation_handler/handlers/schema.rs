//! Schema operation handlers
//!
//! This module contains handlers for schema-related operations such as retrieving
//! all schemas or a specific schema by ID.

use crate::{
    error::{ScimError, ScimResult},
    operation_handler::core::{GatewayState, ListQuery, ListResponse, ScimJson},
};
use axum::{
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use log::debug;

/// `GET /Schemas`
pub async fn list_schemas(
    State(state): State<GatewayState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ScimResult<Response> {
    let Query(query) = query.map_err(|e| ScimError::InvalidQuery {
        message: e.body_text(),
    })?;

    let list = ListResponse::paginate(state.discovery.list_schemas(), &query);
    debug!(
        "Listing {} of {} schemas",
        list.items_per_page, list.total_results
    );
    Ok(ScimJson(list).into_response())
}

/// `GET /Schemas/{id}`
pub async fn get_schema(
    State(state): State<GatewayState>,
    id: Result<Path<String>, PathRejection>,
) -> ScimResult<Response> {
    let Path(id) = id.map_err(super::invalid_path)?;
    let schema = state.discovery.get_schema(&id)?;
    Ok(ScimJson(schema).into_response())
}
