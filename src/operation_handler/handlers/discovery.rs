//! Service provider configuration and resource type handlers.

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

/// `GET /ServiceProviderConfig`
pub async fn get_service_provider_config(State(state): State<GatewayState>) -> Response {
    ScimJson(state.discovery.get_service_provider_config()).into_response()
}

/// `GET /ResourceTypes`
pub async fn list_resource_types(
    State(state): State<GatewayState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ScimResult<Response> {
    let Query(query) = query.map_err(|e| ScimError::InvalidQuery {
        message: e.body_text(),
    })?;

    let list = ListResponse::paginate(state.discovery.list_resource_types(), &query);
    Ok(ScimJson(list).into_response())
}

/// `GET /ResourceTypes/{name}`
pub async fn get_resource_type(
    State(state): State<GatewayState>,
    name: Result<Path<String>, PathRejection>,
) -> ScimResult<Response> {
    let Path(name) = name.map_err(super::invalid_path)?;
    let resource_type = state.discovery.get_resource_type(&name)?;
    Ok(ScimJson(resource_type).into_response())
}
