//! Wire type catalog HTTP handlers.
//!
//! CRUD over the caller's catalog. Default records are listed alongside the
//! caller's custom records; the store itself refuses to change defaults.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ErrorBody;
use crate::middleware::CallerScope;
use crate::{ApiError, AppState};
use wirespool_core::{sort_for_display, CreateWireTypeRequest, UpdateWireTypeRequest, WireType};

/// Message for a refused or missing delete.
pub const DELETE_REFUSED_MESSAGE: &str =
    "Wire type not found or cannot be deleted (default wire type)";

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListSort {
    /// Store order: defaults first, then custom records as created.
    #[default]
    Insertion,
    /// Category priority, then gauge, then name.
    Category,
}

/// Query parameters for listing wire types.
#[derive(Debug, Default, Deserialize)]
pub struct ListWireTypesQuery {
    #[serde(default)]
    pub sort: ListSort,
}

/// Body returned by a successful delete.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// List wire types visible to the caller.
///
/// # Query Parameters
/// - `sort`: `insertion` (default) or `category`
///
/// # Returns
/// - 200 OK with array of wire types
/// - 400 Bad Request for an unknown `sort`
#[utoipa::path(get, path = "/api/wire-types", tag = "Wire Types",
    params(("sort" = Option<ListSort>, Query, description = "Listing order")),
    responses(
        (status = 200, description = "Wire types", body = [WireType]),
        (status = 400, description = "Invalid query", body = ErrorBody)
    ))]
pub async fn list_wire_types(
    State(state): State<AppState>,
    CallerScope(scope): CallerScope,
    query: Result<Query<ListWireTypesQuery>, QueryRejection>,
) -> Result<Json<Vec<WireType>>, ApiError> {
    let Query(query) = query?;
    let mut wire_types = state.catalog.list(&scope).await?;
    if query.sort == ListSort::Category {
        sort_for_display(&mut wire_types);
    }
    Ok(Json(wire_types))
}

/// Get a wire type by id.
///
/// # Returns
/// - 200 OK with the wire type
/// - 400 Bad Request if the id is not an integer
/// - 404 Not Found if no such wire type is visible to the caller
#[utoipa::path(get, path = "/api/wire-types/{id}", tag = "Wire Types",
    params(("id" = i64, Path, description = "Wire type id")),
    responses(
        (status = 200, description = "Wire type", body = WireType),
        (status = 400, description = "Invalid wire type ID", body = ErrorBody),
        (status = 404, description = "Wire type not found", body = ErrorBody)
    ))]
pub async fn get_wire_type(
    State(state): State<AppState>,
    CallerScope(scope): CallerScope,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<WireType>, ApiError> {
    let Path(id) = id?;
    let wire_type = state.catalog.get(&scope, id).await?;
    Ok(Json(wire_type))
}

/// Create a custom wire type.
///
/// `isDefault` in the body is ignored; new records are always custom.
///
/// # Returns
/// - 201 Created with the new record
/// - 400 Bad Request if `name` is blank or `ratio` is not a positive decimal
#[utoipa::path(post, path = "/api/wire-types", tag = "Wire Types",
    request_body = CreateWireTypeRequest,
    responses(
        (status = 201, description = "Created", body = WireType),
        (status = 400, description = "Validation failed", body = ErrorBody)
    ))]
pub async fn create_wire_type(
    State(state): State<AppState>,
    CallerScope(scope): CallerScope,
    body: Result<Json<CreateWireTypeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WireType>), ApiError> {
    let Json(req) = body?;
    let wire_type = state.catalog.create(&scope, req).await?;
    Ok((StatusCode::CREATED, Json(wire_type)))
}

/// Replace the name and ratio of a custom wire type.
///
/// # Returns
/// - 200 OK with the updated record
/// - 400 Bad Request on validation failure or if the target is a default
/// - 404 Not Found if no such wire type is visible to the caller
#[utoipa::path(put, path = "/api/wire-types/{id}", tag = "Wire Types",
    params(("id" = i64, Path, description = "Wire type id")),
    request_body = UpdateWireTypeRequest,
    responses(
        (status = 200, description = "Updated", body = WireType),
        (status = 400, description = "Validation failed or default wire type", body = ErrorBody),
        (status = 404, description = "Wire type not found", body = ErrorBody)
    ))]
pub async fn update_wire_type(
    State(state): State<AppState>,
    CallerScope(scope): CallerScope,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateWireTypeRequest>, JsonRejection>,
) -> Result<Json<WireType>, ApiError> {
    let Path(id) = id?;
    let Json(req) = body?;
    let wire_type = state.catalog.update(&scope, id, req).await?;
    Ok(Json(wire_type))
}

/// Delete a custom wire type.
///
/// # Returns
/// - 200 OK with a confirmation message
/// - 400 Bad Request if the id is not an integer
/// - 404 Not Found if the id is unknown or names a default wire type
#[utoipa::path(delete, path = "/api/wire-types/{id}", tag = "Wire Types",
    params(("id" = i64, Path, description = "Wire type id")),
    responses(
        (status = 200, description = "Deleted", body = DeleteResponse),
        (status = 400, description = "Invalid wire type ID", body = ErrorBody),
        (status = 404, description = "Not found or default", body = ErrorBody)
    ))]
pub async fn delete_wire_type(
    State(state): State<AppState>,
    CallerScope(scope): CallerScope,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id?;
    if !state.catalog.delete(&scope, id).await? {
        return Err(ApiError::NotFound(DELETE_REFUSED_MESSAGE.to_string()));
    }
    Ok(Json(DeleteResponse {
        message: "Wire type deleted successfully".to_string(),
    }))
}
