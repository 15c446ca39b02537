//! Remaining-length calculation handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::ErrorBody;
use crate::middleware::CallerScope;
use crate::{ApiError, AppState};
use wirespool_core::{CalculateRequest, CalculationResult};

/// Compute the wire left on a spool from its weight.
///
/// `weightUnit` defaults to `lbs`. The length is in feet and unrounded.
///
/// # Returns
/// - 200 OK with the calculation result
/// - 400 Bad Request if the body is malformed or the weight is out of range
/// - 404 Not Found if `wireTypeId` is not visible to the caller
#[utoipa::path(post, path = "/api/calculate", tag = "Calculator",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Calculation result", body = CalculationResult),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "Wire type not found", body = ErrorBody)
    ))]
pub async fn calculate_length(
    State(state): State<AppState>,
    CallerScope(scope): CallerScope,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculationResult>, ApiError> {
    let Json(req) = body?;
    let result = state.calculation.calculate(&scope, &req).await?;
    Ok(Json(result))
}
