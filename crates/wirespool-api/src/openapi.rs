//! OpenAPI document, served at `/openapi.json` with Swagger UI at `/docs`.

use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers::{calculate, health, wire_types};
use wirespool_core::{
    CalculateRequest, CalculationResult, CreateWireTypeRequest, UpdateWireTypeRequest, WeightUnit,
    WireType,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wirespool API",
        description = "Wire type catalog and remaining-length calculator for partially used spools"
    ),
    paths(
        health::health_check,
        wire_types::list_wire_types,
        wire_types::get_wire_type,
        wire_types::create_wire_type,
        wire_types::update_wire_type,
        wire_types::delete_wire_type,
        calculate::calculate_length,
    ),
    components(schemas(
        WireType,
        CreateWireTypeRequest,
        UpdateWireTypeRequest,
        CalculateRequest,
        CalculationResult,
        WeightUnit,
        ErrorBody,
        wire_types::ListSort,
        wire_types::DeleteResponse,
    )),
    tags(
        (name = "Wire Types", description = "Wire type catalog"),
        (name = "Calculator", description = "Remaining-length calculation"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
