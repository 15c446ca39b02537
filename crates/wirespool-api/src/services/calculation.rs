//! Remaining-length calculation against the caller's catalog.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use wirespool_core::{
    calculate, validate_weight, CalculateRequest, CalculationResult, CatalogScope, Result,
    WireTypeRepository,
};

/// Resolves the wire type in scope and applies the length formula.
///
/// Holds no state of its own beyond the catalog handle.
#[derive(Clone)]
pub struct CalculationService {
    catalog: Arc<dyn WireTypeRepository>,
}

impl CalculationService {
    pub fn new(catalog: Arc<dyn WireTypeRepository>) -> Self {
        Self { catalog }
    }

    pub async fn calculate(
        &self,
        scope: &CatalogScope,
        req: &CalculateRequest,
    ) -> Result<CalculationResult> {
        let start = Instant::now();
        validate_weight(req.weight)?;

        let wire_type = self.catalog.get(scope, req.wire_type_id).await?;
        let result = calculate(&wire_type, req.weight, req.weight_unit)?;

        debug!(
            subsystem = "api",
            component = "calculation",
            op = "calculate",
            scope = %scope,
            wire_type_id = wire_type.id,
            weight = req.weight,
            weight_unit = %req.weight_unit,
            length = result.length,
            duration_ms = start.elapsed().as_millis() as u64,
            "Calculated remaining length"
        );
        Ok(result)
    }
}
