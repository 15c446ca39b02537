//! Remaining-length calculation.
//!
//! `length = (REFERENCE_LENGTH_FT / ratio) * weight_in_lbs`
//!
//! Pure functions of their inputs. Results are not rounded; presentation
//! layers round for display.

use crate::defaults::{OUNCES_PER_POUND, REFERENCE_LENGTH_FT, WEIGHT_MAX};
use crate::error::{Error, Result};
use crate::models::{CalculationResult, Ratio, WeightUnit, WireType};

/// Check that a weight is a positive finite number within bounds.
pub fn validate_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() {
        return Err(Error::InvalidInput(
            "weight must be a finite number".to_string(),
        ));
    }
    if weight <= 0.0 {
        return Err(Error::InvalidInput(
            "weight must be greater than zero".to_string(),
        ));
    }
    if weight > WEIGHT_MAX {
        return Err(Error::InvalidInput(format!(
            "weight must be at most {}",
            WEIGHT_MAX
        )));
    }
    Ok(())
}

/// Normalize a weight to pounds.
pub fn weight_in_pounds(weight: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Lbs => weight,
        WeightUnit::Oz => weight / OUNCES_PER_POUND,
    }
}

/// Feet of wire for `weight` (in `unit`) at `ratio` pounds per reference length.
pub fn calculate_length(ratio: Ratio, weight: f64, unit: WeightUnit) -> Result<f64> {
    validate_weight(weight)?;
    let pounds = weight_in_pounds(weight, unit);
    Ok((REFERENCE_LENGTH_FT / ratio.as_f64()) * pounds)
}

/// Full calculation result for a resolved wire type.
pub fn calculate(wire_type: &WireType, weight: f64, unit: WeightUnit) -> Result<CalculationResult> {
    let length = calculate_length(wire_type.ratio, weight, unit)?;
    Ok(CalculationResult {
        wire_type: wire_type.clone(),
        weight,
        weight_unit: unit,
        length,
        reference_length: REFERENCE_LENGTH_FT,
        remaining_from_full_roll: REFERENCE_LENGTH_FT - length,
    })
}
