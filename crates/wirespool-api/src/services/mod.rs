//! Service layer for business logic.

pub mod calculation;

pub use calculation::CalculationService;
