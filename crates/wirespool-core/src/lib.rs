//! # wirespool-core
//!
//! Core types, traits, and calculations for the wirespool service.
//!
//! This crate provides the wire-type data model, the catalog repository
//! contract that storage backends implement, the fixed default catalog, and
//! the remaining-length formula. It has no knowledge of HTTP or of any
//! particular storage engine.

pub mod calculation;
pub mod defaults;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use calculation::{calculate, calculate_length, validate_weight, weight_in_pounds};
pub use defaults::default_wire_types;
pub use display::{categorize, sort_for_display, WireCategory};
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
