//! HTTP handlers for wirespool-api.

pub mod calculate;
pub mod health;
pub mod wire_types;
