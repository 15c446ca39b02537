//! Centralized default constants and the built-in wire-type table.
//!
//! **This module is the single source of truth** for shared default values.
//! The store, the calculation, and the HTTP layer all reference these
//! constants instead of defining their own magic numbers.

use crate::models::{Ratio, WireType};

// =============================================================================
// CALCULATION
// =============================================================================

/// Reference length, in feet, that every ratio is expressed against.
///
/// The default table below is measured per 250 ft roll; the length formula
/// uses the same constant.
pub const REFERENCE_LENGTH_FT: f64 = 250.0;

/// Ounces per pound, used to normalize `oz` input.
pub const OUNCES_PER_POUND: f64 = 16.0;

/// Upper bound on an accepted weight, in the unit it was entered in.
pub const WEIGHT_MAX: f64 = 100_000.0;

// =============================================================================
// CATALOG
// =============================================================================

/// First identifier handed out to a custom wire type.
///
/// Default records use `1..=DEFAULT_WIRE_TYPES.len()`; custom ids never
/// collide with them.
pub const CUSTOM_ID_START: i64 = 1000;

/// Maximum wire type name length in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Built-in wire types as `(name, hundredths of a pound per 250 ft)`.
///
/// Ids are assigned in table order starting at 1. The most common cable,
/// 12/2 Romex, leads the table and so always has id 1.
pub const DEFAULT_WIRE_TYPES: &[(&str, i64)] = &[
    ("12/2 NM-B (Romex)", 2130),
    ("8/3 NM-B (Romex)", 6320),
    ("6/3 NM-B (Romex)", 8890),
    ("10/2 NM-B (Romex)", 3195),
    ("10/3 NM-B (Romex)", 4705),
    ("12/3 NM-B (Romex)", 2835),
    ("14/2 NM-B (Romex)", 1580),
    ("14/3 NM-B (Romex)", 1960),
    ("8/2 MC", 5666),
    ("10/2 MC", 3975),
    ("10/3 MC", 4960),
    ("12/2 MC", 2530),
    ("12/3 MC", 3335),
    ("12/4 MC", 3820),
    ("14/2 MC", 1910),
    ("14/3 MC", 2470),
    ("8/3 UF-B", 8913),
    ("10/2 UF-B", 3505),
    ("12/2 UF-B", 2375),
    ("14/2 UF-B", 1820),
    ("6/3 SER", 4705),
];

/// Materialize the default table as shared, non-owned records.
pub fn default_wire_types() -> Vec<WireType> {
    DEFAULT_WIRE_TYPES
        .iter()
        .zip(1_i64..)
        .filter_map(|(&(name, hundredths), id)| {
            Ratio::from_hundredths(hundredths).ok().map(|ratio| WireType {
                id,
                name: name.to_string(),
                ratio,
                is_default: true,
                owner_id: None,
            })
        })
        .collect()
}

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 5000;

/// Name of the cookie carrying the caller's opaque catalog id.
pub const USER_COOKIE_NAME: &str = "userId";

/// Lifetime of the caller-id cookie in seconds (365 days).
pub const USER_COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

/// Maximum request body size in bytes.
pub const MAX_BODY_SIZE_BYTES: usize = 64 * 1024;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;
