//! Display ordering for wire type listings.
//!
//! Names are expected to follow `<gauge>/<conductors> <TYPE>`, e.g.
//! `12/2 NM-B (Romex)`. The category is inferred from `TYPE`, and listings are
//! ordered by category priority, then by gauge (thicker wire, smaller AWG
//! number, first), then by name. This is a presentation convention; the store
//! itself always returns insertion order.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::WireType;

/// `<gauge>/<conductors> <TYPE>` at the start of a name.
static CABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)/(\d+)\s+([A-Za-z][A-Za-z-]*)").expect("valid regex"));

/// Leading gauge number for names that are not cable assemblies ("6 AWG THHN").
static LEADING_GAUGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\b").expect("valid regex"));

/// Wire category, declared in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WireCategory {
    Romex,
    Mc,
    UfB,
    Ser,
    Thhn,
    Other,
}

impl WireCategory {
    /// Human-readable group label.
    pub fn label(self) -> &'static str {
        match self {
            WireCategory::Romex => "Romex",
            WireCategory::Mc => "MC",
            WireCategory::UfB => "UF-B",
            WireCategory::Ser => "SER",
            WireCategory::Thhn => "THHN",
            WireCategory::Other => "Other",
        }
    }

    fn from_type_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "NM-B" | "NMB" | "ROMEX" => Some(WireCategory::Romex),
            "MC" => Some(WireCategory::Mc),
            "UF-B" | "UFB" => Some(WireCategory::UfB),
            "SER" => Some(WireCategory::Ser),
            "THHN" => Some(WireCategory::Thhn),
            _ => None,
        }
    }
}

/// Infer the display category of a wire type name.
pub fn categorize(name: &str) -> WireCategory {
    if let Some(caps) = CABLE_NAME.captures(name) {
        if let Some(category) = WireCategory::from_type_token(&caps[3]) {
            return category;
        }
    }
    // Fall back to any recognizable type keyword in the name
    name.split(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .find_map(WireCategory::from_type_token)
        .unwrap_or(WireCategory::Other)
}

/// Gauge number parsed from the start of a name, if any.
pub fn gauge(name: &str) -> Option<u32> {
    CABLE_NAME
        .captures(name)
        .or_else(|| LEADING_GAUGE.captures(name))
        .and_then(|caps| caps[1].parse().ok())
}

fn display_order(a: &WireType, b: &WireType) -> Ordering {
    categorize(&a.name)
        .cmp(&categorize(&b.name))
        .then_with(|| match (gauge(&a.name), gauge(&b.name)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort wire types in place for display.
pub fn sort_for_display(wire_types: &mut [WireType]) {
    wire_types.sort_by(display_order);
}
