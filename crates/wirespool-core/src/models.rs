//! Data models for the wire-type catalog and the length calculation.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::defaults::NAME_MAX_LEN;
use crate::error::{Error, Result};

// =============================================================================
// RATIO
// =============================================================================

/// Pounds of wire per reference length, stored as a fixed-point decimal.
///
/// The value is held in hundredths of a pound, the same precision as the
/// `NUMERIC(10,2)` column it is persisted in. A `Ratio` is always strictly
/// positive; every constructor enforces that.
///
/// On the wire it is written as a JSON number and read from either a number
/// or a decimal string (`21.3`, `"21.30"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ratio(i64);

impl Ratio {
    /// Largest representable value in hundredths (99,999,999.99).
    pub const MAX_HUNDREDTHS: i64 = 9_999_999_999;

    /// Build a ratio from a count of hundredths of a pound.
    pub fn from_hundredths(hundredths: i64) -> Result<Self> {
        if hundredths <= 0 {
            return Err(Error::InvalidInput(
                "ratio must be greater than zero".to_string(),
            ));
        }
        if hundredths > Self::MAX_HUNDREDTHS {
            return Err(Error::InvalidInput(
                "ratio must be less than 100000000".to_string(),
            ));
        }
        Ok(Self(hundredths))
    }

    /// Build a ratio from a float, rounding half away from zero to hundredths.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidInput(
                "ratio must be a finite number".to_string(),
            ));
        }
        let scaled = (value * 100.0).round();
        if scaled > Self::MAX_HUNDREDTHS as f64 {
            return Err(Error::InvalidInput(
                "ratio must be less than 100000000".to_string(),
            ));
        }
        Self::from_hundredths(scaled as i64)
    }

    /// Hundredths of a pound per reference length.
    pub fn hundredths(self) -> i64 {
        self.0
    }

    /// Pounds per reference length as a float.
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Ratio {
    type Err = Error;

    /// Parse a plain decimal literal exactly (no float round trip).
    ///
    /// Digits past the second fractional place round half away from zero.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInput(format!("ratio '{}' is not a valid decimal", s));

        let trimmed = s.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if unsigned.starts_with('-') {
            return Err(Error::InvalidInput(
                "ratio must be greater than zero".to_string(),
            ));
        }

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let int_digits = int_part.trim_start_matches('0');
        // 8 integer digits at most for NUMERIC(10,2)
        if int_digits.len() > 8 {
            return Err(Error::InvalidInput(
                "ratio must be less than 100000000".to_string(),
            ));
        }
        let whole: i64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid())?
        };

        let frac = frac_part.as_bytes();
        let digit = |i: usize| frac.get(i).map(|b| (b - b'0') as i64).unwrap_or(0);
        let mut hundredths = whole * 100 + digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            hundredths += 1;
        }

        Self::from_hundredths(hundredths)
    }
}

impl TryFrom<f64> for Ratio {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_f64(value)
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawRatio {
            Number(f64),
            Text(String),
        }

        let parsed = match RawRatio::deserialize(deserializer).map_err(|_| {
            <D::Error as de::Error>::custom("ratio must be a number or a decimal string")
        })? {
            RawRatio::Number(n) => Ratio::from_f64(n),
            RawRatio::Text(s) => s.parse(),
        };
        parsed.map_err(|e| match e {
            Error::InvalidInput(msg) => de::Error::custom(msg),
            other => de::Error::custom(other),
        })
    }
}

// =============================================================================
// WIRE TYPE
// =============================================================================

/// A catalog entry: a gauge/construction of wire and its weight ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WireType {
    /// Identifier, unique within the caller's scope.
    pub id: i64,
    /// Display label, e.g. "12/2 NM-B (Romex)".
    pub name: String,
    /// Pounds per reference length (250 ft).
    #[schema(value_type = f64, example = 21.3)]
    pub ratio: Ratio,
    /// 1 for built-in records, 0 for custom records.
    #[serde(with = "int_flag")]
    #[schema(value_type = i32, example = 0)]
    pub is_default: bool,
    /// Owner of a custom record in the per-user variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
}

impl WireType {
    /// Whether this record may be updated or deleted.
    pub fn is_mutable(&self) -> bool {
        !self.is_default
    }
}

/// Serializes a bool as the integer flag `0`/`1`; accepts either form on input.
mod int_flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawFlag {
            Bool(bool),
            Int(i64),
        }

        match RawFlag::deserialize(deserializer)? {
            RawFlag::Bool(b) => Ok(b),
            RawFlag::Int(0) => Ok(false),
            RawFlag::Int(1) => Ok(true),
            RawFlag::Int(n) => Err(de::Error::custom(format!(
                "isDefault must be 0 or 1, got {}",
                n
            ))),
        }
    }
}

/// Request body for creating a custom wire type.
///
/// Any client-supplied `isDefault` is ignored; new records are always custom.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateWireTypeRequest {
    pub name: String,
    #[schema(value_type = f64, example = 21.3)]
    pub ratio: Ratio,
}

/// Request body for updating a custom wire type's name and ratio.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateWireTypeRequest {
    pub name: String,
    #[schema(value_type = f64, example = 21.3)]
    pub ratio: Ratio,
}

/// Trim a wire type name and check it is non-empty and not too long.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("name must not be empty".to_string()));
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(Error::InvalidInput(format!(
            "name must be at most {} characters",
            NAME_MAX_LEN
        )));
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// SCOPE
// =============================================================================

/// Visibility boundary for custom records and id uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogScope {
    /// Single catalog shared by every caller.
    Shared,
    /// Custom catalog belonging to one browser/user.
    Owner(Uuid),
}

impl CatalogScope {
    /// Owner id for custom records created in this scope.
    pub fn owner_id(&self) -> Option<Uuid> {
        match self {
            CatalogScope::Shared => None,
            CatalogScope::Owner(id) => Some(*id),
        }
    }

    /// Whether a record is visible from this scope.
    pub fn can_see(&self, wire_type: &WireType) -> bool {
        match self {
            CatalogScope::Shared => true,
            CatalogScope::Owner(id) => wire_type.is_default || wire_type.owner_id == Some(*id),
        }
    }
}

impl fmt::Display for CatalogScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogScope::Shared => write!(f, "shared"),
            CatalogScope::Owner(id) => write!(f, "owner:{}", id),
        }
    }
}

// =============================================================================
// CALCULATION
// =============================================================================

/// Unit of the weight entered by the caller.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Oz,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Lbs => write!(f, "lbs"),
            WeightUnit::Oz => write!(f, "oz"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lbs" => Ok(WeightUnit::Lbs),
            "oz" => Ok(WeightUnit::Oz),
            other => Err(Error::InvalidInput(format!(
                "weightUnit must be 'lbs' or 'oz', got '{}'",
                other
            ))),
        }
    }
}

/// Request body for `POST /api/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub wire_type_id: i64,
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
}

/// Result of a length calculation. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub wire_type: WireType,
    /// Weight as entered, in `weight_unit`.
    pub weight: f64,
    pub weight_unit: WeightUnit,
    /// Remaining wire length in feet, unrounded.
    pub length: f64,
    /// Length of a full standard roll in feet.
    pub reference_length: f64,
    /// Feet missing from a full roll; negative when the spool holds more.
    pub remaining_from_full_roll: f64,
}
