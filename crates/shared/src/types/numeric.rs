//! Accepted numeric inputs.
//!
//! CRITICAL: All arithmetic happens on `rust_decimal::Decimal`. Callers may hand in
//! integers, binary floats, decimals or numeric text; each is converted exactly once,
//! at the boundary, by [`Numeric::to_decimal`].

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;

use super::canonical::parse_decimal;
use crate::error::{NumericError, NumericResult};

/// A numeric value in one of the accepted input representations.
///
/// The representation is kept as given so that two inputs with the same value but a
/// different concrete type (or a different decimal scale) stay distinguishable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNumeric")]
pub enum Numeric {
    /// Integer.
    Int(i64),
    /// Binary floating point.
    Float(f64),
    /// Exact decimal, scale preserved.
    Decimal(Decimal),
    /// Numeric text such as `"1.25"` or `"1E+3"`.
    Text(String),
}

/// Shapes a rate may take in JSON documents.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawNumeric> for Numeric {
    fn from(raw: RawNumeric) -> Self {
        match raw {
            RawNumeric::Int(value) => Self::Int(value),
            RawNumeric::Float(value) => Self::Float(value),
            RawNumeric::Text(value) => Self::Text(value),
        }
    }
}

impl Numeric {
    /// Converts the input to an exact decimal.
    ///
    /// Floats convert through their shortest round-trip representation, so `0.01`
    /// becomes exactly `0.01`.
    pub fn to_decimal(&self) -> NumericResult<Decimal> {
        match self {
            Self::Int(value) => Ok(Decimal::from(*value)),
            Self::Float(value) => {
                if !value.is_finite() {
                    return Err(NumericError::NonFinite(value.to_string()));
                }
                Decimal::from_f64(*value).ok_or_else(|| NumericError::OutOfRange(value.to_string()))
            }
            Self::Decimal(value) => Ok(*value),
            Self::Text(text) => parse_decimal(text),
        }
    }

    /// Returns the name of the representation, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
        }
    }
}

impl std::fmt::Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
        }
    }
}

macro_rules! numeric_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Numeric {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

numeric_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! numeric_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Numeric {
                fn from(value: $ty) -> Self {
                    i64::try_from(value).map_or_else(|_| Self::Decimal(Decimal::from(value)), Self::Int)
                }
            }
        )*
    };
}

numeric_from_wide_int!(u64, usize);

impl From<f32> for Numeric {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Numeric {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
