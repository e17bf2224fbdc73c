//! Text form of vectors: `AXIS;value:AXIS;value:...`.
//!
//! Axes appear in space order and values in canonical decimal text, so equal vectors
//! always store to the same string.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use fxspace_cache::CachedFn;
use fxspace_shared::{parse_decimal, to_canonical_string};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{VectorError, VectorResult};
use super::money::{MoneyVector, VectorKind};
use super::space::CurrencySpace;

const AXIS_SEPARATOR: char = ':';
const VALUE_SEPARATOR: char = ';';

static STORE: CachedFn = CachedFn::new("store");
static RESTORE: CachedFn = CachedFn::new("restore");

/// Serializes `vector` to its text form.
#[must_use]
pub fn store(vector: &MoneyVector) -> String {
    STORE.call(vector, |vector| vector.to_string())
}

/// Parses the text form produced by [`store`].
///
/// # Errors
///
/// Returns [`VectorError::Malformed`] when the text is empty, a segment is not
/// `AXIS;value`, a value is not a number, or the axes are not strictly ascending.
pub fn restore(text: &str) -> VectorResult<MoneyVector> {
    RESTORE.try_call(text, |text| {
        parse(text).inspect_err(|e| tracing::debug!(error = %e, "rejected stored vector"))
    })
}

fn parse(text: &str) -> VectorResult<MoneyVector> {
    if text.trim().is_empty() {
        return Err(VectorError::malformed(text, "empty text"));
    }

    let mut axes: Vec<String> = Vec::new();
    let mut components = Vec::new();
    for segment in text.split(AXIS_SEPARATOR) {
        let Some((axis, value)) = segment.split_once(VALUE_SEPARATOR) else {
            return Err(VectorError::malformed(
                text,
                format!("segment {segment:?} has no '{VALUE_SEPARATOR}'"),
            ));
        };
        if value.contains(VALUE_SEPARATOR) {
            return Err(VectorError::malformed(
                text,
                format!("segment {segment:?} has more than one '{VALUE_SEPARATOR}'"),
            ));
        }

        let axis = axis.trim().to_uppercase();
        if axis.is_empty() {
            return Err(VectorError::malformed(text, "empty axis"));
        }
        if axes.last().is_some_and(|previous| *previous >= axis) {
            return Err(VectorError::malformed(
                text,
                format!("axis {axis} is out of order or repeated"),
            ));
        }
        let value = parse_decimal(value)
            .map_err(|e| VectorError::malformed(text, format!("axis {axis}: {e}")))?;

        axes.push(axis);
        components.push(value);
    }

    let space = Arc::new(CurrencySpace::new(&axes)?);
    Ok(MoneyVector::from_parts(space, components, VectorKind::Money))
}

impl fmt::Display for MoneyVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (axis, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{AXIS_SEPARATOR}")?;
            }
            write!(f, "{axis}{VALUE_SEPARATOR}{}", to_canonical_string(value))?;
        }
        Ok(())
    }
}

impl FromStr for MoneyVector {
    type Err = VectorError;

    fn from_str(s: &str) -> VectorResult<Self> {
        restore(s)
    }
}

impl Serialize for MoneyVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MoneyVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        restore(&text).map_err(D::Error::custom)
    }
}
