//! Exchange-rate vectors.
//!
//! A forex vector holds, per currency, the value of one unit of that currency in the
//! base currency. Every rate is strictly positive and the base rate is exactly 1.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use fxspace_cache::{CacheKeyed, CachedFn, KeyPart};
use fxspace_shared::Numeric;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{VectorError, VectorResult};
use super::money::{MoneyVector, VectorKind};
use super::space::CurrencySpace;

static FOREX: CachedFn = CachedFn::new("forex");

/// Rate table as published by rate providers: units of each currency per one `base`.
///
/// Unrelated fields of a JSON document (timestamps, disclaimers) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForexRates {
    /// Base currency code.
    pub base: String,
    /// Units of each currency per one unit of `base`.
    #[serde(default)]
    pub rates: BTreeMap<String, Numeric>,
}

impl ForexRates {
    /// Creates a rate table.
    pub fn new<I, K, N>(base: impl Into<String>, rates: I) -> Self
    where
        I: IntoIterator<Item = (K, N)>,
        K: Into<String>,
        N: Into<Numeric>,
    {
        Self {
            base: base.into(),
            rates: rates
                .into_iter()
                .map(|(code, rate)| (code.into(), rate.into()))
                .collect(),
        }
    }

    /// Parses a JSON rate document.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Malformed`] if the document is not valid JSON or lacks a
    /// `base`.
    pub fn from_json(json: &str) -> VectorResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            tracing::debug!(error = %e, "rejected forex rate document");
            VectorError::malformed(json, e.to_string())
        })
    }
}

/// A [`MoneyVector`] whose components are validated exchange rates.
///
/// Dereferences to [`MoneyVector`], so it takes part in every vector operation; the
/// results of arithmetic are plain money vectors. Equality compares the rates only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MoneyVector", into = "MoneyVector")]
pub struct ForexVector {
    vector: MoneyVector,
    base: usize,
}

impl ForexVector {
    /// The base currency, whose rate is exactly 1.
    ///
    /// Other currencies may also have rate 1; the base is the one the rates were
    /// quoted against.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.vector.space().axes()[self.base]
    }

    /// The underlying vector.
    #[must_use]
    pub fn into_inner(self) -> MoneyVector {
        self.vector
    }
}

impl Deref for ForexVector {
    type Target = MoneyVector;

    fn deref(&self) -> &MoneyVector {
        &self.vector
    }
}

impl TryFrom<MoneyVector> for ForexVector {
    type Error = VectorError;

    fn try_from(vector: MoneyVector) -> VectorResult<Self> {
        if let Some((axis, rate)) = vector.iter().find(|(_, rate)| *rate <= Decimal::ZERO) {
            return Err(VectorError::Integrity(format!(
                "forex rate for {axis} must be positive, got {rate}"
            )));
        }
        // Without quote metadata the first unit rate is taken as the base.
        let Some(base) = vector.components().iter().position(|rate| *rate == Decimal::ONE) else {
            return Err(VectorError::Integrity(
                "forex vector needs a base rate of exactly 1".to_string(),
            ));
        };
        Ok(Self {
            vector: vector.with_kind(VectorKind::Forex),
            base,
        })
    }
}

impl PartialEq for ForexVector {
    fn eq(&self, other: &Self) -> bool {
        self.vector == other.vector
    }
}

impl Eq for ForexVector {}

impl Hash for ForexVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vector.hash(state);
    }
}

impl From<ForexVector> for MoneyVector {
    fn from(forex: ForexVector) -> Self {
        forex.vector
    }
}

impl CacheKeyed for ForexVector {
    fn key_part(&self) -> KeyPart {
        KeyPart::Tagged(
            "ForexVector",
            vec![self.vector.key_part(), self.base.key_part()],
        )
    }
}

/// Builds a forex vector from a rate table.
///
/// `overrides` add or replace rates of `mapping`. Codes are case-insensitive. The base
/// gets rate 1 and every other currency `Y` gets `1 / rate(Y)`.
///
/// # Errors
///
/// - [`VectorError::Integrity`] if any supplied rate is zero or negative
/// - [`VectorError::InvalidType`] if a rate is not a number
pub fn forex<I, K, N>(mapping: &ForexRates, overrides: I) -> VectorResult<ForexVector>
where
    I: IntoIterator<Item = (K, N)>,
    K: AsRef<str>,
    N: Into<Numeric>,
{
    let mut rates: BTreeMap<String, Numeric> = mapping
        .rates
        .iter()
        .map(|(code, rate)| (code.to_uppercase(), rate.clone()))
        .collect();
    for (code, rate) in overrides {
        rates.insert(code.as_ref().to_uppercase(), rate.into());
    }
    let base = mapping.base.to_uppercase();
    let rates: Vec<(String, Numeric)> = rates.into_iter().collect();

    FOREX.try_call((base, rates), |(base, rates)| build_forex(&base, &rates))
}

fn build_forex(base: &str, rates: &[(String, Numeric)]) -> VectorResult<ForexVector> {
    let mut parsed = BTreeMap::new();
    for (code, rate) in rates {
        let value = rate.to_decimal()?;
        if value <= Decimal::ZERO {
            tracing::debug!(code = %code, rate = %rate, "rejected non-positive forex rate");
            return Err(VectorError::Integrity(format!(
                "rate for {code} must be positive, got {rate}"
            )));
        }
        parsed.insert(code.as_str(), value);
    }

    let space = Arc::new(CurrencySpace::new(
        std::iter::once(base).chain(parsed.keys().copied()),
    )?);
    let components = space
        .axes()
        .iter()
        .map(|axis| {
            if axis == base {
                return Ok(Decimal::ONE);
            }
            parsed
                .get(axis.as_str())
                .and_then(|rate| Decimal::ONE.checked_div(*rate))
                .ok_or_else(|| VectorError::Arithmetic(format!("cannot invert rate for {axis}")))
        })
        .collect::<VectorResult<Vec<_>>>()?;

    let base = space.require_axis(base)?;
    Ok(ForexVector {
        vector: MoneyVector::from_parts(space, components, VectorKind::Forex),
        base,
    })
}

/// The space spanned by the currencies of `forex`.
#[must_use]
pub fn space(forex: &ForexVector) -> Arc<CurrencySpace> {
    Arc::clone(forex.space())
}
