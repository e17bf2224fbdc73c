//! Construction, products and conversion.
//!
//! CRITICAL: Rounding strategy:
//! - `evaluate` and `convert` never round; results are only normalized
//! - `gamma` quantizes with banker's rounding (round half to even)

use std::sync::Arc;

use fxspace_cache::CachedFn;
use fxspace_shared::Numeric;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{VectorError, VectorResult};
use super::forex::ForexVector;
use super::money::{MoneyVector, VectorKind};
use super::space::CurrencySpace;

/// Decimal places `gamma` quantizes to by default.
pub const DEFAULT_GAMMA_PLACES: u32 = 17;

/// Largest number of decimal places the decimal type can hold.
pub const MAX_DECIMAL_PLACES: u32 = 28;

static ASSET: CachedFn = CachedFn::new("asset");
static BASIS_VECTOR: CachedFn = CachedFn::new("basis_vector");
static DOT: CachedFn = CachedFn::new("dot");
static GAMMA: CachedFn = CachedFn::new("gamma");
static EVALUATE: CachedFn = CachedFn::new("evaluate");
static CONVERT: CachedFn = CachedFn::new("convert");

fn rudimentary(space: &Arc<CurrencySpace>, index: usize, value: Decimal) -> MoneyVector {
    let mut components = vec![Decimal::ZERO; space.dim()];
    components[index] = value;
    MoneyVector::from_parts(Arc::clone(space), components, VectorKind::Money)
}

/// A vector holding `amount` of `iso_code` and nothing else.
///
/// # Errors
///
/// - [`VectorError::InvalidType`] if `amount` is not a number
/// - [`VectorError::UnknownAxis`] if `iso_code` is not an axis of `space`
pub fn asset(
    amount: impl Into<Numeric>,
    iso_code: &str,
    space: &Arc<CurrencySpace>,
) -> VectorResult<MoneyVector> {
    ASSET.try_call(
        (amount.into(), iso_code, space.as_ref()),
        |(amount, iso_code, _)| -> VectorResult<MoneyVector> {
            let value = amount.to_decimal()?;
            let index = space.require_axis(iso_code)?;
            Ok(rudimentary(space, index, value))
        },
    )
}

/// The unit vector of `iso_code`.
///
/// # Errors
///
/// Returns [`VectorError::UnknownAxis`] if `iso_code` is not an axis of `space`.
pub fn basis_vector(space: &Arc<CurrencySpace>, iso_code: &str) -> VectorResult<MoneyVector> {
    BASIS_VECTOR.try_call((space.as_ref(), iso_code), |(_, iso_code)| -> VectorResult<MoneyVector> {
        let index = space.require_axis(iso_code)?;
        Ok(rudimentary(space, index, Decimal::ONE))
    })
}

/// Sum of componentwise products.
///
/// # Errors
///
/// - [`VectorError::SpaceMismatch`] if the spaces differ
/// - [`VectorError::Arithmetic`] on decimal overflow
pub fn dot(v1: &MoneyVector, v2: &MoneyVector) -> VectorResult<Decimal> {
    DOT.try_call((v1, v2), |(v1, v2)| -> VectorResult<Decimal> {
        v1.require_same_space(v2)?;
        v1.components()
            .iter()
            .zip(v2.components())
            .try_fold(Decimal::ZERO, |total, (a, b)| {
                a.checked_mul(*b)
                    .and_then(|product| total.checked_add(product))
            })
            .ok_or_else(|| VectorError::Arithmetic("dot product overflowed".to_string()))
    })
}

/// Rebases `forex` so that `iso_code` has rate 1, with every rate quantized to
/// [`DEFAULT_GAMMA_PLACES`] places.
///
/// # Errors
///
/// Same as [`gamma_with_places`].
pub fn gamma(forex: &ForexVector, iso_code: &str) -> VectorResult<MoneyVector> {
    gamma_with_places(forex, iso_code, DEFAULT_GAMMA_PLACES)
}

/// Rebases `forex` so that `iso_code` has rate 1, with every rate quantized to exactly
/// `decimal_places` fractional digits using banker's rounding.
///
/// The result is a plain [`MoneyVector`]: quantizing can round a tiny rate to zero.
///
/// # Errors
///
/// - [`VectorError::UnknownAxis`] if `iso_code` is not an axis
/// - [`VectorError::Precision`] if a rate cannot carry `decimal_places` digits
/// - [`VectorError::Arithmetic`] on decimal overflow
pub fn gamma_with_places(
    forex: &ForexVector,
    iso_code: &str,
    decimal_places: u32,
) -> VectorResult<MoneyVector> {
    GAMMA.try_call(
        (forex, iso_code, decimal_places),
        |(forex, iso_code, decimal_places)| -> VectorResult<MoneyVector> {
            let index = forex.space().require_axis(iso_code)?;
            let rate = forex.components()[index];
            let components = forex
                .components()
                .iter()
                .map(|component| {
                    let rebased = component.checked_div(rate).ok_or_else(|| {
                        VectorError::Arithmetic(format!("cannot rebase {component} onto {rate}"))
                    })?;
                    quantize(rebased, decimal_places)
                })
                .collect::<VectorResult<Vec<_>>>()?;
            Ok(MoneyVector::from_parts(
                Arc::clone(forex.space()),
                components,
                VectorKind::Money,
            ))
        },
    )
}

fn quantize(value: Decimal, decimal_places: u32) -> VectorResult<Decimal> {
    let precision_error = || VectorError::Precision {
        value: value.to_string(),
        decimal_places,
    };
    if decimal_places > MAX_DECIMAL_PLACES {
        return Err(precision_error());
    }
    let mut quantized =
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);
    quantized.rescale(decimal_places);
    if quantized.scale() == decimal_places {
        Ok(quantized)
    } else {
        Err(precision_error())
    }
}

/// Value of `vector` in units of `target`: `dot(vector, forex) / forex[target]`.
///
/// The result is normalized. Its canonical text, the form [`store`](super::store)
/// writes, is [`to_canonical_string`](fxspace_shared::to_canonical_string) of the
/// value: `1E+3`, not the `1000` of `Decimal`'s `Display`.
///
/// # Errors
///
/// - [`VectorError::SpaceMismatch`] if the spaces differ
/// - [`VectorError::UnknownAxis`] if `target` is not an axis
/// - [`VectorError::Arithmetic`] on decimal overflow
pub fn evaluate(vector: &MoneyVector, target: &str, forex: &ForexVector) -> VectorResult<Decimal> {
    EVALUATE.try_call((vector, target, forex), |(vector, target, forex)| -> VectorResult<Decimal> {
        let index = forex.space().require_axis(target)?;
        let total = dot(vector, forex)?;
        total
            .checked_div(forex.components()[index])
            .map(|value| value.normalize())
            .ok_or_else(|| VectorError::Arithmetic(format!("cannot evaluate {total} in {target}")))
    })
}

/// Rudimentary vector holding `evaluate(vector, target, forex)` of `target`.
///
/// # Errors
///
/// Same as [`evaluate`].
pub fn convert(vector: &MoneyVector, target: &str, forex: &ForexVector) -> VectorResult<MoneyVector> {
    CONVERT.try_call((vector, target, forex), |(vector, target, forex)| -> VectorResult<MoneyVector> {
        let value = evaluate(vector, target, forex)?;
        let index = forex.space().require_axis(target)?;
        Ok(rudimentary(forex.space(), index, value))
    })
}
