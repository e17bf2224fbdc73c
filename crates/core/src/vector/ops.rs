//! Vector arithmetic.
//!
//! Operators work on references and return [`VectorResult`]:
//!
//! ```
//! use std::sync::Arc;
//! use fxspace_core::{CurrencySpace, asset};
//!
//! let space = Arc::new(CurrencySpace::new(["JPY", "USD"])?);
//! let total = (&asset(10, "USD", &space)? + &asset(100, "JPY", &space)?)?;
//! let doubled = (&total * 2)?;
//! assert_eq!(doubled.get("JPY"), Some(200.into()));
//! # Ok::<(), fxspace_core::VectorError>(())
//! ```
//!
//! Only a vector and a scalar can be multiplied, and only a vector can be divided by a
//! scalar; other combinations do not compile.

use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

use fxspace_cache::CachedFn;
use fxspace_shared::Numeric;
use rust_decimal::Decimal;

use super::error::{VectorError, VectorResult};
use super::forex::ForexVector;
use super::money::{MoneyVector, VectorKind};

static ADD: CachedFn = CachedFn::new("add");
static SUB: CachedFn = CachedFn::new("sub");
static MUL: CachedFn = CachedFn::new("mul");
static DIV: CachedFn = CachedFn::new("div");
static NEG: CachedFn = CachedFn::new("neg");

impl MoneyVector {
    fn zip_with(
        &self,
        rhs: &Self,
        op: fn(Decimal, Decimal) -> Option<Decimal>,
        name: &str,
    ) -> VectorResult<Self> {
        self.require_same_space(rhs)?;
        let components = self
            .components()
            .iter()
            .zip(rhs.components())
            .map(|(a, b)| op(*a, *b).ok_or_else(|| overflow(name, *a, *b)))
            .collect::<VectorResult<Vec<_>>>()?;
        Ok(Self::from_parts(
            self.space().clone(),
            components,
            VectorKind::Money,
        ))
    }

    fn scale_with(
        &self,
        scalar: Decimal,
        op: fn(Decimal, Decimal) -> Option<Decimal>,
        name: &str,
    ) -> VectorResult<Self> {
        let components = self
            .components()
            .iter()
            .map(|c| op(*c, scalar).ok_or_else(|| overflow(name, *c, scalar)))
            .collect::<VectorResult<Vec<_>>>()?;
        Ok(Self::from_parts(
            self.space().clone(),
            components,
            VectorKind::Money,
        ))
    }

    /// Componentwise sum.
    ///
    /// # Errors
    ///
    /// - [`VectorError::SpaceMismatch`] if the spaces differ
    /// - [`VectorError::Arithmetic`] on decimal overflow
    pub fn checked_add(&self, rhs: &Self) -> VectorResult<Self> {
        ADD.try_call((self, rhs), |(lhs, rhs)| {
            lhs.zip_with(rhs, Decimal::checked_add, "addition")
        })
    }

    /// Componentwise difference.
    ///
    /// # Errors
    ///
    /// Same as [`MoneyVector::checked_add`].
    pub fn checked_sub(&self, rhs: &Self) -> VectorResult<Self> {
        SUB.try_call((self, rhs), |(lhs, rhs)| {
            lhs.zip_with(rhs, Decimal::checked_sub, "subtraction")
        })
    }

    /// Scales every component by `scalar`.
    ///
    /// # Errors
    ///
    /// - [`VectorError::InvalidType`] if `scalar` is not a number
    /// - [`VectorError::Arithmetic`] on decimal overflow
    pub fn checked_mul(&self, scalar: impl Into<Numeric>) -> VectorResult<Self> {
        MUL.try_call((self, scalar.into()), |(vector, scalar)| -> VectorResult<Self> {
            vector.scale_with(scalar.to_decimal()?, Decimal::checked_mul, "multiplication")
        })
    }

    /// Divides every component by `scalar`.
    ///
    /// # Errors
    ///
    /// - [`VectorError::InvalidType`] if `scalar` is not a number
    /// - [`VectorError::Arithmetic`] on division by zero or decimal overflow
    pub fn checked_div(&self, scalar: impl Into<Numeric>) -> VectorResult<Self> {
        DIV.try_call((self, scalar.into()), |(vector, scalar)| -> VectorResult<Self> {
            let divisor = scalar.to_decimal()?;
            if divisor.is_zero() {
                return Err(VectorError::Arithmetic("division by zero".to_string()));
            }
            vector.scale_with(divisor, Decimal::checked_div, "division")
        })
    }

    /// Negates every component.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Integrity`] for exchange-rate vectors, whose rates must
    /// stay positive.
    pub fn checked_neg(&self) -> VectorResult<Self> {
        NEG.try_call(self, |vector| {
            if vector.kind() == VectorKind::Forex {
                return Err(VectorError::Integrity(
                    "forex vectors cannot be negated".to_string(),
                ));
            }
            let components: Vec<Decimal> = vector.components().iter().map(|c| -*c).collect();
            Ok(Self::from_parts(
                vector.space().clone(),
                components,
                VectorKind::Money,
            ))
        })
    }
}

fn overflow(name: &str, a: Decimal, b: Decimal) -> VectorError {
    VectorError::Arithmetic(format!("{name} of {a} and {b} overflowed"))
}

macro_rules! vector_binary_ops {
    ($(($lhs:ty, $rhs:ty)),* $(,)?) => {
        $(
            impl Add<&$rhs> for &$lhs {
                type Output = VectorResult<MoneyVector>;

                fn add(self, rhs: &$rhs) -> Self::Output {
                    self.checked_add(rhs)
                }
            }

            impl Sub<&$rhs> for &$lhs {
                type Output = VectorResult<MoneyVector>;

                fn sub(self, rhs: &$rhs) -> Self::Output {
                    self.checked_sub(rhs)
                }
            }
        )*
    };
}

vector_binary_ops!(
    (MoneyVector, MoneyVector),
    (MoneyVector, ForexVector),
    (ForexVector, MoneyVector),
    (ForexVector, ForexVector),
);

macro_rules! vector_scalar_ops {
    ($($vector:ty),*) => {
        $(
            impl<N: Into<Numeric>> Mul<N> for &$vector {
                type Output = VectorResult<MoneyVector>;

                fn mul(self, scalar: N) -> Self::Output {
                    self.checked_mul(scalar)
                }
            }

            impl<N: Into<Numeric>> Div<N> for &$vector {
                type Output = VectorResult<MoneyVector>;

                fn div(self, scalar: N) -> Self::Output {
                    self.checked_div(scalar)
                }
            }

            impl Neg for &$vector {
                type Output = VectorResult<MoneyVector>;

                fn neg(self) -> Self::Output {
                    self.checked_neg()
                }
            }
        )*
    };
}

vector_scalar_ops!(MoneyVector, ForexVector);

macro_rules! scalar_times_vector {
    ($($scalar:ty),*) => {
        $(
            impl Mul<&MoneyVector> for $scalar {
                type Output = VectorResult<MoneyVector>;

                fn mul(self, vector: &MoneyVector) -> Self::Output {
                    vector.checked_mul(self)
                }
            }

            impl Mul<&ForexVector> for $scalar {
                type Output = VectorResult<MoneyVector>;

                fn mul(self, vector: &ForexVector) -> Self::Output {
                    vector.checked_mul(self)
                }
            }
        )*
    };
}

scalar_times_vector!(i32, i64, f64, Decimal);

impl<'a> Sum<&'a MoneyVector> for VectorResult<MoneyVector> {
    /// Sums a non-empty sequence; use [`MoneyVector::sum`] when it may be empty.
    fn sum<I: Iterator<Item = &'a MoneyVector>>(mut iter: I) -> Self {
        let first = iter.next().ok_or_else(|| {
            VectorError::Arithmetic("cannot sum an empty sequence without a space".to_string())
        })?;
        iter.try_fold(first.clone(), |total, vector| total.checked_add(vector))
    }
}
