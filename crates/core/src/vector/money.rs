//! Money vectors.
//!
//! CRITICAL: components are exact decimals and never go through binary floats. A
//! vector is immutable; every operation builds a new one.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use fxspace_cache::{CacheKeyed, KeyPart};
use rust_decimal::Decimal;

use super::error::{VectorError, VectorResult};
use super::space::CurrencySpace;

/// What a vector's components represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorKind {
    /// Amounts of money.
    Money,
    /// Exchange rates; see [`ForexVector`](super::ForexVector).
    Forex,
}

impl VectorKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Money => "MoneyVector",
            Self::Forex => "ForexVector",
        }
    }
}

/// A point in a [`CurrencySpace`]: one exact decimal per axis.
///
/// Two vectors are equal when their spaces have the same axes and every component is
/// numerically equal, so `2.00` and `2.0000` compare equal. The kind is not compared.
#[derive(Debug, Clone)]
pub struct MoneyVector {
    space: Arc<CurrencySpace>,
    components: Arc<[Decimal]>,
    kind: VectorKind,
}

impl MoneyVector {
    /// Builds a vector without checking the dimension.
    pub(crate) fn from_parts(
        space: Arc<CurrencySpace>,
        components: impl Into<Arc<[Decimal]>>,
        kind: VectorKind,
    ) -> Self {
        Self {
            space,
            components: components.into(),
            kind,
        }
    }

    /// Builds a vector from one component per axis of `space`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] when the counts differ.
    pub fn from_components(
        space: Arc<CurrencySpace>,
        components: impl Into<Vec<Decimal>>,
    ) -> VectorResult<Self> {
        let components = components.into();
        if components.len() != space.dim() {
            return Err(VectorError::DimensionMismatch {
                expected: space.dim(),
                actual: components.len(),
            });
        }
        Ok(Self::from_parts(space, components, VectorKind::Money))
    }

    /// The zero vector of `space`.
    #[must_use]
    pub fn zero(space: Arc<CurrencySpace>) -> Self {
        let components = vec![Decimal::ZERO; space.dim()];
        Self::from_parts(space, components, VectorKind::Money)
    }

    /// The space this vector lives in.
    #[must_use]
    pub const fn space(&self) -> &Arc<CurrencySpace> {
        &self.space
    }

    /// Kind tag.
    #[must_use]
    pub const fn kind(&self) -> VectorKind {
        self.kind
    }

    /// Number of components.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.components.len()
    }

    /// Components in axis order.
    #[must_use]
    pub fn components(&self) -> &[Decimal] {
        &self.components
    }

    /// Component at position `index`.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<Decimal> {
        self.components.get(index).copied()
    }

    /// Component for currency `code`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<Decimal> {
        self.space.index_of(code).and_then(|index| self.component(index))
    }

    /// `(axis, component)` pairs in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.space
            .axes()
            .iter()
            .map(String::as_str)
            .zip(self.components.iter().copied())
    }

    fn non_zero(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.components.iter().copied().filter(|c| !c.is_zero())
    }

    /// Exactly one non-zero component.
    #[must_use]
    pub fn is_rudimentary(&self) -> bool {
        self.non_zero().count() == 1
    }

    /// More than one non-zero component.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.non_zero().count() > 1
    }

    /// Rudimentary, with the sole non-zero component equal to 1.
    #[must_use]
    pub fn is_basis(&self) -> bool {
        let mut non_zero = self.non_zero();
        matches!((non_zero.next(), non_zero.next()), (Some(one), None) if one == Decimal::ONE)
    }

    /// Every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.non_zero().next().is_none()
    }

    /// Unary plus: the vector itself.
    #[must_use]
    pub fn positive(&self) -> Self {
        self.clone()
    }

    pub(crate) fn same_space(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.space, &other.space) || self.space == other.space
    }

    pub(crate) fn require_same_space(&self, other: &Self) -> VectorResult<()> {
        if self.same_space(other) {
            Ok(())
        } else {
            Err(VectorError::SpaceMismatch {
                left: self.space.to_string(),
                right: other.space.to_string(),
            })
        }
    }

    pub(crate) fn with_kind(self, kind: VectorKind) -> Self {
        Self { kind, ..self }
    }

    /// Sums `vectors` in `space`; an empty sequence gives the zero vector.
    ///
    /// # Errors
    ///
    /// Fails like repeated [`MoneyVector::checked_add`].
    pub fn sum<'a, I>(space: &Arc<CurrencySpace>, vectors: I) -> VectorResult<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        vectors
            .into_iter()
            .try_fold(Self::zero(Arc::clone(space)), |total, vector| {
                total.checked_add(vector)
            })
    }
}

impl PartialEq for MoneyVector {
    fn eq(&self, other: &Self) -> bool {
        self.same_space(other) && self.components == other.components
    }
}

impl Eq for MoneyVector {}

impl Hash for MoneyVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.space.hash(state);
        // Decimal hashes by value, consistent with the equality above.
        self.components.hash(state);
    }
}

impl CacheKeyed for MoneyVector {
    fn key_part(&self) -> KeyPart {
        KeyPart::Tagged(
            self.kind.name(),
            vec![
                self.space.key_part(),
                KeyPart::Seq(self.components.iter().map(|c| KeyPart::decimal(*c)).collect()),
            ],
        )
    }
}
