//! Currency spaces.

use std::collections::BTreeSet;
use std::fmt;

use fxspace_cache::{CacheKeyed, KeyPart};

use super::error::{VectorError, VectorResult};

/// Ordered, deduplicated set of uppercase currency codes.
///
/// Axes are sorted lexicographically, so the position of a currency is the same in
/// every space that contains the same codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencySpace {
    axes: Box<[String]>,
}

impl CurrencySpace {
    /// Builds a space from currency codes in any case and order.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::EmptySpace`] when no code is given.
    pub fn new<I, S>(codes: I) -> VectorResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let axes: BTreeSet<String> = codes
            .into_iter()
            .map(|code| code.as_ref().to_uppercase())
            .collect();
        if axes.is_empty() {
            return Err(VectorError::EmptySpace);
        }
        Ok(Self {
            axes: axes.into_iter().collect(),
        })
    }

    /// Number of axes.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.axes.len()
    }

    /// Axis codes in order.
    #[must_use]
    pub fn axes(&self) -> &[String] {
        &self.axes
    }

    /// Position of `code`, compared case-insensitively.
    #[must_use]
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.axes.binary_search(&code.to_uppercase()).ok()
    }

    /// Returns true if `code` is an axis.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index_of(code).is_some()
    }

    pub(crate) fn require_axis(&self, code: &str) -> VectorResult<usize> {
        self.index_of(code).ok_or_else(|| VectorError::UnknownAxis {
            code: code.to_uppercase(),
            space: self.to_string(),
        })
    }
}

impl fmt::Display for CurrencySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencySpace({})", self.axes.join(", "))
    }
}

impl CacheKeyed for CurrencySpace {
    fn key_part(&self) -> KeyPart {
        KeyPart::Tagged(
            "CurrencySpace",
            self.axes.iter().map(|axis| KeyPart::Text(axis.clone())).collect(),
        )
    }
}
