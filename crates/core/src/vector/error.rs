//! Vector error types.
//!
//! Every failure of the vector engine belongs to one coarse [`ErrorKind`], so callers
//! can branch on the category without matching every variant.

use fxspace_shared::NumericError;
use thiserror::Error;

/// Result type alias using `VectorError`.
pub type VectorResult<T> = Result<T, VectorError>;

/// Coarse classification of a [`VectorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operands live in different spaces, or a currency is not an axis.
    Space,
    /// A forex constraint would be broken.
    Integrity,
    /// An argument is not an accepted numeric input.
    Type,
    /// Malformed text or an unrepresentable value.
    Value,
    /// Division by zero or decimal overflow.
    Arithmetic,
}

/// Errors that can occur during vector construction, arithmetic and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    // ========== Space Errors ==========
    /// Operands belong to spaces with different axes.
    #[error("Vectors belong to different spaces: {left} and {right}")]
    SpaceMismatch {
        /// Space of the left operand.
        left: String,
        /// Space of the right operand.
        right: String,
    },

    /// Currency code is not an axis of the space.
    #[error("Currency {code} is not an axis of {space}")]
    UnknownAxis {
        /// The requested currency code.
        code: String,
        /// The space that was searched.
        space: String,
    },

    /// Component count does not match the space dimension.
    #[error("Expected {expected} components, got {actual}")]
    DimensionMismatch {
        /// Dimension of the space.
        expected: usize,
        /// Number of components supplied.
        actual: usize,
    },

    /// A space needs at least one axis.
    #[error("A currency space needs at least one axis")]
    EmptySpace,

    // ========== Integrity Errors ==========
    /// Forex constraint violated.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    // ========== Type Errors ==========
    /// Argument is not an accepted numeric input.
    #[error("Invalid numeric input: {0}")]
    InvalidType(#[from] NumericError),

    // ========== Value Errors ==========
    /// Serialized text or JSON could not be parsed.
    #[error("Malformed input {text:?}: {reason}")]
    Malformed {
        /// The offending input.
        text: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Quantization to the requested number of places is not representable.
    #[error("Cannot represent {value} with {decimal_places} decimal places")]
    Precision {
        /// The value being quantized.
        value: String,
        /// Requested number of fractional digits.
        decimal_places: u32,
    },

    // ========== Arithmetic Errors ==========
    /// Division by zero or decimal overflow.
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
}

impl VectorError {
    pub(crate) fn malformed(text: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SpaceMismatch { .. }
            | Self::UnknownAxis { .. }
            | Self::DimensionMismatch { .. }
            | Self::EmptySpace => ErrorKind::Space,
            Self::Integrity(_) => ErrorKind::Integrity,
            Self::InvalidType(_) => ErrorKind::Type,
            Self::Malformed { .. } | Self::Precision { .. } => ErrorKind::Value,
            Self::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }

    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::SpaceMismatch { .. } => "SPACE_MISMATCH",
            Self::UnknownAxis { .. } => "UNKNOWN_AXIS",
            Self::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            Self::EmptySpace => "EMPTY_SPACE",
            Self::Integrity(_) => "INTEGRITY_VIOLATION",
            Self::InvalidType(_) => "INVALID_TYPE",
            Self::Malformed { .. } => "MALFORMED_INPUT",
            Self::Precision { .. } => "PRECISION_ERROR",
            Self::Arithmetic(_) => "ARITHMETIC_ERROR",
        }
    }
}
