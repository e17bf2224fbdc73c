//! Numeric input error types.

use thiserror::Error;

/// Result type alias using `NumericError`.
pub type NumericResult<T> = Result<T, NumericError>;

/// Errors raised while turning an accepted numeric input into an exact decimal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// Text that does not parse as a decimal number.
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    /// NaN or infinite binary float.
    #[error("Non-finite float: {0}")]
    NonFinite(String),

    /// Value outside the range of the exact decimal type.
    #[error("Number out of range: {0}")]
    OutOfRange(String),
}

impl NumericError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNumber(_) => "INVALID_NUMBER",
            Self::NonFinite(_) => "NON_FINITE",
            Self::OutOfRange(_) => "OUT_OF_RANGE",
        }
    }
}
