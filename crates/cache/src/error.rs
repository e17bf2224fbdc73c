//! Cache error types.

use thiserror::Error;

/// Result type alias using `CacheError`.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors raised by the cache introspection and configuration API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The function has no cache in the calling thread (never wrapped, or never called
    /// from this thread).
    #[error("No cache found for function {0}")]
    NotFound(String),

    /// `set_base_size` received a value that is not convertible to an integer.
    #[error("Invalid base size: {0}")]
    InvalidBaseSize(String),

    /// A stored entry was requested as a different result type.
    #[error("Cached values of {function} are not of type {requested}")]
    TypeMismatch {
        /// Name of the cached function.
        function: String,
        /// Requested result type.
        requested: &'static str,
    },
}

impl CacheError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "CACHE_NOT_FOUND",
            Self::InvalidBaseSize(_) => "INVALID_BASE_SIZE",
            Self::TypeMismatch { .. } => "CACHE_TYPE_MISMATCH",
        }
    }
}
