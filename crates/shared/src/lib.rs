//! Shared types, errors, and configuration for fxspace.
//!
//! This crate provides common pieces used by the other crates:
//! - `Numeric`, the closed set of accepted numeric inputs
//! - Canonical decimal text rendering and parsing
//! - Numeric input errors
//! - Cache settings loading

pub mod config;
pub mod error;
pub mod types;

pub use config::CacheSettings;
pub use error::{NumericError, NumericResult};
pub use types::{Numeric, parse_decimal, to_canonical_string};
