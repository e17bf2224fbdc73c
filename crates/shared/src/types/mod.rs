//! Common types used across the workspace.

pub mod canonical;
pub mod numeric;

pub use canonical::{parse_decimal, to_canonical_string};
pub use numeric::Numeric;
