//! Currency vector algebra.
//!
//! This module implements the vector model of money:
//! - Currency spaces (ordered sets of currency axes)
//! - Money vectors (one exact amount per axis)
//! - Forex vectors (validated exchange rates)
//! - Arithmetic, products, rebasing and conversion
//! - Text serialization
//!
//! Every non-trivial operation is memoized per thread through `fxspace-cache`.

pub mod algebra;
pub mod error;
pub mod forex;
pub mod money;
pub mod ops;
pub mod serialize;
pub mod space;

#[cfg(test)]
mod algebra_props;

pub use algebra::{
    DEFAULT_GAMMA_PLACES, MAX_DECIMAL_PLACES, asset, basis_vector, convert, dot, evaluate, gamma,
    gamma_with_places,
};
pub use error::{ErrorKind, VectorError, VectorResult};
pub use forex::{ForexRates, ForexVector, forex, space};
pub use money::{MoneyVector, VectorKind};
pub use serialize::{restore, store};
pub use space::CurrencySpace;
