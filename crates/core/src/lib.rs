//! Currency vector algebra for fxspace.
//!
//! Amounts of money are vectors over a space of currencies, and exchange rates are
//! vectors of the same kind. Adding, converting and comparing amounts is plain linear
//! algebra over exact decimals.
//!
//! ```
//! use fxspace_core::{ForexRates, asset, evaluate, forex, space};
//!
//! let rates = forex(&ForexRates::new("USD", [("JPY", 100)]), [("EUR", "0.4")])?;
//! let space = space(&rates);
//! let wallet = (&asset(10, "USD", &space)? + &asset(500, "JPY", &space)?)?;
//! assert_eq!(evaluate(&wallet, "EUR", &rates)?.to_string(), "6");
//! # Ok::<(), fxspace_core::VectorError>(())
//! ```
//!
//! # Modules
//!
//! - `vector` - Spaces, vectors, algebra and serialization
//! - `cache` - Re-export of `fxspace-cache` for introspecting the memoized operations

pub mod vector;

pub use fxspace_cache as cache;
pub use vector::*;
