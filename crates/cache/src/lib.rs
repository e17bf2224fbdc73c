//! Thread-local memoization for fxspace.
//!
//! Functions are memoized through a [`CachedFn`] handle. Each thread keeps its own
//! LRU store per handle and its own [`CacheConfig`]; nothing is shared across
//! threads. Keys distinguish argument types and decimal precision, so `2`, `2.0`
//! and `dec!(2.00)` are never served each other's results.
//!
//! # Modules
//!
//! - `cached` - The memoizing wrapper
//! - `context` - Per-thread config, registry and spawn helpers
//! - `introspect` - Size, head/tail, invalidation and configuration
//! - `key` - Exactness-aware keys
//! - `store` - Per-function LRU storage

pub mod cached;
pub mod context;
pub mod error;
pub mod introspect;
pub mod key;
pub mod store;

pub use cached::CachedFn;
pub use context::{CacheConfig, ConfigSnapshot, spawn, spawn_scoped};
pub use error::{CacheError, CacheResult};
pub use introspect::{
    config, enable, get_base_size, head, invalidate, is_enabled, max_size, set_base_size, size,
    tail,
};
pub use key::{CacheKey, CacheKeyed, KeyPart};
pub use store::FunctionCache;
