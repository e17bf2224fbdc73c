//! Per-function LRU storage.

use std::any::Any;
use std::hash::BuildHasher;

use lru::{DefaultHasher, LruCache};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::key::CacheKey;

/// LRU map from call keys to stored results for one cached function.
///
/// The store itself is unbounded; [`FunctionCache::insert`] enforces the capacity it is
/// given, so a change of the thread's base size takes effect on the next insertion.
pub struct FunctionCache<S = DefaultHasher> {
    name: &'static str,
    size_multiplier: Decimal,
    entries: LruCache<CacheKey, Box<dyn Any>, S>,
}

impl FunctionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(name: &'static str, size_multiplier: Decimal) -> Self {
        Self::with_hasher(name, size_multiplier, DefaultHasher::default())
    }
}

impl<S: BuildHasher> FunctionCache<S> {
    /// Creates an empty cache using `hasher` for key buckets.
    #[must_use]
    pub fn with_hasher(name: &'static str, size_multiplier: Decimal, hasher: S) -> Self {
        Self {
            name,
            size_multiplier,
            entries: LruCache::unbounded_with_hasher(hasher),
        }
    }

    /// Name of the cached function.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Maximum entry count for the given base size: `floor(base_size * multiplier)`.
    #[must_use]
    pub fn capacity(&self, base_size: usize) -> usize {
        Decimal::from(base_size)
            .checked_mul(self.size_multiplier)
            .map_or(usize::MAX, |scaled| {
                scaled.max(Decimal::ZERO).floor().to_usize().unwrap_or(usize::MAX)
            })
    }

    /// Looks up `key`, marking the entry most recently used on a hit.
    pub fn get(&mut self, key: &CacheKey) -> Option<&dyn Any> {
        self.entries.get(key).map(|value| &**value)
    }

    /// Stores `value` as most recently used and evicts down to `capacity`.
    ///
    /// Returns the number of evicted entries.
    pub fn insert(&mut self, key: CacheKey, value: Box<dyn Any>, capacity: usize) -> usize {
        self.entries.put(key, value);

        let mut evicted = 0;
        while self.entries.len() > capacity {
            if self.entries.pop_lru().is_none() {
                break;
            }
            evicted += 1;
        }
        if evicted > 0 {
            tracing::trace!(function = self.name, evicted, capacity, "evicted cache entries");
        }
        evicted
    }

    /// Value of the least recently used entry.
    #[must_use]
    pub fn head(&self) -> Option<&dyn Any> {
        self.entries.peek_lru().map(|(_, value)| &**value)
    }

    /// Value of the most recently used entry.
    #[must_use]
    pub fn tail(&self) -> Option<&dyn Any> {
        // Iteration runs from most to least recently used.
        self.entries.iter().next().map(|(_, value)| &**value)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
