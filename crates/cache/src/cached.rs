//! Memoizing function wrapper.

use std::collections::HashMap;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::Decimal;

use crate::context::{FunctionId, with_context};
use crate::key::{CacheKey, CacheKeyed};
use crate::store::FunctionCache;

static NEXT_FUNCTION_ID: AtomicU64 = AtomicU64::new(1);

/// Handle for one memoized function.
///
/// Usually declared as a `static` next to the function it wraps:
///
/// ```
/// use fxspace_cache::CachedFn;
///
/// static ADD1: CachedFn = CachedFn::new("add1");
///
/// fn add1(n: i64) -> i64 {
///     ADD1.call(n, |n| n + 1)
/// }
///
/// assert_eq!(add1(1), 2);
/// assert_eq!(fxspace_cache::size(Some(&ADD1)).unwrap(), 1);
/// ```
///
/// The cache behind a handle is created per thread on its first call from that thread.
pub struct CachedFn {
    name: &'static str,
    size_multiplier: Decimal,
    id: OnceLock<FunctionId>,
}

impl CachedFn {
    /// Creates a handle with a size multiplier of 1.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self::with_size_multiplier(name, Decimal::ONE)
    }

    /// Creates a handle whose capacity is `floor(base_size * size_multiplier)`.
    #[must_use]
    pub const fn with_size_multiplier(name: &'static str, size_multiplier: Decimal) -> Self {
        Self {
            name,
            size_multiplier,
            id: OnceLock::new(),
        }
    }

    /// Name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Multiplier applied to the thread's base size.
    #[must_use]
    pub const fn size_multiplier(&self) -> Decimal {
        self.size_multiplier
    }

    pub(crate) fn id(&self) -> FunctionId {
        *self
            .id
            .get_or_init(|| FunctionId(NEXT_FUNCTION_ID.fetch_add(1, Ordering::Relaxed)))
    }

    /// Calls `func(args)`, memoizing the result in the calling thread's cache.
    pub fn call<A, R, F>(&self, args: A, func: F) -> R
    where
        A: CacheKeyed,
        R: Clone + 'static,
        F: FnOnce(A) -> R,
    {
        let Some(key) = Self::key_if_enabled(&args) else {
            return func(args);
        };
        if let Some(hit) = self.lookup::<R>(&key) {
            return hit;
        }

        let result = func(args);
        self.store(key, result.clone());
        result
    }

    /// Like [`CachedFn::call`], but only `Ok` results are memoized.
    pub fn try_call<A, T, E, F>(&self, args: A, func: F) -> Result<T, E>
    where
        A: CacheKeyed,
        T: Clone + 'static,
        F: FnOnce(A) -> Result<T, E>,
    {
        let Some(key) = Self::key_if_enabled(&args) else {
            return func(args);
        };
        if let Some(hit) = self.lookup::<T>(&key) {
            return Ok(hit);
        }

        let value = func(args)?;
        self.store(key, value.clone());
        Ok(value)
    }

    fn key_if_enabled<A: CacheKeyed>(args: &A) -> Option<CacheKey> {
        let enabled = with_context(|context| context.config.enabled);
        enabled.then(|| CacheKey::new(args))
    }

    fn lookup<R: Clone + 'static>(&self, key: &CacheKey) -> Option<R> {
        with_context(|context| {
            let hit = self
                .function_cache(&mut context.registry)
                .get(key)
                .and_then(|value| value.downcast_ref::<R>())
                .cloned();
            tracing::trace!(function = self.name, hit = hit.is_some(), "cache lookup");
            hit
        })
    }

    fn store<R: 'static>(&self, key: CacheKey, value: R) {
        with_context(|context| {
            let base_size = context.config.base_size;
            let cache = self.function_cache(&mut context.registry);
            let capacity = cache.capacity(base_size);
            cache.insert(key, Box::new(value), capacity);
        });
    }

    fn function_cache<'a>(
        &self,
        registry: &'a mut HashMap<FunctionId, FunctionCache>,
    ) -> &'a mut FunctionCache {
        registry.entry(self.id()).or_insert_with(|| {
            tracing::debug!(function = self.name, "created function cache");
            FunctionCache::new(self.name, self.size_multiplier)
        })
    }
}

impl std::fmt::Debug for CachedFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedFn")
            .field("name", &self.name)
            .field("size_multiplier", &self.size_multiplier)
            .finish_non_exhaustive()
    }
}
