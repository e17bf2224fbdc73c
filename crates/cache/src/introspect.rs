//! Introspection and configuration of the calling thread's caches.
//!
//! Every function here reads or writes only the calling thread's state.

use std::any::{Any, type_name};

use fxspace_shared::Numeric;
use rust_decimal::prelude::ToPrimitive;

use crate::cached::CachedFn;
use crate::context::{CacheConfig, with_context};
use crate::error::{CacheError, CacheResult};
use crate::store::FunctionCache;

fn with_function_cache<T>(
    func: &CachedFn,
    f: impl FnOnce(&mut FunctionCache, &CacheConfig) -> CacheResult<T>,
) -> CacheResult<T> {
    with_context(|context| {
        let config = context.config;
        context
            .registry
            .get_mut(&func.id())
            .ok_or_else(|| CacheError::NotFound(func.name().to_string()))
            .and_then(|cache| f(cache, &config))
    })
}

fn downcast<R: Clone + 'static>(func: &CachedFn, value: Option<&dyn Any>) -> CacheResult<Option<R>> {
    value
        .map(|value| {
            value
                .downcast_ref::<R>()
                .cloned()
                .ok_or_else(|| CacheError::TypeMismatch {
                    function: func.name().to_string(),
                    requested: type_name::<R>(),
                })
        })
        .transpose()
}

/// Number of cached entries for `func`, or across all caches of this thread.
pub fn size(func: Option<&CachedFn>) -> CacheResult<usize> {
    match func {
        Some(func) => with_function_cache(func, |cache, _| Ok(cache.len())),
        None => Ok(with_context(|context| {
            context.registry.values().map(FunctionCache::len).sum()
        })),
    }
}

/// Capacity of `func`'s cache under this thread's current base size.
pub fn max_size(func: &CachedFn) -> CacheResult<usize> {
    with_function_cache(func, |cache, config| Ok(cache.capacity(config.base_size)))
}

/// Value of the least recently used entry of `func`.
pub fn head<R: Clone + 'static>(func: &CachedFn) -> CacheResult<Option<R>> {
    with_function_cache(func, |cache, _| downcast(func, cache.head()))
}

/// Value of the most recently used entry of `func`.
pub fn tail<R: Clone + 'static>(func: &CachedFn) -> CacheResult<Option<R>> {
    with_function_cache(func, |cache, _| downcast(func, cache.tail()))
}

/// Clears `func`'s cache, or every cache of this thread.
pub fn invalidate(func: Option<&CachedFn>) -> CacheResult<()> {
    match func {
        Some(func) => with_function_cache(func, |cache, _| {
            cache.clear();
            tracing::debug!(function = func.name(), "invalidated function cache");
            Ok(())
        }),
        None => {
            with_context(|context| context.registry.values_mut().for_each(FunctionCache::clear));
            tracing::debug!("invalidated all function caches");
            Ok(())
        }
    }
}

/// Turns memoization on or off for this thread.
pub fn enable(enabled: bool) {
    with_context(|context| context.config.enabled = enabled);
    tracing::debug!(enabled, "cache enabled flag changed");
}

/// Whether memoization is on for this thread.
pub fn is_enabled() -> bool {
    with_context(|context| context.config.enabled)
}

/// This thread's base size.
pub fn get_base_size() -> usize {
    with_context(|context| context.config.base_size)
}

/// Sets this thread's base size.
///
/// Integers, floats and decimals are truncated toward zero. Text, negative and
/// non-finite values are rejected.
pub fn set_base_size(value: impl Into<Numeric>) -> CacheResult<()> {
    let value = value.into();
    let invalid = || CacheError::InvalidBaseSize(format!("{value} ({})", value.type_name()));

    if matches!(value, Numeric::Text(_)) {
        return Err(invalid());
    }
    let base_size = value
        .to_decimal()
        .ok()
        .map(|value| value.trunc())
        .and_then(|truncated| truncated.to_usize())
        .ok_or_else(invalid)?;

    with_context(|context| context.config.base_size = base_size);
    tracing::debug!(base_size, "cache base size changed");
    Ok(())
}

/// This thread's full config.
pub fn config() -> CacheConfig {
    with_context(|context| context.config)
}
