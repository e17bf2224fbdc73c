//! Per-thread cache context.
//!
//! Each thread owns one [`CacheConfig`] and one registry of function caches. Nothing
//! here is shared between threads: a child thread started through [`spawn`] or
//! [`spawn_scoped`] receives a copy of its parent's config taken before the child runs,
//! and always starts with an empty registry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::thread::{JoinHandle, Scope, ScopedJoinHandle};

use fxspace_shared::CacheSettings;

use crate::store::FunctionCache;

/// Identity of a cached function, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(pub(crate) u64);

/// Memoization settings of one thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Whether cached functions consult their caches.
    pub enabled: bool,
    /// Base entry count, scaled per function by its size multiplier.
    pub base_size: usize,
}

impl From<CacheSettings> for CacheConfig {
    fn from(settings: CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            base_size: settings.base_size,
        }
    }
}

impl Default for CacheConfig {
    /// The process-wide defaults from [`CacheSettings::process_defaults`].
    fn default() -> Self {
        CacheSettings::process_defaults().into()
    }
}

/// Config and registry owned by the current thread.
pub(crate) struct CacheContext {
    pub(crate) config: CacheConfig,
    pub(crate) registry: HashMap<FunctionId, FunctionCache>,
}

impl CacheContext {
    fn new(config: CacheConfig) -> Self {
        Self {
            config,
            registry: HashMap::new(),
        }
    }
}

thread_local! {
    static CONTEXT: RefCell<CacheContext> = RefCell::new(CacheContext::new(CacheConfig::default()));
}

/// Runs `f` with exclusive access to this thread's context.
///
/// Callers must not run user code inside `f`; cached functions may call other cached
/// functions.
pub(crate) fn with_context<T>(f: impl FnOnce(&mut CacheContext) -> T) -> T {
    CONTEXT.with(|context| f(&mut context.borrow_mut()))
}

/// A value copy of one thread's [`CacheConfig`], for handing to another thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSnapshot(CacheConfig);

impl ConfigSnapshot {
    /// Captures the calling thread's current config.
    #[must_use]
    pub fn capture() -> Self {
        Self(with_context(|context| context.config))
    }

    /// The captured config.
    #[must_use]
    pub const fn config(&self) -> CacheConfig {
        self.0
    }

    /// Replaces the calling thread's config with the captured one.
    ///
    /// The thread's registry is left untouched.
    pub fn install(self) {
        with_context(|context| context.config = self.0);
        tracing::debug!(
            enabled = self.0.enabled,
            base_size = self.0.base_size,
            "installed cache config snapshot"
        );
    }
}

/// Spawns a thread whose cache config starts as a copy of the caller's.
///
/// The snapshot is taken before the thread is created, so later changes in either
/// thread never reach the other.
pub fn spawn<F, T>(f: F) -> JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let snapshot = ConfigSnapshot::capture();
    std::thread::spawn(move || {
        snapshot.install();
        f()
    })
}

/// Scoped variant of [`spawn`].
pub fn spawn_scoped<'scope, 'env, F, T>(
    scope: &'scope Scope<'scope, 'env>,
    f: F,
) -> ScopedJoinHandle<'scope, T>
where
    F: FnOnce() -> T + Send + 'scope,
    T: Send + 'scope,
{
    let snapshot = ConfigSnapshot::capture();
    scope.spawn(move || {
        snapshot.install();
        f()
    })
}
