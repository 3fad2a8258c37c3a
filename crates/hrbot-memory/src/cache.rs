//! Fixed-capacity LRU memoization with a single-flight guard per key.
//!
//! Each slot holds a shared [`OnceCell`]. The first caller for a key
//! initializes it; concurrent callers for the same key await that same
//! initialization instead of recomputing. A failed initialization leaves
//! the cell empty and the slot is dropped, so the next caller retries.

use hrbot_core::HrResult;
use lru::LruCache;
use parking_lot::Mutex;
use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Default number of distinct queries retained.
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Hit/miss counters for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found an existing slot (ready or in flight).
    pub hits: u64,
    /// Lookups that had to create a slot.
    pub misses: u64,
}

/// Thread-safe LRU cache whose values are computed at most once per key.
pub struct QueryCache<K, V> {
    slots: Mutex<LruCache<K, Arc<OnceCell<V>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> QueryCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a cache retaining at most `capacity` keys (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            slots: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, computing it with `init` on a miss.
    ///
    /// Concurrent calls for the same key share one `init` run. Errors are not
    /// cached: the failing caller gets the error and the next waiter runs its
    /// own `init`.
    pub async fn get_or_try_insert_with<F, Fut>(&self, key: K, init: F) -> HrResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = HrResult<V>>,
    {
        let slot = self.slot(&key);

        match slot.get_or_try_init(init).await {
            Ok(value) => Ok(value.clone()),
            Err(e) => {
                let mut slots = self.slots.lock();
                let stale = slots
                    .peek(&key)
                    .is_some_and(|current| Arc::ptr_eq(current, &slot) && !current.initialized());
                if stale {
                    slots.pop(&key);
                }
                Err(e)
            }
        }
    }

    /// Find or create the slot for `key`, marking it most recently used.
    fn slot(&self, key: &K) -> Arc<OnceCell<V>> {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return slot.clone();
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let slot = Arc::new(OnceCell::new());
        slots.put(key.clone(), slot.clone());
        slot
    }

    /// Cached value for `key` without touching recency, if computed.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.slots
            .lock()
            .peek(key)
            .and_then(|slot| slot.get().cloned())
    }

    /// Number of retained keys (including in-flight ones).
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Whether no keys are retained.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of retained keys.
    pub fn capacity(&self) -> usize {
        self.slots.lock().cap().get()
    }

    /// Snapshot of hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<K, V> Default for QueryCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
