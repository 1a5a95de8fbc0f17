//! Memoization cache for pure per-input rule results
//!
//! Math rendering and code highlighting are pure functions of source text and
//! configuration, so repeated inputs (common across streamed re-renders of the
//! same document) can reuse earlier results. The cache is content-addressed
//! and entries are immutable once computed, so there is no invalidation; a
//! capacity bound with FIFO eviction keeps memory flat.
//!
//! The cache is an explicit, injected object rather than an implicit
//! singleton, so tests can run with a fresh or disabled cache. A process-wide
//! shared instance is provided for callers that don't care.

use once_cell::sync::Lazy;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

const DEFAULT_CAPACITY: usize = 256;

/// Process-wide cache shared by sessions that don't inject their own
pub static SHARED_CACHE: Lazy<Arc<MemoCache>> = Lazy::new(|| Arc::new(MemoCache::default()));

#[derive(Debug, Default)]
struct Inner {
    map: HashMap<u64, String>,
    order: VecDeque<u64>,
}

/// Lock-protected, capacity-bounded memoization map
#[derive(Debug)]
pub struct MemoCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl MemoCache {
    pub fn with_capacity(capacity: usize) -> Self {
        MemoCache {
            inner: Mutex::new(Inner::default()),
            capacity,
        }
    }

    /// Look up `(tag, input)` and compute-and-store on a miss
    pub fn get_or_insert_with<F>(&self, tag: &str, input: &str, compute: F) -> String
    where
        F: FnOnce() -> String,
    {
        let key = Self::key(tag, input);
        // A poisoned lock means another render panicked; the entries are
        // still valid strings, so keep serving them.
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(hit) = inner.map.get(&key) {
            return hit.clone();
        }
        let value = compute();
        if inner.map.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.map.remove(&oldest);
            }
        }
        inner.map.insert(key, value.clone());
        inner.order.push_back(key);
        value
    }

    pub fn len(&self) -> usize {
        match self.inner.lock() {
            Ok(guard) => guard.map.len(),
            Err(poisoned) => poisoned.into_inner().map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(tag: &str, input: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        tag.hash(&mut hasher);
        input.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for MemoCache {
    fn default() -> Self {
        MemoCache::with_capacity(DEFAULT_CAPACITY)
    }
}
