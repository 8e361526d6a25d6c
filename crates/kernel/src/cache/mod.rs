//! Best-effort cache for rendered menu fragments.
//!
//! A miss always means "render it again"; nothing in the kernel depends on a
//! fragment being present. Keys include a fingerprint of the node and of the
//! resolved options, so changed data never reuses stale markup.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

/// Default TTL for cached fragments (60 seconds).
pub const DEFAULT_TTL_SECS: u64 = 60;

/// Default maximum number of cached fragments.
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Storage for rendered fragments, owned by the caller.
pub trait FragmentCache: Send + Sync {
    /// Look up a fragment.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a fragment. Implementations may drop it.
    fn insert(&self, key: String, fragment: String);
}

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFragmentCache;

impl FragmentCache for NoFragmentCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn insert(&self, _key: String, _fragment: String) {}
}

/// In-process fragment cache backed by Moka.
#[derive(Clone)]
pub struct MokaFragmentCache {
    inner: Arc<Cache<String, String>>,
}

impl MokaFragmentCache {
    /// Create a cache bounded to `max_capacity` entries living `ttl`.
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Number of entries currently held (approximate).
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    /// Drop every cached fragment.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
        debug!("fragment cache cleared");
    }
}

impl Default for MokaFragmentCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CAPACITY, Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

impl FragmentCache for MokaFragmentCache {
    fn get(&self, key: &str) -> Option<String> {
        let hit = self.inner.get(key);
        if hit.is_some() {
            debug!(key = %key, "fragment cache hit");
        }
        hit
    }

    fn insert(&self, key: String, fragment: String) {
        self.inner.insert(key, fragment);
    }
}
