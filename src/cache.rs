//! Session cache for decoded API responses.
//!
//! Backed by a moka future cache: callers asking for the same uncached key
//! while a fetch is in flight wait on that fetch instead of issuing their
//! own, and a failed fetch leaves nothing behind, so the next caller tries
//! again.
//!
//! By default nothing is ever evicted: a populated key returns the same value
//! until [`ResponseCache::clear`] is called. A bounded capacity switches on
//! least-recently-used eviction.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;

use moka::future::Cache;
use moka::policy::EvictionPolicy;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheCapacity {
    #[default]
    Unbounded,
    Bounded(NonZeroUsize),
}

pub struct ResponseCache<V> {
    entries: Cache<String, V>,
}

impl<V> ResponseCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_capacity(CacheCapacity::Unbounded)
    }

    pub fn with_capacity(capacity: CacheCapacity) -> Self {
        let builder = Cache::<String, V>::builder().eviction_policy(EvictionPolicy::lru());
        let entries = match capacity {
            CacheCapacity::Unbounded => builder.build(),
            CacheCapacity::Bounded(max) => builder.max_capacity(max.get() as u64).build(),
        };
        Self { entries }
    }

    /// Returns the cached value for `key`, running `fetch` to populate it
    /// when absent. Concurrent callers for one key share a single `fetch`
    /// and, should it fail, the same error.
    pub async fn get_or_try_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, Arc<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Send + Sync + 'static,
    {
        if let Some(value) = self.entries.get(key).await {
            debug!(key, "cache hit");
            return Ok(value);
        }
        self.entries.try_get_with(key.to_string(), fetch()).await
    }

    /// Number of populated keys.
    pub async fn len(&self) -> usize {
        // flush moka's pending writes and evictions so the count is exact
        self.entries.run_pending_tasks().await;
        self.entries.entry_count() as usize
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl<V> Default for ResponseCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use std::num::NonZeroUsize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::{CacheCapacity, ResponseCache};

    async fn counted(calls: &AtomicUsize, value: u32) -> Result<u32, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    async fn failing(calls: &AtomicUsize) -> Result<u32, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Err("boom".to_string())
    }

    fn bounded(max: usize) -> ResponseCache<u32> {
        ResponseCache::with_capacity(CacheCapacity::Bounded(NonZeroUsize::new(max).unwrap()))
    }

    #[tokio::test]
    async fn test_second_lookup_is_a_hit() {
        let cache = ResponseCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache.get_or_try_fetch("k", || counted(&calls, 7)).await;
        let second = cache.get_or_try_fetch("k", || counted(&calls, 8)).await;

        assert_eq!(first, Ok(7));
        assert_eq!(second, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let cache: ResponseCache<u32> = ResponseCache::new();
        let calls = AtomicUsize::new(0);

        let failed = cache.get_or_try_fetch("k", || failing(&calls)).await;
        assert_eq!(failed.unwrap_err().as_str(), "boom");
        assert_eq!(cache.len().await, 0);

        let retried = cache.get_or_try_fetch("k", || counted(&calls, 3)).await;
        assert_eq!(retried, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_keys_leave_nothing_behind() {
        let cache = bounded(2);
        let calls = AtomicUsize::new(0);

        for i in 0..1000 {
            let key = format!("season_badge_{i}");
            assert!(cache.get_or_try_fetch(&key, || failing(&calls)).await.is_err());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1000);
        assert_eq!(cache.len().await, 0);

        cache.get_or_try_fetch("season_badge_0", || counted(&calls, 1)).await.unwrap();
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_fetch() {
        let cache = ResponseCache::new();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let slow = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, String>(42u32)
        };

        let (a, b) = tokio::join!(
            cache.get_or_try_fetch("badge_1", slow),
            cache.get_or_try_fetch("badge_1", slow),
        );

        assert_eq!(a, Ok(42));
        assert_eq!(b, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = ResponseCache::new();
        let calls = AtomicUsize::new(0);
        cache.get_or_try_fetch("a", || counted(&calls, 1)).await.unwrap();
        cache.get_or_try_fetch("b", || counted(&calls, 2)).await.unwrap();
        assert_eq!(cache.len().await, 2);

        cache.clear();
        assert_eq!(cache.len().await, 0);

        cache.get_or_try_fetch("a", || counted(&calls, 1)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_bounded_keeps_at_most_capacity() {
        let cache = bounded(2);
        let calls = AtomicUsize::new(0);

        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            cache.get_or_try_fetch(key, || counted(&calls, i as u32)).await.unwrap();
        }
        assert_eq!(cache.len().await, 2);

        // the most recent entry survives
        let d = cache.get_or_try_fetch("d", || counted(&calls, 99)).await;
        assert_eq!(d, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_unbounded_never_evicts() {
        let cache = ResponseCache::new();
        let calls = AtomicUsize::new(0);
        for i in 0..100u32 {
            let key = format!("season_badge_{i}");
            cache.get_or_try_fetch(&key, || counted(&calls, i)).await.unwrap();
        }
        assert_eq!(cache.len().await, 100);

        cache.get_or_try_fetch("season_badge_0", || counted(&calls, 0)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 100);
    }
}
