//! Generic TTL fetch-cache
//!
//! Cache-aside wrapper shared by every endpoint adapter: look up an entry by
//! key, serve it while fresh, otherwise run the supplied fetch and store the
//! result. On fetch failure a stale entry is served in its place when one
//! exists. Concurrent misses on one key are coalesced through a per-key
//! async lock so at most one upstream call is in flight per key.
//!
//! Instances are constructed explicitly and injected into adapters; there is
//! no process-global cache map. Entries are never evicted, only overwritten,
//! so memory grows with distinct-key cardinality - acceptable for the finite
//! key spaces here (dates x resources), a scaling risk for unbounded ones.

use crate::errors::StatsResult;
use crate::logger::{self, LogTag};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Cache entry with freshness tracking
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Cache counters for the status endpoint
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub refreshes: u64,
    pub stale_hits: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A cache-annotated value returned to handlers
///
/// `cached` is true when the value came out of the cache map rather than a
/// fresh fetch; `stale` marks an expired entry served because the refresh
/// failed; `mock` marks a configured fallback dataset.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub value: T,
    pub cached: bool,
    pub stale: bool,
    pub mock: bool,
}

impl<T> Fetched<T> {
    fn fresh(value: T) -> Self {
        Self {
            value,
            cached: false,
            stale: false,
            mock: false,
        }
    }

    fn hit(value: T) -> Self {
        Self {
            value,
            cached: true,
            stale: false,
            mock: false,
        }
    }

    fn stale(value: T) -> Self {
        Self {
            value,
            cached: true,
            stale: true,
            mock: false,
        }
    }

    /// Wrap a fallback dataset produced by a [`MockProvider`]
    pub fn mock(value: T) -> Self {
        Self {
            value,
            cached: false,
            stale: false,
            mock: true,
        }
    }

    /// Map the carried value, preserving annotations
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            value: f(self.value),
            cached: self.cached,
            stale: self.stale,
            mock: self.mock,
        }
    }
}

/// Fallback dataset provider, consulted by an adapter when the upstream is
/// unreachable and no stale cache entry exists
pub trait MockProvider<T>: Send + Sync {
    fn mock(&self) -> T;
}

/// Generic TTL fetch-cache, one instance per adapter
pub struct FetchCache<V>
where
    V: Clone,
{
    name: &'static str,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    // Per-key flight locks; grows with key cardinality like the entry map
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    metrics: RwLock<CacheMetrics>,
}

impl<V> FetchCache<V>
where
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
            metrics: RwLock::new(CacheMetrics::default()),
        }
    }

    /// Serve a fresh entry, or fetch and store one, or fall back to a stale
    /// entry when the fetch fails recoverably.
    ///
    /// Validation must happen before calling this - a key always represents a
    /// well-formed request.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> StatsResult<Fetched<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = StatsResult<V>>,
    {
        match self.lookup(key, ttl) {
            Lookup::Fresh(value) => {
                self.bump(|m| m.hits += 1);
                return Ok(Fetched::hit(value));
            }
            Lookup::Expired => self.bump(|m| m.expirations += 1),
            Lookup::Missing => {}
        }

        // Single flight: late arrivals wait here, then re-check the entry the
        // leader wrote instead of issuing their own upstream call.
        let flight = self.flight_lock(key).await;
        let _guard = flight.lock().await;

        if let Lookup::Fresh(value) = self.lookup(key, ttl) {
            self.bump(|m| m.hits += 1);
            return Ok(Fetched::hit(value));
        }
        self.bump(|m| m.misses += 1);

        match fetch().await {
            Ok(value) => {
                self.store(key, value.clone());
                self.bump(|m| m.refreshes += 1);
                logger::debug(LogTag::Cache, &format!("{}: refreshed '{}'", self.name, key));
                Ok(Fetched::fresh(value))
            }
            Err(err) if err.is_recoverable() => match self.any_value(key) {
                Some(stale) => {
                    self.bump(|m| m.stale_hits += 1);
                    logger::warning(
                        LogTag::Cache,
                        &format!("{}: refresh of '{}' failed, serving stale entry ({})", self.name, key, err),
                    );
                    Ok(Fetched::stale(stale))
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    /// Current counters (cloned snapshot)
    pub fn metrics(&self) -> CacheMetrics {
        self.metrics.read().unwrap().clone()
    }

    /// Number of distinct keys ever stored
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &str, ttl: Duration) -> Lookup<V> {
        let entries = self.entries.read().unwrap();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < ttl => Lookup::Fresh(entry.value.clone()),
            Some(_) => Lookup::Expired,
            None => Lookup::Missing,
        }
    }

    /// Entry value regardless of freshness
    fn any_value(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().unwrap();
        entries.get(key).map(|e| e.value.clone())
    }

    fn store(&self, key: &str, value: V) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    async fn flight_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut inflight = self.inflight.lock().await;
        inflight
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn bump(&self, f: impl FnOnce(&mut CacheMetrics)) {
        let mut metrics = self.metrics.write().unwrap();
        f(&mut metrics);
    }

    /// Age an entry as if it had been stored `by` earlier. Lets tests cross
    /// the TTL boundary without sleeping.
    #[cfg(test)]
    pub(crate) fn backdate(&self, key: &str, by: Duration) {
        let mut entries = self.entries.write().unwrap();
        if let Some(entry) = entries.get_mut(key) {
            entry.stored_at = entry.stored_at.checked_sub(by).expect("backdate underflow");
        }
    }
}

enum Lookup<V> {
    Fresh(V),
    Expired,
    Missing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StatsError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_millis(200);

    fn upstream_failure() -> StatsError {
        StatsError::upstream("/schedule", Some(503), "connection refused")
    }

    #[tokio::test]
    async fn fresh_hit_never_refetches() {
        let cache: FetchCache<u32> = FetchCache::new("test");
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_fetch("a", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(7)
            })
            .await
            .unwrap();
        let second = cache
            .get_or_fetch("a", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(8)
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.value, 7);
        assert!(!first.cached);
        assert_eq!(second.value, 7);
        assert!(second.cached);
        assert!(!second.stale);
    }

    #[tokio::test]
    async fn expiry_triggers_refetch() {
        let cache: FetchCache<u32> = FetchCache::new("test");
        let calls = AtomicUsize::new(0);

        cache
            .get_or_fetch("a", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(1)
            })
            .await
            .unwrap();
        cache.backdate("a", TTL + Duration::from_millis(10));

        let refreshed = cache
            .get_or_fetch("a", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(2)
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed.value, 2);
        assert!(!refreshed.cached);

        // The refreshed entry is fresh again
        let hit = cache.get_or_fetch("a", TTL, || async { Ok(99) }).await.unwrap();
        assert_eq!(hit.value, 2);
        assert!(hit.cached);
    }

    #[tokio::test]
    async fn stale_entry_served_when_refresh_fails() {
        let cache: FetchCache<u32> = FetchCache::new("test");

        cache.get_or_fetch("a", TTL, || async { Ok(42) }).await.unwrap();
        cache.backdate("a", TTL + Duration::from_millis(10));

        let served = cache
            .get_or_fetch("a", TTL, || async { Err(upstream_failure()) })
            .await
            .unwrap();

        assert_eq!(served.value, 42);
        assert!(served.cached);
        assert!(served.stale);
        assert_eq!(cache.metrics().stale_hits, 1);
    }

    #[tokio::test]
    async fn failure_propagates_with_empty_cache() {
        let cache: FetchCache<u32> = FetchCache::new("test");

        let err = cache
            .get_or_fetch("a", TTL, || async { Err(upstream_failure()) })
            .await
            .unwrap_err();

        match err {
            StatsError::Upstream { status, .. } => assert_eq!(status, Some(503)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn nonrecoverable_failure_ignores_stale_entry() {
        let cache: FetchCache<u32> = FetchCache::new("test");

        cache.get_or_fetch("a", TTL, || async { Ok(42) }).await.unwrap();
        cache.backdate("a", TTL + Duration::from_millis(10));

        let err = cache
            .get_or_fetch("a", TTL, || async {
                Err(StatsError::Internal("bad state".to_string()))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StatsError::Internal(_)));
    }

    #[tokio::test]
    async fn keys_are_isolated() {
        let cache: FetchCache<u32> = FetchCache::new("test");

        cache.get_or_fetch("a", TTL, || async { Ok(1) }).await.unwrap();
        cache.get_or_fetch("b", TTL, || async { Ok(2) }).await.unwrap();
        cache.backdate("a", TTL + Duration::from_millis(10));

        // "b" stays fresh even though "a" expired
        let b = cache.get_or_fetch("b", TTL, || async { Ok(99) }).await.unwrap();
        assert_eq!(b.value, 2);
        assert!(b.cached);

        let a = cache.get_or_fetch("a", TTL, || async { Ok(11) }).await.unwrap();
        assert_eq!(a.value, 11);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_misses_share_one_fetch() {
        let cache: Arc<FetchCache<u32>> = Arc::new(FetchCache::new("test"));
        let calls = Arc::new(AtomicUsize::new(0));

        let slow_fetch = |calls: Arc<AtomicUsize>| async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<u32, StatsError>(5)
        };

        let (first, second) = tokio::join!(
            cache.get_or_fetch("a", TTL, || slow_fetch(Arc::clone(&calls))),
            cache.get_or_fetch("a", TTL, || slow_fetch(Arc::clone(&calls))),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let (first, second) = (first.unwrap(), second.unwrap());
        assert_eq!(first.value, 5);
        assert_eq!(second.value, 5);
        // Exactly one caller performed the fetch
        assert_eq!([first.cached, second.cached].iter().filter(|c| !**c).count(), 1);
    }

    #[tokio::test]
    async fn metrics_track_hits_and_misses() {
        let cache: FetchCache<u32> = FetchCache::new("test");

        cache.get_or_fetch("a", TTL, || async { Ok(1) }).await.unwrap();
        cache.get_or_fetch("a", TTL, || async { Ok(1) }).await.unwrap();
        cache.get_or_fetch("b", TTL, || async { Ok(2) }).await.unwrap();

        let metrics = cache.metrics();
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.misses, 2);
        assert_eq!(metrics.refreshes, 2);
        assert!((metrics.hit_rate() - 1.0 / 3.0).abs() < 1e-9);
    }
}
