//! Keyed cache with per-entry time-to-live and an injectable clock.
//!
//! Intended to be owned by a long-lived application object (e.g. the API
//! state) and shared via `Arc`.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of monotonic time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// TtlCache
// ---------------------------------------------------------------------------

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Cache whose entries expire `ttl` after insertion.
pub struct TtlCache<K, V, C = SystemClock> {
    ttl: Duration,
    clock: C,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V, SystemClock>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K, V, C> TtlCache<K, V, C>
where
    K: Eq + Hash,
    V: Clone,
    C: Clock,
{
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The cached value for `key`, if present and not yet expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| now.duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, restarting its TTL.
    pub async fn insert(&self, key: K, value: V) {
        let entry = Entry {
            value,
            stored_at: self.clock.now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    pub async fn invalidate(&self, key: &K) {
        self.entries.write().await.remove(key);
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.stored_at) < self.ttl);
        before - entries.len()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn cache(ttl_secs: u64) -> (TtlCache<&'static str, u32, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_clock(Duration::from_secs(ttl_secs), Arc::clone(&clock));
        (cache, clock)
    }

    #[tokio::test]
    async fn serves_value_until_ttl_elapses() {
        let (cache, clock) = cache(60);
        cache.insert("locations", 3).await;

        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get(&"locations").await, Some(3));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get(&"locations").await, None);
    }

    #[tokio::test]
    async fn insert_restarts_ttl() {
        let (cache, clock) = cache(10);
        cache.insert("k", 1).await;
        clock.advance(Duration::from_secs(8));
        cache.insert("k", 2).await;
        clock.advance(Duration::from_secs(8));
        assert_eq!(cache.get(&"k").await, Some(2));
    }

    #[tokio::test]
    async fn invalidate_removes_entry() {
        let (cache, _clock) = cache(10);
        cache.insert("k", 1).await;
        cache.invalidate(&"k").await;
        assert_eq!(cache.get(&"k").await, None);
    }

    #[tokio::test]
    async fn purge_drops_only_expired() {
        let (cache, clock) = cache(10);
        cache.insert("old", 1).await;
        clock.advance(Duration::from_secs(11));
        cache.insert("fresh", 2).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.get(&"fresh").await, Some(2));
    }
}
