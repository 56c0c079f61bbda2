//! Bounded TTL cache for computed documents.
//!
//! Entries are replaced wholesale and expire after a fixed interval; a read
//! of an expired entry evicts it. Concurrent duplicate recomputes are
//! acceptable since the computations are idempotent.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;

/// How long a computed rankings document stays servable.
pub const TEAM_RANKINGS_TTL: Duration = Duration::from_secs(30 * 60);

struct Entry<V> {
    value: V,
    inserted: Instant,
}

pub struct TtlCache<K: Hash + Eq, V> {
    inner: LruCache<K, Entry<V>>,
    ttl: Duration,
}

impl<K: Hash + Eq, V> TtlCache<K, V> {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            inner: LruCache::new(capacity),
            ttl,
        }
    }

    /// Fresh value for `key`, or `None` (expired entries are evicted here).
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let expired = match self.inner.peek(key) {
            Some(entry) => entry.inserted.elapsed() >= self.ttl,
            None => return None,
        };
        if expired {
            self.inner.pop(key);
            return None;
        }
        self.inner.get(key).map(|entry| &entry.value)
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.inner.put(
            key,
            Entry {
                value,
                inserted: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(ttl: Duration) -> TtlCache<String, u32> {
        TtlCache::new(NonZeroUsize::new(4).unwrap(), ttl)
    }

    #[test]
    fn fresh_entries_are_returned() {
        let mut c = cache(Duration::from_secs(60));
        c.insert("2025-26".to_string(), 7);
        assert_eq!(c.get(&"2025-26".to_string()), Some(&7));
        assert_eq!(c.get(&"2024-25".to_string()), None);
    }

    #[test]
    fn expired_entries_are_evicted_on_read() {
        let mut c = cache(Duration::ZERO);
        c.insert("2025-26".to_string(), 7);
        assert_eq!(c.get(&"2025-26".to_string()), None);
        assert!(c.is_empty());
    }

    #[test]
    fn reinsert_replaces_wholesale() {
        let mut c = cache(Duration::from_secs(60));
        c.insert("2025-26".to_string(), 7);
        c.insert("2025-26".to_string(), 9);
        assert_eq!(c.len(), 1);
        assert_eq!(c.get(&"2025-26".to_string()), Some(&9));
    }

    #[test]
    fn capacity_bounds_evict_least_recent() {
        let mut c = cache(Duration::from_secs(60));
        for i in 0..5u32 {
            c.insert(format!("season-{i}"), i);
        }
        assert_eq!(c.len(), 4);
        assert_eq!(c.get(&"season-0".to_string()), None);
        assert_eq!(c.get(&"season-4".to_string()), Some(&4));
    }
}
