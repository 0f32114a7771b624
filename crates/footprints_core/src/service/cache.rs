//! Time-bounded response cache.
//!
//! # Invariants
//! - An entry is served only while `now - stored_at < ttl`.
//! - Expired entries are evicted on lookup.
//! - The cache is owned by the service that fills it; there is no global state.

use crate::service::clock::Clock;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
pub struct TtlCache<K, V, C> {
    ttl_ms: i64,
    clock: C,
    entries: HashMap<K, (i64, V)>,
}

impl<K, V, C> TtlCache<K, V, C>
where
    K: Eq + Hash,
    V: Clone,
    C: Clock,
{
    pub fn new(ttl_ms: u64, clock: C) -> Self {
        Self {
            ttl_ms: i64::try_from(ttl_ms).unwrap_or(i64::MAX),
            clock,
            entries: HashMap::new(),
        }
    }

    /// Returns a fresh entry, evicting it if it has expired.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now_ms();
        let fresh = match self.entries.get(key) {
            Some((stored_at, _)) => now.saturating_sub(*stored_at) < self.ttl_ms,
            None => return None,
        };
        if fresh {
            self.entries.get(key).map(|(_, value)| value.clone())
        } else {
            self.entries.remove(key);
            None
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        let now = self.clock.now_ms();
        self.entries.insert(key, (now, value));
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::TtlCache;
    use crate::service::clock::ManualClock;

    #[test]
    fn entries_expire_after_ttl() {
        let clock = ManualClock::new(1_000);
        let mut cache = TtlCache::new(500, clock.clone());
        cache.insert("k", 7);

        clock.advance_ms(499);
        assert_eq!(cache.get(&"k"), Some(7));

        clock.advance_ms(1);
        assert_eq!(cache.get(&"k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_all_drops_everything() {
        let mut cache = TtlCache::new(500, ManualClock::new(0));
        cache.insert(1, "a");
        cache.insert(2, "b");
        assert_eq!(cache.len(), 2);

        cache.invalidate_all();
        assert_eq!(cache.get(&1), None);
    }
}
