use std::hash::Hash;

use ahash::RandomState;
use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::{debug, error, trace};

use crate::entry::CacheEntry;
use crate::error::{CacheError, Result};
use crate::strategies::{EvictionStrategy, StrategyEnum, StrategyKind};

/// Construction parameters for a [`Cache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub strategy: StrategyKind,
}

impl CacheConfig {
    pub fn new(capacity: usize, strategy: StrategyKind) -> Self {
        CacheConfig { capacity, strategy }
    }

    pub fn build<K, V>(&self) -> Result<Cache<K, V>>
    where
        K: Hash + Eq + Clone + Send + Sync,
    {
        Cache::new(self.capacity, self.strategy)
    }
}

/// Mapping and strategy, always mutated together under one lock.
struct CacheStoreInner<K, V> {
    map: HashMap<K, CacheEntry<K, V>, RandomState>,
    strategy: StrategyEnum<K>,
    next_stamp: u64,
}

impl<K, V> CacheStoreInner<K, V> {
    #[inline(always)]
    fn alloc_stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }
}

/// A bounded, thread-safe key-value cache.
///
/// Every mutation takes the write lock for its whole duration, so the
/// mapping and the strategy's tracking records never diverge: after any
/// call returns, each cached key has exactly one tracking record and
/// `len() <= capacity()`.
///
/// ```
/// use policy_cache::{Cache, StrategyKind};
///
/// let cache: Cache<&str, i32> = Cache::new(2, StrategyKind::Lru).unwrap();
/// cache.put("a", 1).unwrap();
/// cache.put("b", 2).unwrap();
/// cache.get(&"a");
/// assert_eq!(cache.put("c", 3).unwrap(), Some("b"));
/// assert_eq!(cache.get(&"a"), Some(1));
/// ```
pub struct Cache<K, V> {
    capacity: usize,
    kind: StrategyKind,
    inner: RwLock<CacheStoreInner<K, V>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    /// Create an empty cache. Fails if `capacity` is zero.
    pub fn new(capacity: usize, strategy: StrategyKind) -> Result<Self> {
        if capacity < 1 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        trace!(capacity, strategy = %strategy, "cache created");
        Ok(Cache {
            capacity,
            kind: strategy,
            inner: RwLock::new(CacheStoreInner {
                map: HashMap::with_hasher(RandomState::new()),
                strategy: StrategyEnum::new(strategy),
                next_stamp: 0,
            }),
        })
    }

    /// Create a cache from a strategy name such as `"lru"`.
    ///
    /// The name is validated before the capacity.
    pub fn with_strategy_name(capacity: usize, strategy: &str) -> Result<Self> {
        let kind = strategy.parse::<StrategyKind>()?;
        Self::new(capacity, kind)
    }

    /// Insert or update `key`.
    ///
    /// Updating an existing key counts as an access and never evicts.
    /// Inserting a new key into a full cache first evicts the strategy's
    /// victim, whose key is returned.
    pub fn put(&self, key: K, value: V) -> Result<Option<K>> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        if let Some(entry) = inner.map.get_mut(&key) {
            entry.value = value;
            inner.strategy.on_access(&key);
            return Ok(None);
        }

        let mut evicted = None;
        if inner.strategy.len() >= self.capacity {
            let Some(victim) = inner.strategy.on_evict() else {
                error!(
                    capacity = self.capacity,
                    tracked = inner.strategy.len(),
                    mapped = inner.map.len(),
                    "strategy reported no victim at capacity"
                );
                return Err(CacheError::EvictionFailure);
            };
            inner.map.remove(&victim);
            debug!(strategy = %self.kind, "evicted entry to make room");
            evicted = Some(victim);
        }

        let stamp = inner.alloc_stamp();
        inner.strategy.on_add(&key);
        inner
            .map
            .insert(key.clone(), CacheEntry::new(key, value, stamp));
        Ok(evicted)
    }

    /// Remove `key` if present. Returns whether anything was removed.
    pub fn delete(&self, key: &K) -> bool {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let Some(entry) = inner.map.remove(key) else {
            return false;
        };
        inner.strategy.on_remove(&entry.key);
        true
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.strategy.clear();
        inner.map.clear();
        trace!(strategy = %self.kind, "cache cleared");
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.read().strategy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn strategy(&self) -> StrategyKind {
        self.kind
    }

    /// Presence check that leaves eviction bookkeeping alone.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().map.contains_key(key)
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Clone,
{
    /// Look up `key`, recording the access with the strategy.
    pub fn get(&self, key: &K) -> Option<V> {
        // FAST PATH (read lock): misses need no bookkeeping
        let stamp = {
            let inner = self.inner.read();
            inner.map.get(key)?.stamp
        };

        // SLOW PATH (write lock): the entry may have been deleted or
        // replaced since the read lock was released
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let entry = inner.map.get(key)?;
        if entry.stamp != stamp {
            return None;
        }
        let value = entry.value.clone();
        inner.strategy.on_access(key);
        Some(value)
    }

    /// Look up `key` without counting it as an access.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().map.get(key).map(|entry| entry.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mapping and strategy track exactly the same keys.
    fn assert_consistent<K, V>(cache: &Cache<K, V>)
    where
        K: Hash + Eq + Clone + Send + Sync,
    {
        let inner = cache.inner.read();
        assert_eq!(inner.map.len(), inner.strategy.len());
        assert!(inner.map.len() <= cache.capacity);
        for (key, entry) in inner.map.iter() {
            assert!(inner.strategy.contains(key));
            assert!(entry.key == *key);
        }
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = Cache::<u32, u32>::new(0, StrategyKind::Fifo).err();
        assert_eq!(err, Some(CacheError::InvalidCapacity(0)));
    }

    #[test]
    fn rejects_unknown_strategy_name() {
        let err = Cache::<u32, u32>::with_strategy_name(3, "random").err();
        assert_eq!(err, Some(CacheError::InvalidPolicy("random".to_string())));
        // Strategy is checked first
        let err = Cache::<u32, u32>::with_strategy_name(0, "random").err();
        assert!(matches!(err, Some(CacheError::InvalidPolicy(_))));
        assert!(Cache::<u32, u32>::with_strategy_name(3, "LFU").is_ok());
    }

    #[test]
    fn config_builds_cache() {
        let cache: Cache<u32, u32> = CacheConfig::new(4, StrategyKind::Lru).build().unwrap();
        assert_eq!(cache.capacity(), 4);
        assert_eq!(cache.strategy(), StrategyKind::Lru);
        assert!(cache.is_empty());
        assert!(CacheConfig::new(0, StrategyKind::Lru)
            .build::<u32, u32>()
            .is_err());
    }

    #[test]
    fn update_does_not_grow_or_evict() {
        for kind in [StrategyKind::Fifo, StrategyKind::Lru, StrategyKind::Lfu] {
            let cache = Cache::new(2, kind).unwrap();
            cache.put(1, "a").unwrap();
            cache.put(2, "b").unwrap();
            assert_eq!(cache.put(1, "aa").unwrap(), None);
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.peek(&1), Some("aa"));
            assert_eq!(cache.peek(&2), Some("b"));
            assert_consistent(&cache);
        }
    }

    #[test]
    fn put_reports_victim() {
        let cache = Cache::new(1, StrategyKind::Fifo).unwrap();
        assert_eq!(cache.put("a", 1).unwrap(), None);
        assert_eq!(cache.put("b", 2).unwrap(), Some("a"));
        assert!(!cache.contains_key(&"a"));
        assert_consistent(&cache);
    }

    #[test]
    fn delete_is_idempotent() {
        let cache = Cache::new(3, StrategyKind::Lru).unwrap();
        cache.put(1, 10).unwrap();
        assert!(cache.delete(&1));
        assert!(!cache.delete(&1));
        assert_eq!(cache.len(), 0);
        assert_consistent(&cache);
    }

    #[test]
    fn clear_resets_everything() {
        let cache = Cache::new(3, StrategyKind::Lfu).unwrap();
        for k in 0..3 {
            cache.put(k, k * 10).unwrap();
        }
        cache.get(&0);
        cache.clear();
        assert_eq!(cache.len(), 0);
        for k in 0..3 {
            assert_eq!(cache.get(&k), None);
        }
        assert_consistent(&cache);
    }

    #[test]
    fn peek_does_not_count_as_access() {
        let cache = Cache::new(2, StrategyKind::Lru).unwrap();
        cache.put("a", 1).unwrap();
        cache.put("b", 2).unwrap();
        assert_eq!(cache.peek(&"a"), Some(1));
        // "a" is still least recent
        assert_eq!(cache.put("c", 3).unwrap(), Some("a"));
    }

    #[test]
    fn replaced_entry_gets_fresh_stamp() {
        let cache = Cache::new(2, StrategyKind::Fifo).unwrap();
        cache.put("k", 1).unwrap();
        let first = cache.inner.read().map[&"k"].stamp;
        cache.put("k", 2).unwrap();
        // Update in place keeps identity
        assert_eq!(cache.inner.read().map[&"k"].stamp, first);
        cache.delete(&"k");
        cache.put("k", 3).unwrap();
        assert_ne!(cache.inner.read().map[&"k"].stamp, first);
    }

    #[test]
    fn lfu_victim_is_least_frequent() {
        let cache = Cache::new(3, StrategyKind::Lfu).unwrap();
        for (k, v) in [("x", 10), ("y", 20), ("z", 30)] {
            cache.put(k, v).unwrap();
        }
        cache.get(&"x");
        cache.get(&"z");
        assert_eq!(cache.put("w", 40).unwrap(), Some("y"));

        let inner = cache.inner.read();
        match &inner.strategy {
            StrategyEnum::Lfu(s) => {
                assert_eq!(s.frequency(&"w"), Some(1));
                assert_eq!(s.frequency(&"x"), Some(2));
            }
            _ => panic!("expected lfu strategy"),
        }
    }
}
