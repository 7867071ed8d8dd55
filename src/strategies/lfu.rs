use std::collections::BTreeMap;
use std::hash::Hash;

use ahash::RandomState;
use hashbrown::HashMap;

use crate::strategies::EvictionStrategy;

/// Ordering key for the frequency index.
/// Lower frequency evicted first; ties broken by the oldest touch.
/// `touched` is unique per live key, so a `FreqKey` names exactly one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FreqKey {
    frequency: u64,
    touched: u64,
}

/// LFU: evicts the key with the smallest access count.
///
/// Frequencies start at 1 on add and grow by 1 per access. Among keys that
/// share the minimum frequency, the one touched least recently goes first.
/// A removed key forgets its count; re-adding starts again at 1.
pub struct LfuStrategy<K> {
    map: HashMap<K, FreqKey, RandomState>,
    index: BTreeMap<FreqKey, K>,
    max_frequency: u64,
    tick: u64,
}

impl<K: Hash + Eq + Clone> LfuStrategy<K> {
    pub fn new() -> Self {
        Self {
            map: HashMap::with_hasher(RandomState::new()),
            index: BTreeMap::new(),
            max_frequency: 0,
            tick: 0,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Current access count of a tracked key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.map.get(key).map(|fk| fk.frequency)
    }

    /// Highest frequency observed since construction or the last clear.
    pub fn max_frequency(&self) -> u64 {
        self.max_frequency
    }

    fn next_tick(&mut self) -> u64 {
        let t = self.tick;
        self.tick += 1;
        t
    }
}

impl<K: Hash + Eq + Clone> Default for LfuStrategy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionStrategy<K> for LfuStrategy<K>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    fn on_add(&mut self, key: &K) {
        if self.map.contains_key(key) {
            return;
        }
        let fk = FreqKey {
            frequency: 1,
            touched: self.next_tick(),
        };
        self.max_frequency = self.max_frequency.max(1);
        self.index.insert(fk, key.clone());
        self.map.insert(key.clone(), fk);
    }

    fn on_access(&mut self, key: &K) {
        let touched = self.next_tick();
        let Some(stored) = self.map.get_mut(key) else {
            return;
        };

        // Reposition under the bumped frequency
        let Some(owned) = self.index.remove(&*stored) else {
            return;
        };
        stored.frequency += 1;
        stored.touched = touched;
        self.max_frequency = self.max_frequency.max(stored.frequency);
        self.index.insert(*stored, owned);
    }

    fn on_remove(&mut self, key: &K) {
        if let Some(fk) = self.map.remove(key) {
            self.index.remove(&fk);
        }
    }

    fn on_evict(&mut self) -> Option<K> {
        let (_, victim) = self.index.pop_first()?;
        self.map.remove(&victim);
        Some(victim)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.index.clear();
        self.max_frequency = 0;
    }
}
