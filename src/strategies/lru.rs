use std::hash::Hash;

use crate::strategies::list::{Iter, OrderList};
use crate::strategies::EvictionStrategy;

/// LRU: every access moves the key to the most-recent end (tail);
/// eviction takes the least-recent end (head). All operations are O(1).
pub struct LruStrategy<K> {
    order: OrderList<K>,
}

impl<K: Hash + Eq + Clone> LruStrategy<K> {
    pub fn new() -> Self {
        Self {
            order: OrderList::new(),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.order.contains(key)
    }

    /// Keys from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        self.order.iter()
    }
}

impl<K: Hash + Eq + Clone> Default for LruStrategy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionStrategy<K> for LruStrategy<K>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    fn on_add(&mut self, key: &K) {
        self.order.push_tail(key);
    }

    fn on_access(&mut self, key: &K) {
        self.order.move_to_tail(key);
    }

    fn on_remove(&mut self, key: &K) {
        self.order.remove(key);
    }

    fn on_evict(&mut self) -> Option<K> {
        self.order.pop_head()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn clear(&mut self) {
        self.order.clear();
    }
}
