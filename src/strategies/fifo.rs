use std::hash::Hash;

use crate::strategies::list::{Iter, OrderList};
use crate::strategies::EvictionStrategy;

/// FIFO: evicts the longest-resident key. Access never reorders.
pub struct FifoStrategy<K> {
    order: OrderList<K>,
}

impl<K: Hash + Eq + Clone> FifoStrategy<K> {
    pub fn new() -> Self {
        Self {
            order: OrderList::new(),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.order.contains(key)
    }

    /// Keys in eviction order, oldest first.
    pub fn iter(&self) -> Iter<'_, K> {
        self.order.iter()
    }
}

impl<K: Hash + Eq + Clone> Default for FifoStrategy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionStrategy<K> for FifoStrategy<K>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    fn on_add(&mut self, key: &K) {
        self.order.push_tail(key);
    }

    fn on_access(&mut self, _key: &K) {
        // FIFO: no reordering on access
    }

    fn on_remove(&mut self, key: &K) {
        self.order.remove(key);
    }

    fn on_evict(&mut self) -> Option<K> {
        // Evict oldest (head)
        self.order.pop_head()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn clear(&mut self) {
        self.order.clear();
    }
}
