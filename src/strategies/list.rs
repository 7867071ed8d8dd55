/// Index-arena doubly-linked list for eviction ordering.
///
/// Slots live in a `Vec` and link to each other through prev/next indices,
/// with a key -> slot index map alongside. Freed slots are recycled.
/// Head is the eviction end (oldest / least recent), tail is the newest end.
use std::hash::Hash;

use ahash::RandomState;
use hashbrown::HashMap;

pub const SLOT_NONE: usize = usize::MAX;

struct Slot<K> {
    /// `None` while the slot sits on the free list.
    key: Option<K>,
    prev: usize,
    next: usize,
}

pub struct OrderList<K> {
    slots: Vec<Slot<K>>,
    index: HashMap<K, usize, RandomState>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl<K> Default for OrderList<K> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::with_hasher(RandomState::new()),
            free: Vec::new(),
            head: SLOT_NONE,
            tail: SLOT_NONE,
        }
    }
}

impl<K: Hash + Eq + Clone> OrderList<K> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Append `key` at the tail. Returns `false` (and changes nothing) if
    /// the key is already tracked.
    pub fn push_tail(&mut self, key: &K) -> bool {
        if self.index.contains_key(key) {
            return false;
        }
        let idx = self.alloc(key.clone());
        self.link_tail(idx);
        self.index.insert(key.clone(), idx);
        true
    }

    /// Move a tracked key to the tail (touch). Returns `false` if untracked.
    pub fn move_to_tail(&mut self, key: &K) -> bool {
        let Some(&idx) = self.index.get(key) else {
            return false;
        };
        if self.tail != idx {
            self.unlink(idx);
            self.link_tail(idx);
        }
        true
    }

    /// Unregister `key`. Returns `false` if it was not tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(idx) = self.index.remove(key) else {
            return false;
        };
        self.unlink(idx);
        self.release(idx);
        true
    }

    /// Detach and return the key at the head, if any.
    pub fn pop_head(&mut self) -> Option<K> {
        if self.head == SLOT_NONE {
            return None;
        }
        let idx = self.head;
        self.unlink(idx);
        let key = self.release(idx)?;
        self.index.remove(&key);
        Some(key)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.free.clear();
        self.head = SLOT_NONE;
        self.tail = SLOT_NONE;
    }

    /// Keys from head to tail.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn alloc(&mut self, key: K) -> usize {
        match self.free.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx];
                slot.key = Some(key);
                slot.prev = SLOT_NONE;
                slot.next = SLOT_NONE;
                idx
            }
            None => {
                self.slots.push(Slot {
                    key: Some(key),
                    prev: SLOT_NONE,
                    next: SLOT_NONE,
                });
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) -> Option<K> {
        self.free.push(idx);
        self.slots[idx].key.take()
    }

    fn link_tail(&mut self, idx: usize) {
        self.slots[idx].prev = self.tail;
        self.slots[idx].next = SLOT_NONE;

        if self.tail != SLOT_NONE {
            self.slots[self.tail].next = idx;
        } else {
            self.head = idx;
        }

        self.tail = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;

        if prev != SLOT_NONE {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }

        if next != SLOT_NONE {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.slots[idx].prev = SLOT_NONE;
        self.slots[idx].next = SLOT_NONE;
    }
}

pub struct Iter<'a, K> {
    list: &'a OrderList<K>,
    cursor: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == SLOT_NONE {
            return None;
        }
        let list = self.list;
        let slot = &list.slots[self.cursor];
        self.cursor = slot.next;
        slot.key.as_ref()
    }
}
