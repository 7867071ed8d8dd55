/// A stored key-value pair.
///
/// The cache's mapping owns every entry; strategies only ever see the key.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    pub key: K,
    pub value: V,
    /// Creation stamp, unique per cache instance. Distinguishes an entry from
    /// a later one re-created under the same key.
    pub(crate) stamp: u64,
}

impl<K, V> CacheEntry<K, V> {
    pub(crate) fn new(key: K, value: V, stamp: u64) -> Self {
        CacheEntry { key, value, stamp }
    }
}
