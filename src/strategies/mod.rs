pub mod fifo;
pub mod lfu;
pub mod list;
pub mod lru;

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::CacheError;

/// Bookkeeping a cache delegates to its eviction strategy.
///
/// Each hook is called exactly once per matching cache event. Strategies
/// track keys only; values stay in the cache's own mapping.
pub trait EvictionStrategy<K>: Send + Sync {
    /// Register a newly inserted key.
    fn on_add(&mut self, key: &K);
    /// Record a read or in-place update of a tracked key.
    fn on_access(&mut self, key: &K);
    /// Unregister a key. Untracked keys are ignored.
    fn on_remove(&mut self, key: &K);
    /// Choose a victim and stop tracking it. `None` only when empty.
    fn on_evict(&mut self) -> Option<K>;
    fn len(&self) -> usize;
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The recognised strategy names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Fifo,
    Lru,
    Lfu,
}

impl StrategyKind {
    /// Numeric strategy codes: 0 = LRU, 2 = FIFO, 3 = LFU. Code 1 is reserved.
    pub fn from_code(code: u8) -> Result<Self, CacheError> {
        match code {
            0 => Ok(StrategyKind::Lru),
            2 => Ok(StrategyKind::Fifo),
            3 => Ok(StrategyKind::Lfu),
            other => Err(CacheError::InvalidPolicy(format!("code {other}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Fifo => "fifo",
            StrategyKind::Lru => "lru",
            StrategyKind::Lfu => "lfu",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(StrategyKind::Fifo),
            "lru" => Ok(StrategyKind::Lru),
            "lfu" => Ok(StrategyKind::Lfu),
            _ => Err(CacheError::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete enum wrapping all strategies: enables devirtualization + inlining.
pub enum StrategyEnum<K> {
    Fifo(fifo::FifoStrategy<K>),
    Lru(lru::LruStrategy<K>),
    Lfu(lfu::LfuStrategy<K>),
}

impl<K> StrategyEnum<K>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    pub fn new(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Fifo => Self::Fifo(fifo::FifoStrategy::new()),
            StrategyKind::Lru => Self::Lru(lru::LruStrategy::new()),
            StrategyKind::Lfu => Self::Lfu(lfu::LfuStrategy::new()),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Fifo(_) => StrategyKind::Fifo,
            Self::Lru(_) => StrategyKind::Lru,
            Self::Lfu(_) => StrategyKind::Lfu,
        }
    }

    #[inline(always)]
    pub fn contains(&self, key: &K) -> bool {
        match self {
            Self::Fifo(s) => s.contains(key),
            Self::Lru(s) => s.contains(key),
            Self::Lfu(s) => s.contains(key),
        }
    }
}

impl<K> EvictionStrategy<K> for StrategyEnum<K>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    #[inline(always)]
    fn on_add(&mut self, key: &K) {
        match self {
            Self::Fifo(s) => s.on_add(key),
            Self::Lru(s) => s.on_add(key),
            Self::Lfu(s) => s.on_add(key),
        }
    }

    #[inline(always)]
    fn on_access(&mut self, key: &K) {
        match self {
            Self::Fifo(s) => s.on_access(key),
            Self::Lru(s) => s.on_access(key),
            Self::Lfu(s) => s.on_access(key),
        }
    }

    #[inline(always)]
    fn on_remove(&mut self, key: &K) {
        match self {
            Self::Fifo(s) => s.on_remove(key),
            Self::Lru(s) => s.on_remove(key),
            Self::Lfu(s) => s.on_remove(key),
        }
    }

    #[inline(always)]
    fn on_evict(&mut self) -> Option<K> {
        match self {
            Self::Fifo(s) => s.on_evict(),
            Self::Lru(s) => s.on_evict(),
            Self::Lfu(s) => s.on_evict(),
        }
    }

    #[inline(always)]
    fn len(&self) -> usize {
        match self {
            Self::Fifo(s) => s.len(),
            Self::Lru(s) => s.len(),
            Self::Lfu(s) => s.len(),
        }
    }

    #[inline(always)]
    fn clear(&mut self) {
        match self {
            Self::Fifo(s) => s.clear(),
            Self::Lru(s) => s.clear(),
            Self::Lfu(s) => s.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("fifo".parse::<StrategyKind>(), Ok(StrategyKind::Fifo));
        assert_eq!("LRU".parse::<StrategyKind>(), Ok(StrategyKind::Lru));
        assert_eq!(" lfu ".parse::<StrategyKind>(), Ok(StrategyKind::Lfu));
        assert_eq!(
            "mru".parse::<StrategyKind>(),
            Err(CacheError::InvalidPolicy("mru".to_string()))
        );
    }

    #[test]
    fn parse_codes() {
        assert_eq!(StrategyKind::from_code(0), Ok(StrategyKind::Lru));
        assert_eq!(StrategyKind::from_code(2), Ok(StrategyKind::Fifo));
        assert_eq!(StrategyKind::from_code(3), Ok(StrategyKind::Lfu));
        assert!(matches!(
            StrategyKind::from_code(1),
            Err(CacheError::InvalidPolicy(_))
        ));
        assert!(StrategyKind::from_code(9).is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in [StrategyKind::Fifo, StrategyKind::Lru, StrategyKind::Lfu] {
            assert_eq!(kind.to_string().parse::<StrategyKind>(), Ok(kind));
        }
    }

    #[test]
    fn enum_dispatch_reports_kind() {
        let s: StrategyEnum<u32> = StrategyEnum::new(StrategyKind::Lfu);
        assert_eq!(s.kind(), StrategyKind::Lfu);
        assert!(s.is_empty());
    }
}
