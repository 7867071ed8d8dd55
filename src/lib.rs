//! Bounded in-process key-value cache with pluggable eviction.
//!
//! A [`Cache`] owns its key -> entry mapping and delegates the choice of
//! victim to one [`EvictionStrategy`]: FIFO, LRU or LFU.

mod entry;
mod error;
mod store;
pub mod strategies;

pub use error::{CacheError, Result};
pub use store::{Cache, CacheConfig};
pub use strategies::{EvictionStrategy, StrategyKind};
