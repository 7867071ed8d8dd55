use thiserror::Error;

/// Errors returned by cache construction and insertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("cache capacity must be greater than 0 (got {0})")]
    InvalidCapacity(usize),

    #[error("invalid or unsupported eviction policy: {0}")]
    InvalidPolicy(String),

    /// Capacity was reached but the strategy had nothing to evict.
    #[error("eviction failure: strategy reported no victim at capacity")]
    EvictionFailure,
}

pub type Result<T> = std::result::Result<T, CacheError>;
