use thiserror::Error;

/// Errors returned by the range coordinator and node allocators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("block size must be at least 1")]
    InvalidBlockSize,
    /// The next lease would run past `u64::MAX`. Not recoverable.
    #[error("id space exhausted: next_free={next_free}, block_size={block_size}")]
    Exhausted { next_free: u64, block_size: u64 },
    #[error("allocator state lock is poisoned")]
    StatePoisoned,
    #[error("counter store failed: {0}")]
    Counter(String),
}
