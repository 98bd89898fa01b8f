use thiserror::Error;

/// Errors related to the core types of the URL shortener.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid base-62 encoding: {0}")]
    InvalidEncoding(String),
}

/// Errors raised by the storage collaborator.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// `id` or `short_code` of the record is already taken.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors surfaced by a [`Shortener`](crate::Shortener).
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("storage error: {0}")]
    Storage(StorageError),
    /// The id allocator could not produce an id. Exhaustion of the id space
    /// lands here and is not recoverable.
    #[error("id allocation failed: {0}")]
    Allocation(String),
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::DuplicateKey(key) => Self::DuplicateKey(key),
            other => Self::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_is_lifted_out_of_storage() {
        let err = ShortenerError::from(StorageError::DuplicateKey("4c92".into()));
        assert!(matches!(err, ShortenerError::DuplicateKey(key) if key == "4c92"));
    }

    #[test]
    fn other_storage_errors_pass_through_unchanged() {
        let err = ShortenerError::from(StorageError::Unavailable("pool closed".into()));
        assert!(matches!(
            err,
            ShortenerError::Storage(StorageError::Unavailable(msg)) if msg == "pool closed"
        ));
    }
}
