use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored link. Created once per distinct long URL and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Allocator-assigned primary key.
    pub id: u64,
    /// The original URL that was shortened.
    pub long_url: String,
    /// Always the base-62 encoding of `id`.
    pub short_code: ShortCode,
    /// When the record was built.
    pub created_at: Timestamp,
}

impl LinkRecord {
    /// Builds the record for a freshly allocated id.
    pub fn new(id: u64, long_url: impl Into<String>) -> Self {
        Self {
            id,
            long_url: long_url.into(),
            short_code: ShortCode::from_id(id),
            created_at: Timestamp::now(),
        }
    }
}

/// Point lookups the shortening service needs from storage.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn find_by_short_code(&self, code: &ShortCode) -> Result<Option<LinkRecord>>;

    /// Retrieves a record whose long URL matches exactly.
    ///
    /// Storage does not enforce URL uniqueness; when several records share a
    /// URL, implementations return the one with the lowest id.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<LinkRecord>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record. Returns `Err(DuplicateKey)` if its `id` or
    /// `short_code` already exists.
    async fn insert(&self, record: LinkRecord) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_derives_code_from_id() {
        let record = LinkRecord::new(1_000_000, "http://example.com/a");
        assert_eq!(record.short_code.as_str(), "4c92");
        assert_eq!(record.long_url, "http://example.com/a");
    }
}
