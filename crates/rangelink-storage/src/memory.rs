use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rangelink_core::repository::{LinkRecord, ReadRepository, Repository, Result};
use rangelink_core::{ShortCode, StorageError};

/// In-memory implementation of the Repository trait using DashMap.
///
/// Records are keyed by id with secondary indexes for short code and long
/// URL. The URL index keeps the lowest id stored for a URL.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: DashMap<u64, LinkRecord>,
    by_code: DashMap<String, u64>,
    by_url: DashMap<String, u64>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record(&self, id: u64) -> Option<LinkRecord> {
        self.records.get(&id).map(|r| r.value().clone())
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_short_code(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        let Some(id) = self.by_code.get(code.as_str()).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.record(id))
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<LinkRecord>> {
        let Some(id) = self.by_url.get(long_url).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.record(id))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, record: LinkRecord) -> Result<()> {
        // lock order: code, then id
        let code_slot = match self.by_code.entry(record.short_code.as_str().to_owned()) {
            Entry::Occupied(_) => {
                return Err(StorageError::DuplicateKey(format!(
                    "short_code {}",
                    record.short_code
                )))
            }
            Entry::Vacant(slot) => slot,
        };

        let id_slot = match self.records.entry(record.id) {
            Entry::Occupied(_) => {
                return Err(StorageError::DuplicateKey(format!("id {}", record.id)))
            }
            Entry::Vacant(slot) => slot,
        };

        let id = record.id;
        let long_url = record.long_url.clone();
        id_slot.insert(record);
        code_slot.insert(id);

        self.by_url
            .entry(long_url)
            .and_modify(|current| *current = (*current).min(id))
            .or_insert(id);
        Ok(())
    }
}
