//! Storage backends for rangelink link records.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use rangelink_core::repository::{LinkRecord, ReadRepository, Repository, Result};
pub use rangelink_core::StorageError;
pub use sqlite::SqliteRepository;
