//! Core types and traits for the rangelink URL shortener.
//!
//! This crate provides the base-62 codec, the link record and the storage
//! contracts shared by the shortener service, the storage backends and the
//! gateway.

pub mod base62;
pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use repository::{LinkRecord, ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
