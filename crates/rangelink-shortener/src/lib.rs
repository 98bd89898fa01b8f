//! URL shortener service implementation.
//!
//! This crate provides the shortening service and the id generator trait it
//! allocates from. Core types are re-exported from `rangelink_core`.

pub mod generator;
pub mod service;

pub use generator::IdGenerator;
pub use rangelink_core::{Shortener, ShortenerError};
pub use service::ShortenerService;
