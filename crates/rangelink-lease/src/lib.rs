//! Block-leasing id allocation.
//!
//! A single [`RangeCoordinator`] grants disjoint `[start, end)` blocks of
//! the id space; each worker owns a [`NodeAllocator`] that consumes its block
//! one id at a time and only returns to the coordinator when it runs dry.

mod allocator;
mod coordinator;
mod counter;
pub mod error;
mod lease;

pub use allocator::{Cursor, NodeAllocator};
pub use coordinator::{CoordinatorSettings, RangeCoordinator, DEFAULT_BLOCK_SIZE, DEFAULT_START_ID};
pub use counter::{CounterStore, InMemoryCounter};
pub use error::Error;
pub use lease::{Lease, LeaseSource};
