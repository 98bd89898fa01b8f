use crate::error::Error;
use crate::lease::{Lease, LeaseSource};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Where a [`NodeAllocator`] stands within its current lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// No lease has been taken yet.
    Uninitialized,
    /// `next` is the id the next call returns; `next < end`.
    Active { next: u64, end: u64 },
    /// The last id of the current lease has been handed out.
    Exhausted,
}

impl Cursor {
    fn after(id: u64, lease: &Lease) -> Self {
        // id < lease.end() <= u64::MAX, so the increment cannot wrap
        let next = id + 1;
        if next < lease.end() {
            Cursor::Active {
                next,
                end: lease.end(),
            }
        } else {
            Cursor::Exhausted
        }
    }
}

/// Per-worker id allocator.
///
/// Hands out ids one at a time from a locally held lease and goes back to the
/// shared [`LeaseSource`] only when the lease runs out, so the common path
/// touches no shared state. Ids left in a lease when the allocator is dropped
/// are never reused.
pub struct NodeAllocator<L: LeaseSource> {
    source: Arc<L>,
    cursor: Mutex<Cursor>,
}

impl<L: LeaseSource> NodeAllocator<L> {
    pub fn new(source: Arc<L>) -> Self {
        Self {
            source,
            cursor: Mutex::new(Cursor::Uninitialized),
        }
    }

    /// Returns the next id, leasing a fresh block first if needed.
    ///
    /// If the lease request fails the cursor is left as it was.
    pub fn next_id(&self) -> Result<u64, Error> {
        let mut cursor = self.cursor.lock().map_err(|_| Error::StatePoisoned)?;

        let id = match *cursor {
            Cursor::Active { next, end } => {
                *cursor = if next + 1 < end {
                    Cursor::Active { next: next + 1, end }
                } else {
                    Cursor::Exhausted
                };
                next
            }
            Cursor::Uninitialized | Cursor::Exhausted => {
                let lease = self.source.lease()?;
                debug!(start = lease.start(), end = lease.end(), "allocator took new lease");
                *cursor = Cursor::after(lease.start(), &lease);
                lease.start()
            }
        };

        Ok(id)
    }

    /// Snapshot of the cursor.
    pub fn cursor(&self) -> Result<Cursor, Error> {
        let cursor = self.cursor.lock().map_err(|_| Error::StatePoisoned)?;
        Ok(*cursor)
    }
}
