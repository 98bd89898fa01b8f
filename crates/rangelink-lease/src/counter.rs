use crate::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};

/// Where a [`RangeCoordinator`](crate::RangeCoordinator) keeps its `next_free` mark.
///
/// `store` runs inside the coordinator's critical section, so implementations
/// must be quick. A store that forgets its value across restarts lets a new
/// coordinator re-issue ids that were already leased.
pub trait CounterStore: Send + Sync {
    /// Returns the last stored mark, or `None` if nothing was ever stored.
    fn load(&self) -> Result<Option<u64>, Error>;
    /// Records that every id below `next_free` has been leased.
    fn store(&self, next_free: u64) -> Result<(), Error>;
}

/// Volatile counter store. Its value dies with the process.
#[derive(Debug, Default)]
pub struct InMemoryCounter {
    // 0 doubles as "never stored"; a stored mark is always a lease end, so never 0
    next_free: AtomicU64,
}

impl InMemoryCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for InMemoryCounter {
    fn load(&self) -> Result<Option<u64>, Error> {
        match self.next_free.load(Ordering::Acquire) {
            0 => Ok(None),
            value => Ok(Some(value)),
        }
    }

    fn store(&self, next_free: u64) -> Result<(), Error> {
        self.next_free.store(next_free, Ordering::Release);
        Ok(())
    }
}
