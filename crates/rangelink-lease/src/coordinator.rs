use crate::counter::{CounterStore, InMemoryCounter};
use crate::error::Error;
use crate::lease::{Lease, LeaseSource};
use std::sync::Mutex;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

/// First id the reference deployment ever hands out.
pub const DEFAULT_START_ID: u64 = 1_000_000;
/// Ids per lease in the reference deployment.
pub const DEFAULT_BLOCK_SIZE: u64 = 1_000;

/// Configures a [`RangeCoordinator`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct CoordinatorSettings {
    /// First id eligible for allocation.
    #[builder(default = DEFAULT_START_ID)]
    pub start_id: u64,
    /// Number of ids in every lease, fixed for the coordinator's lifetime.
    #[builder(default = DEFAULT_BLOCK_SIZE)]
    pub block_size: u64,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug)]
struct CoordinatorState {
    next_free: u64,
}

/// Grants disjoint, contiguous id blocks to any number of node allocators.
///
/// One instance is shared by every allocator of a deployment. Leases come
/// out in issuance order with `start` growing by exactly `block_size`.
pub struct RangeCoordinator<S: CounterStore = InMemoryCounter> {
    block_size: u64,
    store: S,
    state: Mutex<CoordinatorState>,
}

impl RangeCoordinator<InMemoryCounter> {
    /// Creates a coordinator whose counter lives only in memory.
    ///
    /// A restarted process starts over at `start_id`.
    pub fn new(settings: CoordinatorSettings) -> Result<Self, Error> {
        Self::with_store(settings, InMemoryCounter::new())
    }
}

impl<S: CounterStore> RangeCoordinator<S> {
    /// Creates a coordinator that records its progress in `store`.
    ///
    /// If the store already holds a mark, leasing resumes from the larger of
    /// that mark and `start_id`.
    pub fn with_store(settings: CoordinatorSettings, store: S) -> Result<Self, Error> {
        if settings.block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }

        let stored = store.load()?;
        let next_free = stored.map_or(settings.start_id, |mark| mark.max(settings.start_id));

        info!(
            start_id = settings.start_id,
            block_size = settings.block_size,
            stored_mark = ?stored,
            next_free,
            "range coordinator ready"
        );

        Ok(Self {
            block_size: settings.block_size,
            store,
            state: Mutex::new(CoordinatorState { next_free }),
        })
    }

    /// Grants the next block `[next_free, next_free + block_size)`.
    pub fn lease(&self) -> Result<Lease, Error> {
        let mut state = self.state.lock().map_err(|_| Error::StatePoisoned)?;

        let start = state.next_free;
        let end = start
            .checked_add(self.block_size)
            .ok_or(Error::Exhausted {
                next_free: start,
                block_size: self.block_size,
            })?;

        // persist first; a failed write leaves next_free unchanged
        self.store.store(end)?;
        state.next_free = end;

        debug!(start, end, "granted lease");

        Lease::new(start, end).ok_or(Error::InvalidBlockSize)
    }

    /// The first id of the next lease.
    pub fn next_free(&self) -> Result<u64, Error> {
        let state = self.state.lock().map_err(|_| Error::StatePoisoned)?;
        Ok(state.next_free)
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }
}

impl<S: CounterStore> LeaseSource for RangeCoordinator<S> {
    fn lease(&self) -> Result<Lease, Error> {
        RangeCoordinator::lease(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::test_counter::{DurableCounter, FailingCounter};
    use std::sync::Arc;
    use std::thread;

    fn make_coordinator(start_id: u64, block_size: u64) -> RangeCoordinator {
        let settings = CoordinatorSettings::builder()
            .start_id(start_id)
            .block_size(block_size)
            .build();
        RangeCoordinator::new(settings).unwrap()
    }

    #[test]
    fn default_settings() {
        let settings = CoordinatorSettings::default();
        assert_eq!(settings.start_id, 1_000_000);
        assert_eq!(settings.block_size, 1_000);
    }

    #[test]
    fn sequential_leases_are_contiguous() {
        let coordinator = make_coordinator(0, 100);

        let leases: Vec<_> = (0..4)
            .map(|_| {
                let lease = coordinator.lease().unwrap();
                (lease.start(), lease.end())
            })
            .collect();

        assert_eq!(leases, vec![(0, 100), (100, 200), (200, 300), (300, 400)]);
        assert_eq!(coordinator.next_free().unwrap(), 400);
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let settings = CoordinatorSettings::builder().block_size(0).build();
        assert_eq!(
            RangeCoordinator::new(settings).err(),
            Some(Error::InvalidBlockSize)
        );
    }

    #[test]
    fn concurrent_leases_are_disjoint_and_cover_exactly() {
        const CALLERS: u64 = 32;
        const BLOCK: u64 = 100;

        let coordinator = Arc::new(make_coordinator(0, BLOCK));

        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let coordinator = Arc::clone(&coordinator);
                thread::spawn(move || coordinator.lease().unwrap())
            })
            .collect();

        let mut leases: Vec<Lease> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        leases.sort_by_key(Lease::start);

        let total: u64 = leases.iter().map(Lease::len).sum();
        assert_eq!(total, CALLERS * BLOCK);

        for pair in leases.windows(2) {
            assert!(!pair[0].overlaps(&pair[1]));
            assert_eq!(pair[0].end(), pair[1].start());
        }
        assert_eq!(leases[0].start(), 0);
        assert_eq!(leases.last().unwrap().end(), CALLERS * BLOCK);
    }

    #[test]
    fn exhaustion_is_reported_and_does_not_advance() {
        let coordinator = make_coordinator(u64::MAX - 150, 100);

        let lease = coordinator.lease().unwrap();
        assert_eq!(lease.end(), u64::MAX - 50);

        let err = coordinator.lease().unwrap_err();
        assert_eq!(
            err,
            Error::Exhausted {
                next_free: u64::MAX - 50,
                block_size: 100
            }
        );
        assert_eq!(coordinator.next_free().unwrap(), u64::MAX - 50);
    }

    #[test]
    fn failed_store_keeps_block_available() {
        let settings = CoordinatorSettings::builder()
            .start_id(10)
            .block_size(5)
            .build();
        let coordinator = RangeCoordinator::with_store(settings, FailingCounter).unwrap();

        assert!(matches!(coordinator.lease(), Err(Error::Counter(_))));
        assert_eq!(coordinator.next_free().unwrap(), 10);
    }

    #[test]
    fn durable_store_resumes_after_restart() {
        let settings = CoordinatorSettings::builder()
            .start_id(1_000)
            .block_size(10)
            .build();
        let store = DurableCounter::default();

        let first = RangeCoordinator::with_store(settings, store.clone()).unwrap();
        first.lease().unwrap();
        first.lease().unwrap();
        drop(first);

        let restarted = RangeCoordinator::with_store(settings, store).unwrap();
        let lease = restarted.lease().unwrap();
        assert_eq!(lease.start(), 1_020);
    }

    #[test]
    fn start_id_above_stored_mark_wins() {
        let store = DurableCounter::default();
        store.store(500).unwrap();

        let settings = CoordinatorSettings::builder()
            .start_id(1_000)
            .block_size(10)
            .build();
        let coordinator = RangeCoordinator::with_store(settings, store).unwrap();
        assert_eq!(coordinator.lease().unwrap().start(), 1_000);
    }

    #[test]
    fn in_memory_restart_reissues_leased_ids() {
        // The volatile counter forgets everything: a second coordinator built
        // from the same settings hands out the same first block again.
        let first = make_coordinator(1_000, 10);
        let before = first.lease().unwrap();
        drop(first);

        let restarted = make_coordinator(1_000, 10);
        let after = restarted.lease().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn coordinator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RangeCoordinator>();
        assert_send_sync::<RangeCoordinator<DurableCounter>>();
    }
}
