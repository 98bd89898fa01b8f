use crate::error::Error;
use std::fmt;
use std::ops::Range;

/// A contiguous, exclusively owned slice `[start, end)` of the id space.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lease {
    start: u64,
    end: u64,
}

impl Lease {
    /// Returns `None` unless `start < end`.
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of ids in the lease.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// A lease always holds at least one id.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, id: u64) -> bool {
        self.start <= id && id < self.end
    }

    /// Returns whether the two leases share any id.
    pub fn overlaps(&self, other: &Lease) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn as_range(&self) -> Range<u64> {
        self.start..self.end
    }
}

impl fmt::Debug for Lease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lease[{}, {})", self.start, self.end)
    }
}

/// Grants leases to node allocators.
///
/// Every lease handed out by one source must be disjoint from every other.
pub trait LeaseSource: Send + Sync {
    fn lease(&self) -> Result<Lease, Error>;
}
