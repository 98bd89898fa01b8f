use rangelink_lease::{LeaseSource, NodeAllocator};

/// Source of unique numeric ids for new links.
///
/// Implementations are pure allocators that don't interact with link storage;
/// the service trusts every id they return to be globally unique.
pub trait IdGenerator: Send + Sync + 'static {
    fn next_id(&self) -> Result<u64, rangelink_lease::Error>;
}

impl<L: LeaseSource + 'static> IdGenerator for NodeAllocator<L> {
    fn next_id(&self) -> Result<u64, rangelink_lease::Error> {
        NodeAllocator::next_id(self)
    }
}
