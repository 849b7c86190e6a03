use super::Repository;
use parking_lot::RwLock;
use shippy_core::{Result, proto::Consignment};
use std::sync::Arc;

/// In-process consignment store guarded by a reader-writer lock.
///
/// Writers take the lock exclusively for the duration of a single `push`;
/// readers share it. Values are stored behind [`Arc`] so the handle returned
/// from [`Repository::create`] points at the stored element itself.
///
/// `parking_lot` locks do not poison, so a panic in another caller never
/// leaves the store unusable.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    consignments: RwLock<Vec<Arc<Consignment>>>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository with room for `capacity` consignments
    /// before it reallocates. This is a hint, not a limit.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            consignments: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Returns the stored consignments in append order.
    ///
    /// The copy is taken under the shared lock, so it never observes a
    /// half-finished write.
    pub fn snapshot(&self) -> Vec<Arc<Consignment>> {
        self.consignments.read().clone()
    }
}

impl Repository for MemoryRepository {
    fn create(&self, consignment: Consignment) -> Result<Arc<Consignment>> {
        let consignment = Arc::new(consignment);
        self.consignments.write().push(Arc::clone(&consignment));
        Ok(consignment)
    }

    fn len(&self) -> usize {
        self.consignments.read().len()
    }
}
