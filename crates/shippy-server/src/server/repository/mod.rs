//! Storage for accepted consignments.
//!
//! The service talks to storage only through the [`Repository`] trait, so the
//! in-memory store used in production can be swapped for a test double that
//! fails on demand.
//!
//! - [`memory`] - [`MemoryRepository`], the lock-guarded in-process store.

pub mod memory;

pub use memory::MemoryRepository;
use shippy_core::{Result, proto::Consignment};
use std::sync::Arc;

/// Append-only store of consignments.
///
/// Implementations must be safe to call from any number of tasks at once.
/// `create` is synchronous: it must not perform I/O or hold a lock beyond the
/// in-memory write itself.
pub trait Repository: Send + Sync + 'static {
    /// Appends `consignment` and returns the stored value, unchanged.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](shippy_core::Error) if the repository refuses the
    /// write. The in-memory repository never does.
    fn create(&self, consignment: Consignment) -> Result<Arc<Consignment>>;

    /// Number of consignments stored so far.
    fn len(&self) -> usize;

    /// Returns `true` if nothing has been stored yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
