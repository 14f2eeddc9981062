//! Positioning Operations
//!
//! Operations for managing `order_index` values of a whole collection.
//! Available on every ordered repository.

use async_trait::async_trait;

use crate::domain::{DomainResult, Ordered};
use crate::reorder::compute_writes;
use super::traits::OrderedRepository;

/// Trait for collection positioning operations
#[async_trait]
pub trait PositioningOperations<T: Ordered>: OrderedRepository<T> {
    /// Reindex records to be sequential (0, 1, 2, ...)
    ///
    /// Only records whose index actually changes are written.
    /// Returns the number of writes issued.
    async fn reindex(&self) -> DomainResult<usize> {
        let records = self.list_ordered(None).await?;
        let writes = compute_writes(&records);

        for write in &writes {
            self.set_order_index(write.item_id, write.new_order_index).await?;
        }

        log::debug!("Reindexed collection with {} writes", writes.len());
        Ok(writes.len())
    }
}

#[async_trait]
impl<T: Ordered, R: OrderedRepository<T> + ?Sized> PositioningOperations<T> for R {}
