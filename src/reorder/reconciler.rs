//! Ordered Collection Reconciler
//!
//! Pure translation of one drag-and-drop move into the new display order
//! and the minimal set of `order_index` writes that persists it.

use crate::domain::{DomainError, DomainResult, Entity, Ordered, PendingWrite, ReorderRequest};

/// Result of a reorder: what to show now and what to persist
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderPlan<T: Entity> {
    /// Items in their new display order, `order_index` already matching position
    pub items: Vec<T>,
    /// Writes needed to make the backend agree with `items`
    pub writes: Vec<PendingWrite<T::Id>>,
}

impl<T: Entity> ReorderPlan<T> {
    /// True when nothing has to be persisted
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Move the item at `request.source_index` to `request.destination_index`.
///
/// Removal happens first, then insertion into the shortened list. A move
/// onto its own position returns the list untouched with no writes.
pub fn reorder<T: Ordered>(items: &[T], request: ReorderRequest) -> DomainResult<ReorderPlan<T>> {
    let len = items.len();
    if request.source_index >= len || request.destination_index >= len {
        return Err(DomainError::InvalidInput(format!(
            "Reorder {} -> {} out of range for {} items",
            request.source_index, request.destination_index, len
        )));
    }

    if request.is_noop() {
        return Ok(ReorderPlan {
            items: items.to_vec(),
            writes: Vec::new(),
        });
    }

    let mut reordered = items.to_vec();
    let moved = reordered.remove(request.source_index);
    reordered.insert(request.destination_index, moved);

    let writes = compute_writes(&reordered);
    for (position, item) in reordered.iter_mut().enumerate() {
        item.set_order_index(position as u32);
    }

    Ok(ReorderPlan {
        items: reordered,
        writes,
    })
}

/// Writes for every item whose `order_index` differs from its position
pub fn compute_writes<T: Ordered>(items: &[T]) -> Vec<PendingWrite<T::Id>> {
    items
        .iter()
        .enumerate()
        .filter(|(position, item)| item.order_index() as usize != *position)
        .map(|(position, item)| PendingWrite::new(item.id(), position as u32))
        .collect()
}
