//! Ordered Entities
//!
//! Records that live in a user-orderable list carry an `order_index`.
//! The desired state is a dense permutation of `0..n-1` matching the
//! position of each record in the list.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// An entity with a persisted position in an ordered list
pub trait Ordered: Entity {
    /// Current persisted position
    fn order_index(&self) -> u32;

    /// Overwrite the position
    fn set_order_index(&mut self, order_index: u32);

    /// Stamp the last-modified time (millis since epoch)
    fn touch(&mut self, _at_millis: i64) {}
}

/// A single drag-and-drop move within one list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub source_index: usize,
    pub destination_index: usize,
}

impl ReorderRequest {
    pub fn new(source_index: usize, destination_index: usize) -> Self {
        Self {
            source_index,
            destination_index,
        }
    }

    /// A move onto its own position changes nothing
    pub fn is_noop(&self) -> bool {
        self.source_index == self.destination_index
    }
}

impl From<dnd_gesture::ListMove> for ReorderRequest {
    fn from(mv: dnd_gesture::ListMove) -> Self {
        Self::new(mv.from, mv.to)
    }
}

/// One `order_index` write against the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingWrite<Id> {
    pub item_id: Id,
    pub new_order_index: u32,
}

impl<Id> PendingWrite<Id> {
    pub fn new(item_id: Id, new_order_index: u32) -> Self {
        Self {
            item_id,
            new_order_index,
        }
    }
}
