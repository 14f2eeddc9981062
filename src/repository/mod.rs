//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod memory_repo;
mod positioning;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;

pub use traits::{Repository, OrderedRepository, SortKey, SortField};
pub use memory_repo::InMemoryRepository;
pub use positioning::PositioningOperations;
