//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! The persistence backend itself lives outside this crate; these traits
//! are the only contract the reorder logic relies on.

use async_trait::async_trait;
use crate::domain::{DomainError, DomainResult, Entity, Ordered};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Extension for repositories whose records carry an `order_index`
#[async_trait]
pub trait OrderedRepository<T: Ordered>: Repository<T> {
    /// Patch only the `order_index` of one record
    async fn set_order_index(&self, id: T::Id, order_index: u32) -> DomainResult<()>;

    /// List records sorted by `sort_key` (`order_index` when None)
    ///
    /// Reflects the latest committed state.
    async fn list_ordered(&self, sort_key: Option<&str>) -> DomainResult<Vec<T>>;
}

/// Field a listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    OrderIndex,
    Id,
}

/// Parsed sort key: `order_index`, `id`, `-order_index`, `-id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl Default for SortKey {
    fn default() -> Self {
        Self {
            field: SortField::OrderIndex,
            descending: false,
        }
    }
}

impl SortKey {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let raw = raw.trim();
        let (descending, name) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let field = match name {
            "order_index" => SortField::OrderIndex,
            "id" => SortField::Id,
            other => {
                return Err(DomainError::InvalidInput(format!(
                    "Unsupported sort key: {}",
                    other
                )))
            }
        };

        Ok(Self { field, descending })
    }

    /// Sort records in place; ties on `order_index` fall back to id
    pub fn sort<T: Ordered>(&self, records: &mut [T]) {
        match self.field {
            SortField::OrderIndex => {
                records.sort_by(|a, b| {
                    a.order_index()
                        .cmp(&b.order_index())
                        .then_with(|| a.id().cmp(&b.id()))
                });
            }
            SortField::Id => records.sort_by_key(|r| r.id()),
        }
        if self.descending {
            records.reverse();
        }
    }
}
