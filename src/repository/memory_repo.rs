//! In-Memory Repository
//!
//! Map-backed implementation of the persistence contract, used by tests
//! and demos in place of the real entity backend.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, Entity, Ordered};
use super::traits::{OrderedRepository, Repository, SortKey};

struct MemoryState<T> {
    rows: BTreeMap<u32, T>,
    next_id: u32,
}

/// In-memory implementation of an ordered collection
pub struct InMemoryRepository<T> {
    state: Arc<Mutex<MemoryState<T>>>,
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl<T: Ordered<Id = u32>> InMemoryRepository<T> {
    /// Build a repository already holding `records`, ids kept as given
    pub fn with_records(records: Vec<T>) -> Self {
        let next_id = records.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
        let rows = records.into_iter().map(|r| (r.id(), r)).collect();
        Self {
            state: Arc::new(Mutex::new(MemoryState { rows, next_id })),
        }
    }

    /// Seed from a JSON array; records without an id get one assigned
    pub fn from_json(json: &str) -> DomainResult<Self>
    where
        T: DeserializeOwned,
    {
        let records: Vec<T> = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidInput(e.to_string()))?;

        let mut next_id = records.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
        let mut rows = BTreeMap::new();
        for mut record in records {
            if record.id() == 0 {
                record.set_id(next_id);
                next_id += 1;
            }
            if rows.insert(record.id(), record).is_some() {
                return Err(DomainError::Conflict("Duplicate id in seed data".to_string()));
            }
        }

        Ok(Self {
            state: Arc::new(Mutex::new(MemoryState { rows, next_id })),
        })
    }
}

#[async_trait]
impl<T: Ordered<Id = u32>> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, entity: &T) -> DomainResult<T> {
        let mut state = self.state.lock().await;

        let mut record = entity.clone();
        let id = state.next_id;
        state.next_id += 1;
        record.set_id(id);
        record.touch(chrono::Utc::now().timestamp_millis());

        state.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<T>> {
        let state = self.state.lock().await;
        Ok(state.rows.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<T>> {
        let state = self.state.lock().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn update(&self, entity: &T) -> DomainResult<T> {
        let mut state = self.state.lock().await;

        let row = state
            .rows
            .get_mut(&entity.id())
            .ok_or_else(|| DomainError::NotFound(format!("Record {} not found", entity.id())))?;

        *row = entity.clone();
        row.touch(chrono::Utc::now().timestamp_millis());
        Ok(row.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        state
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("Record {} not found", id)))
    }
}

#[async_trait]
impl<T: Ordered<Id = u32>> OrderedRepository<T> for InMemoryRepository<T> {
    async fn set_order_index(&self, id: u32, order_index: u32) -> DomainResult<()> {
        let mut state = self.state.lock().await;

        let row = state
            .rows
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Record {} not found", id)))?;

        row.set_order_index(order_index);
        row.touch(chrono::Utc::now().timestamp_millis());
        Ok(())
    }

    async fn list_ordered(&self, sort_key: Option<&str>) -> DomainResult<Vec<T>> {
        let key = match sort_key {
            Some(raw) => SortKey::parse(raw)?,
            None => SortKey::default(),
        };

        let mut records = self.list().await?;
        key.sort(&mut records);
        Ok(records)
    }
}
