//! Fault-injecting repository for tests
//!
//! Wraps an `InMemoryRepository` and fails chosen writes or reloads while
//! counting every call that reaches it. Writes can be slowed down and
//! listings can come back unsorted.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::{DomainError, DomainResult, Ordered};
use super::memory_repo::InMemoryRepository;
use super::traits::{OrderedRepository, Repository};

pub struct FlakyRepository<T> {
    pub inner: InMemoryRepository<T>,
    failing_ids: Mutex<HashSet<u32>>,
    fail_reload: AtomicBool,
    unsorted: AtomicBool,
    write_delay_ms: AtomicU64,
    pub write_calls: AtomicUsize,
    pub reload_calls: AtomicUsize,
}

impl<T: Ordered<Id = u32>> FlakyRepository<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            inner: InMemoryRepository::with_records(records),
            failing_ids: Mutex::new(HashSet::new()),
            fail_reload: AtomicBool::new(false),
            unsorted: AtomicBool::new(false),
            write_delay_ms: AtomicU64::new(0),
            write_calls: AtomicUsize::new(0),
            reload_calls: AtomicUsize::new(0),
        }
    }

    /// Make every `order_index` write to `id` fail
    pub fn fail_writes_for(&self, id: u32) {
        self.failing_ids.lock().unwrap().insert(id);
    }

    pub fn fail_reloads(&self, fail: bool) {
        self.fail_reload.store(fail, Ordering::SeqCst);
    }

    /// Return listings in id order, ignoring the sort key
    pub fn list_unsorted(&self, unsorted: bool) {
        self.unsorted.store(unsorted, Ordering::SeqCst);
    }

    /// Hold every `order_index` write for `delay` before it settles
    pub fn delay_writes(&self, delay: Duration) {
        self.write_delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn reloads(&self) -> usize {
        self.reload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Ordered<Id = u32>> Repository<T> for FlakyRepository<T> {
    async fn create(&self, entity: &T) -> DomainResult<T> {
        self.inner.create(entity).await
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<T>> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self) -> DomainResult<Vec<T>> {
        self.inner.list().await
    }

    async fn update(&self, entity: &T) -> DomainResult<T> {
        self.inner.update(entity).await
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl<T: Ordered<Id = u32>> OrderedRepository<T> for FlakyRepository<T> {
    async fn set_order_index(&self, id: u32, order_index: u32) -> DomainResult<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.write_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        let failing = self.failing_ids.lock().unwrap().contains(&id);
        if failing {
            return Err(DomainError::Persistence(format!("write to {} rejected", id)));
        }
        self.inner.set_order_index(id, order_index).await
    }

    async fn list_ordered(&self, sort_key: Option<&str>) -> DomainResult<Vec<T>> {
        self.reload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reload.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("backend unavailable".to_string()));
        }
        if self.unsorted.load(Ordering::SeqCst) {
            return self.inner.list().await;
        }
        self.inner.list_ordered(sort_key).await
    }
}
