//! Reorder Session
//!
//! UI-facing owner of one ordered list. Holds the displayed items, the
//! busy flag that blocks a second drag while writes are in flight, and
//! the transient notice shown after a reverted reorder.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use dnd_gesture::{resolve_drop, DropTarget};

use crate::domain::{DomainError, DomainResult, Entity, Ordered, ReorderRequest};
use crate::repository::{OrderedRepository, PositioningOperations, Repository};
use super::apply::{apply_reorder, ApplyOutcome};
use super::reconciler::reorder;

/// Result of a reorder as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderStatus {
    /// Nothing moved, nothing written
    Unchanged,
    /// New order is durable
    Committed,
    /// Writes failed, list replaced by the last known good state
    Reverted,
}

/// Transient, non-blocking message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderNotice {
    pub message: String,
    pub reason: String,
}

impl ReorderNotice {
    fn reverted(error: &DomainError) -> Self {
        Self {
            message: "Reorder failed and was reverted".to_string(),
            reason: error.to_string(),
        }
    }
}

/// Clears the busy flag when the reorder finishes, whatever the outcome
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One ordered list and its reorder state
///
/// The list is always loaded by ascending `order_index`, the order the
/// reconciler writes back.
pub struct ReorderSession<T: Ordered, R: ?Sized> {
    repo: Arc<R>,
    items: Mutex<Vec<T>>,
    busy: AtomicBool,
    notice: Mutex<Option<ReorderNotice>>,
}

impl<T, R> ReorderSession<T, R>
where
    T: Ordered,
    R: OrderedRepository<T> + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            items: Mutex::new(Vec::new()),
            busy: AtomicBool::new(false),
            notice: Mutex::new(None),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Replace the displayed list with the backend's current state
    ///
    /// Fails with `Conflict` while a reorder is in flight.
    pub async fn load(&self) -> DomainResult<()> {
        let _guard = self.claim()?;
        self.fetch().await
    }

    /// Like `load`, but keeps the optimistic list while a reorder is in flight
    pub async fn refresh(&self) -> DomainResult<()> {
        match self.claim() {
            Ok(_guard) => self.fetch().await,
            Err(_) => {
                log::debug!("Refresh skipped, reorder in flight");
                Ok(())
            }
        }
    }

    async fn fetch(&self) -> DomainResult<()> {
        // Held across the fetch so a concurrent append is not overwritten
        let mut items = self.items.lock().await;
        let records = self.repo.list_ordered(None).await?;
        log::debug!("Loaded {} records", records.len());
        *items = records;
        Ok(())
    }

    /// Snapshot of the displayed list
    pub async fn items(&self) -> Vec<T> {
        self.items.lock().await.clone()
    }

    /// True while a reorder's writes are in flight; drag handles stay disabled
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Pop the pending notice, if any
    pub async fn take_notice(&self) -> Option<ReorderNotice> {
        self.notice.lock().await.take()
    }

    fn claim(&self) -> DomainResult<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| DomainError::Conflict("A reorder is already in flight".to_string()))?;
        Ok(BusyGuard(&self.busy))
    }

    /// Apply one drag-and-drop move
    ///
    /// The list shows the new order immediately. On failure it is replaced
    /// by a reload, or by the pre-move list if the reload fails too.
    /// Records appended while the writes were in flight are kept either way.
    pub async fn reorder(&self, request: ReorderRequest) -> DomainResult<ReorderStatus> {
        let _guard = self.claim()?;

        let (previous, plan) = {
            let mut items = self.items.lock().await;
            let plan = reorder(items.as_slice(), request)?;
            if plan.is_empty() {
                return Ok(ReorderStatus::Unchanged);
            }
            let previous = std::mem::replace(&mut *items, plan.items.clone());
            (previous, plan)
        };

        match apply_reorder(self.repo.as_ref(), &plan).await {
            ApplyOutcome::Committed => Ok(ReorderStatus::Committed),
            ApplyOutcome::Reverted { reloaded, error } => {
                let mut items = self.items.lock().await;
                let mut restored = reloaded.unwrap_or(previous);
                let appended: Vec<T> = items
                    .iter()
                    .filter(|item| !plan.items.iter().any(|p| p.id() == item.id()))
                    .filter(|item| !restored.iter().any(|r| r.id() == item.id()))
                    .cloned()
                    .collect();
                restored.extend(appended);
                *items = restored;
                *self.notice.lock().await = Some(ReorderNotice::reverted(&error));
                Ok(ReorderStatus::Reverted)
            }
        }
    }

    /// Move the record with `id` to `destination_index`
    pub async fn move_item(&self, id: T::Id, destination_index: usize) -> DomainResult<ReorderStatus> {
        let source_index = self
            .items
            .lock()
            .await
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| DomainError::NotFound(format!("Record {:?} not in list", id)))?;

        self.reorder(ReorderRequest::new(source_index, destination_index))
            .await
    }

    /// Resolve a finished drag gesture and apply it
    pub async fn handle_drop(&self, dragged: T::Id, target: DropTarget<T::Id>) -> DomainResult<ReorderStatus> {
        let ids: Vec<T::Id> = self.items.lock().await.iter().map(|item| item.id()).collect();

        match resolve_drop(&ids, dragged, target) {
            Some(mv) => self.reorder(mv.into()).await,
            None => {
                log::debug!("Drop of {:?} resolved to no move", dragged);
                Ok(ReorderStatus::Unchanged)
            }
        }
    }

    /// Create `item` at the end of the list
    ///
    /// Allowed while a reorder is in flight; the record survives a revert.
    pub async fn append(&self, item: T) -> DomainResult<T> {
        let mut items = self.items.lock().await;

        let mut record = item;
        record.set_order_index(items.len() as u32);
        let created = self.repo.create(&record).await?;

        items.push(created.clone());
        Ok(created)
    }

    /// Normalise backend indices to `0..n-1`, then reload
    pub async fn reindex(&self) -> DomainResult<usize> {
        let _guard = self.claim()?;

        let writes = self.repo.reindex().await?;
        self.fetch().await?;
        Ok(writes)
    }
}
