//! Commands for ordered collections
//!
//! List, create, reorder and reindex any of the back-office lists.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use dnd_gesture::DropTarget;

use crate::domain::{Ordered, ReorderRequest};
use crate::reorder::{ReorderNotice, ReorderSession, ReorderStatus};
use crate::repository::OrderedRepository;
use super::{AppState, Collection};

async fn list_json<T, R>(session: &ReorderSession<T, R>) -> Result<Value, String>
where
    T: Ordered + Serialize,
    R: OrderedRepository<T> + ?Sized,
{
    session.refresh().await.map_err(|e| e.to_string())?;
    serde_json::to_value(session.items().await).map_err(|e| e.to_string())
}

async fn create_json<T, R>(session: &ReorderSession<T, R>, payload: Value) -> Result<Value, String>
where
    T: Ordered + Serialize + DeserializeOwned,
    R: OrderedRepository<T> + ?Sized,
{
    let record: T = serde_json::from_value(payload).map_err(|e| format!("Invalid payload: {}", e))?;
    let created = session.append(record).await.map_err(|e| e.to_string())?;
    serde_json::to_value(created).map_err(|e| e.to_string())
}

/// Reload a collection and return it in display order
pub async fn list_collection(state: &AppState, collection: Collection) -> Result<Value, String> {
    match collection {
        Collection::Categories => list_json(&state.categories).await,
        Collection::Roles => list_json(&state.roles).await,
        Collection::Tasks => list_json(&state.tasks).await,
        Collection::Questionnaires => list_json(&state.questionnaires).await,
    }
}

/// Create a record at the end of a collection
pub async fn create_in_collection(
    state: &AppState,
    collection: Collection,
    payload: Value,
) -> Result<Value, String> {
    match collection {
        Collection::Categories => create_json(&state.categories, payload).await,
        Collection::Roles => create_json(&state.roles, payload).await,
        Collection::Tasks => create_json(&state.tasks, payload).await,
        Collection::Questionnaires => create_json(&state.questionnaires, payload).await,
    }
}

/// Move one row of a collection
pub async fn reorder_collection(
    state: &AppState,
    collection: Collection,
    source_index: usize,
    destination_index: usize,
) -> Result<ReorderStatus, String> {
    let request = ReorderRequest::new(source_index, destination_index);
    log::debug!("Reorder {} {:?}", collection.as_str(), request);

    let result = match collection {
        Collection::Categories => state.categories.reorder(request).await,
        Collection::Roles => state.roles.reorder(request).await,
        Collection::Tasks => state.tasks.reorder(request).await,
        Collection::Questionnaires => state.questionnaires.reorder(request).await,
    };
    result.map_err(|e| e.to_string())
}

/// Apply a finished drag gesture to a collection
pub async fn drop_in_collection(
    state: &AppState,
    collection: Collection,
    dragged_id: u32,
    target: DropTarget<u32>,
) -> Result<ReorderStatus, String> {
    let result = match collection {
        Collection::Categories => state.categories.handle_drop(dragged_id, target).await,
        Collection::Roles => state.roles.handle_drop(dragged_id, target).await,
        Collection::Tasks => state.tasks.handle_drop(dragged_id, target).await,
        Collection::Questionnaires => state.questionnaires.handle_drop(dragged_id, target).await,
    };
    result.map_err(|e| e.to_string())
}

/// Rewrite a collection's indices to `0..n-1`
pub async fn reindex_collection(state: &AppState, collection: Collection) -> Result<usize, String> {
    let result = match collection {
        Collection::Categories => state.categories.reindex().await,
        Collection::Roles => state.roles.reindex().await,
        Collection::Tasks => state.tasks.reindex().await,
        Collection::Questionnaires => state.questionnaires.reindex().await,
    };
    result.map_err(|e| e.to_string())
}

/// Whether drag handles of a collection must be disabled
pub fn collection_busy(state: &AppState, collection: Collection) -> bool {
    match collection {
        Collection::Categories => state.categories.is_busy(),
        Collection::Roles => state.roles.is_busy(),
        Collection::Tasks => state.tasks.is_busy(),
        Collection::Questionnaires => state.questionnaires.is_busy(),
    }
}

/// Pop the notice left by a reverted reorder
pub async fn take_collection_notice(state: &AppState, collection: Collection) -> Option<ReorderNotice> {
    match collection {
        Collection::Categories => state.categories.take_notice().await,
        Collection::Roles => state.roles.take_notice().await,
        Collection::Tasks => state.tasks.take_notice().await,
        Collection::Questionnaires => state.questionnaires.take_notice().await,
    }
}
