//! Commands Layer
//!
//! Handlers that bridge the frontend to the reorder sessions. Payloads
//! travel as JSON values and errors as strings.

mod collection_cmd;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{AuditTask, DocumentCategory, DomainResult, Questionnaire, Role};
use crate::reorder::ReorderSession;
use crate::repository::{InMemoryRepository, OrderedRepository};

pub use collection_cmd::*;

/// The orderable lists of the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Categories,
    Roles,
    Tasks,
    Questionnaires,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Categories => "categories",
            Collection::Roles => "roles",
            Collection::Tasks => "tasks",
            Collection::Questionnaires => "questionnaires",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "categories" => Some(Collection::Categories),
            "roles" => Some(Collection::Roles),
            "tasks" => Some(Collection::Tasks),
            "questionnaires" => Some(Collection::Questionnaires),
            _ => None,
        }
    }
}

pub type Session<T> = ReorderSession<T, dyn OrderedRepository<T>>;

/// Application state shared across commands
pub struct AppState {
    pub categories: Session<DocumentCategory>,
    pub roles: Session<Role>,
    pub tasks: Session<AuditTask>,
    pub questionnaires: Session<Questionnaire>,
}

impl AppState {
    pub fn new(
        categories: Arc<dyn OrderedRepository<DocumentCategory>>,
        roles: Arc<dyn OrderedRepository<Role>>,
        tasks: Arc<dyn OrderedRepository<AuditTask>>,
        questionnaires: Arc<dyn OrderedRepository<Questionnaire>>,
    ) -> Self {
        Self {
            categories: ReorderSession::new(categories),
            roles: ReorderSession::new(roles),
            tasks: ReorderSession::new(tasks),
            questionnaires: ReorderSession::new(questionnaires),
        }
    }

    /// State backed by empty in-memory collections
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<DocumentCategory>::new()),
            Arc::new(InMemoryRepository::<Role>::new()),
            Arc::new(InMemoryRepository::<AuditTask>::new()),
            Arc::new(InMemoryRepository::<Questionnaire>::new()),
        )
    }

    /// Fetch every list from the backend
    pub async fn load_all(&self) -> DomainResult<()> {
        self.categories.load().await?;
        self.roles.load().await?;
        self.tasks.load().await?;
        self.questionnaires.load().await?;
        Ok(())
    }
}
