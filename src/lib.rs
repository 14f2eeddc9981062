//! Franchise Ops Backend
//!
//! Layered architecture:
//! - domain: Core entities and the ordering contract
//! - repository: Data access abstractions and implementations
//! - reorder: Drag-and-drop reconciliation of ordered lists
//! - commands: Handlers bridging the frontend to the sessions
//! - config: Settings file and environment overrides

pub mod commands;
pub mod config;
pub mod domain;
pub mod reorder;
pub mod repository;

pub use commands::{AppState, Collection};
pub use config::{load_settings, Settings};
pub use dnd_gesture::{resolve_drop, DragState, DropTarget, ListMove};

use domain::DomainResult;
use rolling_logger::RollingLoggerError;

/// Install the rolling logger described by `settings`
pub fn init_logging(settings: &Settings) -> Result<(), RollingLoggerError> {
    rolling_logger::init_logger_with(&settings.log_dir, &settings.app_name, &settings.logger_config())
}

/// Initialize logging and load every list of `state`
pub async fn bootstrap(settings: &Settings, state: AppState) -> DomainResult<AppState> {
    match init_logging(settings) {
        Ok(()) => {}
        Err(RollingLoggerError::AlreadyInitialized) => {
            log::debug!("Logger already initialized");
        }
        Err(e) => eprintln!("Failed to init rolling logger: {}", e),
    }

    log::info!("{} starting, log dir {}", settings.app_name, settings.log_dir.display());
    match state.load_all().await {
        Ok(()) => {
            let _ = rolling_logger::info("Collections loaded");
            Ok(state)
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("Loading collections failed: {}", e));
            Err(e)
        }
    }
}

/// Most recent log lines, for an in-app log view
pub fn recent_log_lines() -> Vec<String> {
    rolling_logger::recent_lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuditTask, DocumentCategory, Questionnaire, Role};
    use crate::repository::testing::FlakyRepository;
    use crate::repository::InMemoryRepository;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_bootstrap_loads_collections_and_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            log_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };

        let categories: InMemoryRepository<DocumentCategory> = InMemoryRepository::from_json(
            r#"[{"name": "Forms", "order_index": 1}, {"name": "Manuals", "order_index": 0}]"#,
        )
        .unwrap();
        let state = AppState::new(
            Arc::new(categories),
            Arc::new(InMemoryRepository::<Role>::new()),
            Arc::new(InMemoryRepository::<AuditTask>::new()),
            Arc::new(InMemoryRepository::<Questionnaire>::new()),
        );

        let state = bootstrap(&settings, state).await.expect("Bootstrap failed");

        let names: Vec<String> = state.categories.items().await.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Manuals", "Forms"]);
        assert!(state.roles.items().await.is_empty());

        if std::env::var("RUST_LOG").is_err() {
            let lines = recent_log_lines();
            assert!(lines.iter().any(|l| l.contains("Collections loaded")));
        }

        // Logger is process-wide, so the failure path runs in the same test
        let tasks = FlakyRepository::<AuditTask>::new(Vec::new());
        tasks.fail_reloads(true);
        let state = AppState::new(
            Arc::new(InMemoryRepository::<DocumentCategory>::new()),
            Arc::new(InMemoryRepository::<Role>::new()),
            Arc::new(tasks),
            Arc::new(InMemoryRepository::<Questionnaire>::new()),
        );

        assert!(matches!(
            bootstrap(&settings, state).await,
            Err(domain::DomainError::Persistence(_))
        ));
    }
}
