//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone + 'static {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + Ord + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;

    /// Assigns the identifier handed out by the backend on create
    fn set_id(&mut self, id: Self::Id);
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// `Persistence` covers every failed write or reload against the backend
/// (network, validation or server side).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Persistence failure: {0}")]
    Persistence(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::Persistence("connection reset".to_string());
        assert_eq!(err.to_string(), "Persistence failure: connection reset");

        let err = DomainError::NotFound("Role 7".to_string());
        assert_eq!(err.to_string(), "Not found: Role 7");
    }
}
