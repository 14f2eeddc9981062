//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO dependency on the repository or command layers.

mod entity;
mod ordered;
mod category;
mod role;
mod task;
mod questionnaire;

pub use entity::{Entity, DomainError, DomainResult};
pub use ordered::{Ordered, ReorderRequest, PendingWrite};
pub use category::DocumentCategory;
pub use role::Role;
pub use task::AuditTask;
pub use questionnaire::Questionnaire;
