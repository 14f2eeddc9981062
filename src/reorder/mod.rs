//! Reorder Layer
//!
//! Ordered-list reconciliation:
//! - reconciler: pure move + minimal write set
//! - apply: concurrent persistence with reload-on-failure
//! - session: UI-facing list owner with the busy flag

mod reconciler;
mod apply;
mod session;

pub use reconciler::{reorder, compute_writes, ReorderPlan};
pub use apply::{apply_reorder, ApplyOutcome};
pub use session::{ReorderSession, ReorderStatus, ReorderNotice};
