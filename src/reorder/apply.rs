//! Applying a Reorder
//!
//! Dispatches the writes of a plan concurrently. The batch either commits
//! as a whole or the collection is reloaded from the backend; writes are
//! never retried one by one.

use futures::future::join_all;

use crate::domain::{DomainError, Ordered};
use crate::repository::OrderedRepository;
use super::reconciler::ReorderPlan;

/// How a reorder batch ended
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome<T> {
    /// Every write succeeded
    Committed,
    /// At least one write failed and the collection was reloaded.
    /// `reloaded` is None when the reload failed as well.
    Reverted {
        reloaded: Option<Vec<T>>,
        error: DomainError,
    },
}

impl<T> ApplyOutcome<T> {
    pub fn is_committed(&self) -> bool {
        matches!(self, ApplyOutcome::Committed)
    }
}

/// Persist `plan`, reloading by ascending `order_index` on failure
pub async fn apply_reorder<T, R>(repo: &R, plan: &ReorderPlan<T>) -> ApplyOutcome<T>
where
    T: Ordered,
    R: OrderedRepository<T> + ?Sized,
{
    if plan.writes.is_empty() {
        return ApplyOutcome::Committed;
    }

    let results = join_all(
        plan.writes
            .iter()
            .map(|w| repo.set_order_index(w.item_id, w.new_order_index)),
    )
    .await;

    let mut failures = plan
        .writes
        .iter()
        .zip(results)
        .filter_map(|(write, result)| match result {
            Ok(()) => None,
            Err(e) => {
                log::warn!(
                    "order_index write {:?} -> {} failed: {}",
                    write.item_id,
                    write.new_order_index,
                    e
                );
                Some(e)
            }
        })
        .collect::<Vec<_>>();

    if failures.is_empty() {
        log::info!("Reorder committed ({} writes)", plan.writes.len());
        return ApplyOutcome::Committed;
    }

    log::error!(
        "Reorder failed: {} of {} writes rejected, reloading collection",
        failures.len(),
        plan.writes.len()
    );
    let error = failures.swap_remove(0);

    match repo.list_ordered(None).await {
        Ok(items) => ApplyOutcome::Reverted {
            reloaded: Some(items),
            error,
        },
        Err(reload_error) => {
            log::error!("Reload after failed reorder also failed: {}", reload_error);
            ApplyOutcome::Reverted {
                reloaded: None,
                error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentCategory, ReorderRequest};
    use crate::reorder::reorder;
    use crate::repository::testing::FlakyRepository;

    fn abc() -> Vec<DocumentCategory> {
        ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, name)| DocumentCategory::new(i as u32 + 1, name.to_string(), i as u32))
            .collect()
    }

    #[tokio::test]
    async fn test_all_writes_commit() {
        let repo = FlakyRepository::new(abc());
        let plan = reorder(&abc(), ReorderRequest::new(0, 2)).unwrap();

        let outcome = apply_reorder(&repo, &plan).await;

        assert!(outcome.is_committed());
        assert_eq!(repo.writes(), 3);
        assert_eq!(repo.reloads(), 0);

        let stored = repo.inner.list_ordered(None).await.unwrap();
        let names: Vec<&str> = stored.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_one_rejected_write_reloads_once() {
        let repo = FlakyRepository::new(abc());
        repo.fail_writes_for(3);
        let plan = reorder(&abc(), ReorderRequest::new(0, 2)).unwrap();

        let outcome = apply_reorder(&repo, &plan).await;

        match outcome {
            ApplyOutcome::Reverted { reloaded, error } => {
                assert!(matches!(error, DomainError::Persistence(_)));
                assert_eq!(reloaded.map(|items| items.len()), Some(3));
            }
            ApplyOutcome::Committed => panic!("expected revert"),
        }
        // Every write dispatched once, none retried
        assert_eq!(repo.writes(), 3);
        assert_eq!(repo.reloads(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_still_reverts() {
        let repo = FlakyRepository::new(abc());
        repo.fail_writes_for(1);
        repo.fail_reloads(true);
        let plan = reorder(&abc(), ReorderRequest::new(0, 1)).unwrap();

        let outcome = apply_reorder(&repo, &plan).await;

        assert!(matches!(outcome, ApplyOutcome::Reverted { reloaded: None, .. }));
        assert_eq!(repo.reloads(), 1);
    }

    #[tokio::test]
    async fn test_empty_plan_makes_no_calls() {
        let repo = FlakyRepository::new(abc());
        let plan = reorder(&abc(), ReorderRequest::new(2, 2)).unwrap();

        assert!(apply_reorder(&repo, &plan).await.is_committed());
        assert_eq!(repo.writes(), 0);
        assert_eq!(repo.reloads(), 0);
    }
}
