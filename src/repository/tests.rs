//! Repository Integration Tests
//!
//! Tests for InMemoryRepository and the positioning operations.

#[cfg(test)]
mod tests {
    use crate::domain::{DocumentCategory, DomainError, Entity, Role};
    use crate::repository::{
        InMemoryRepository, OrderedRepository, PositioningOperations, Repository,
    };

    fn category(name: &str, order_index: u32) -> DocumentCategory {
        DocumentCategory::new(0, name.to_string(), order_index)
    }

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let repo: InMemoryRepository<DocumentCategory> = InMemoryRepository::new();

        let first = repo.create(&category("Manuals", 0)).await.expect("Failed to create");
        let second = repo.create(&category("Forms", 1)).await.expect("Failed to create");

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert!(first.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo: InMemoryRepository<DocumentCategory> = InMemoryRepository::new();
        let created = repo.create(&category("Find me", 0)).await.unwrap();

        let found = repo.find_by_id(created.id).await.expect("Find failed");
        assert_eq!(found.unwrap().name, "Find me");

        let missing = repo.find_by_id(99).await.expect("Find failed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_item() {
        let repo: InMemoryRepository<Role> = InMemoryRepository::new();
        let mut created = repo.create(&Role::new(0, "Cashier".to_string(), 0)).await.unwrap();

        created.name = "Senior cashier".to_string();
        let updated = repo.update(&created).await.expect("Update failed");
        assert_eq!(updated.name, "Senior cashier");

        let mut ghost = created.clone();
        ghost.id = 42;
        assert!(matches!(repo.update(&ghost).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_item() {
        let repo: InMemoryRepository<DocumentCategory> = InMemoryRepository::new();
        let created = repo.create(&category("To delete", 0)).await.unwrap();

        repo.delete(created.id).await.expect("Delete failed");
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(repo.delete(created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_set_order_index_only_touches_position() {
        let repo: InMemoryRepository<DocumentCategory> = InMemoryRepository::new();
        let created = repo.create(&category("Policies", 0)).await.unwrap();

        repo.set_order_index(created.id, 5).await.expect("Write failed");

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.order_index, 5);
        assert_eq!(found.name, "Policies");

        assert!(matches!(
            repo.set_order_index(77, 0).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_ordered_sorting() {
        let repo = InMemoryRepository::with_records(vec![
            DocumentCategory::new(1, "c".to_string(), 2),
            DocumentCategory::new(2, "a".to_string(), 0),
            DocumentCategory::new(3, "b".to_string(), 1),
            DocumentCategory::new(4, "tie".to_string(), 1),
        ]);

        let names = |records: Vec<DocumentCategory>| {
            records.into_iter().map(|r| r.name).collect::<Vec<_>>()
        };

        let ordered = repo.list_ordered(None).await.unwrap();
        assert_eq!(names(ordered), vec!["a", "b", "tie", "c"]);

        let by_id_desc = repo.list_ordered(Some("-id")).await.unwrap();
        assert_eq!(names(by_id_desc), vec!["tie", "b", "a", "c"]);

        assert!(repo.list_ordered(Some("name")).await.is_err());
    }

    #[tokio::test]
    async fn test_from_json_seed() {
        let repo: InMemoryRepository<DocumentCategory> = InMemoryRepository::from_json(
            r#"[{"id": 3, "name": "HR", "order_index": 0}, {"name": "Legal", "order_index": 1}]"#,
        )
        .expect("Seed failed");

        let records = repo.list_ordered(None).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, 4);

        let created = repo.create(&category("Next", 2)).await.unwrap();
        assert_eq!(created.id, 5);

        let duplicate: Result<InMemoryRepository<DocumentCategory>, _> =
            InMemoryRepository::from_json(r#"[{"id": 1, "name": "x"}, {"id": 1, "name": "y"}]"#);
        assert!(matches!(duplicate, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_reindex_writes_only_gaps() {
        let repo = InMemoryRepository::with_records(vec![
            DocumentCategory::new(1, "a".to_string(), 0),
            DocumentCategory::new(2, "b".to_string(), 3),
            DocumentCategory::new(3, "c".to_string(), 7),
        ]);

        let writes = repo.reindex().await.expect("Reindex failed");
        assert_eq!(writes, 2);

        let indices: Vec<u32> = repo
            .list_ordered(None)
            .await
            .unwrap()
            .iter()
            .map(|r| r.order_index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);

        // Already dense: nothing to write
        assert_eq!(repo.reindex().await.unwrap(), 0);
    }
}
