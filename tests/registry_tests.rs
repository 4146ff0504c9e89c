use voiceroom::{ParticipantEntry, ParticipantRegistry};

#[tokio::test]
async fn test_register_and_lookup() {
    let registry = ParticipantRegistry::new();
    let entry = ParticipantEntry::new();
    let session_id = entry.session_id;

    assert!(registry.register("Alice", entry).await.is_none());

    let found = registry.lookup("Alice").await.unwrap();
    assert_eq!(found.session_id, session_id);
    assert!(registry.lookup("Bob").await.is_none());
}

#[tokio::test]
async fn test_reregistration_replaces_entry() {
    let registry = ParticipantRegistry::new();

    let first = ParticipantEntry::new();
    let first_id = first.session_id;
    registry.register("Alice", first).await;

    let second = ParticipantEntry::new();
    let second_id = second.session_id;
    let replaced = registry.register("Alice", second).await.unwrap();

    assert_eq!(replaced.session_id, first_id);
    assert_eq!(registry.lookup("Alice").await.unwrap().session_id, second_id);
}

#[tokio::test]
async fn test_remove_if_ignores_stale_session() {
    let registry = ParticipantRegistry::new();

    let old = ParticipantEntry::new();
    let old_id = old.session_id;
    registry.register("Alice", old).await;

    // Alice reconnects; the old connection's teardown must not remove the
    // new entry.
    let new = ParticipantEntry::new();
    let new_id = new.session_id;
    registry.register("Alice", new).await;

    assert!(!registry.remove_if("Alice", old_id).await);
    assert_eq!(registry.lookup("Alice").await.unwrap().session_id, new_id);

    assert!(registry.remove_if("Alice", new_id).await);
    assert!(registry.lookup("Alice").await.is_none());
}

#[tokio::test]
async fn test_snapshot_sorted_by_name() {
    let registry = ParticipantRegistry::new();

    registry.register("Carol", ParticipantEntry::new()).await;
    registry.register("Alice", ParticipantEntry::new()).await;
    registry.register("Bob", ParticipantEntry::new()).await;

    let names: Vec<String> = registry
        .snapshot()
        .await
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
}
