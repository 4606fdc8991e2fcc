use claims::{assert_err, assert_ok};
use server::model::EntryStatus;
use server::queue_manager::{QueueCommand, QueueManager, QueueResponse, QueueSettings};
use server::store::{MemoryStateStore, StateStore};
use std::sync::Arc;

fn setup() -> (Arc<MemoryStateStore>, QueueManager) {
    let store = Arc::new(MemoryStateStore::new());
    let manager = QueueManager::new(store.clone(), QueueSettings::default());
    (store, manager)
}

#[tokio::test]
async fn test_counter_walkthrough() {
    let (_store, manager) = setup();

    let alice = assert_ok!(manager.join("Alice", "555-0100", "haircut").await);
    assert_eq!((alice.token.as_str(), alice.position, alice.eta), ("T1", 1, 2));

    let bob = assert_ok!(manager.join("Bob", "555-0101", "shave").await);
    assert_eq!((bob.token.as_str(), bob.position, bob.eta), ("T2", 2, 4));

    // Skip keeps Alice in place
    assert!(manager.skip("T1").await.unwrap().success);
    let status = manager.status("T1").await.unwrap();
    assert_eq!(status.position, 1);
    assert_eq!(status.status, EntryStatus::Skipped);

    // Serving Bob moves him to the served log
    assert!(manager.serve("T2").await.unwrap().success);

    let listed = manager.list_all().await.unwrap();
    let rows: Vec<(&str, EntryStatus)> = listed
        .iter()
        .map(|entry| (entry.token.as_str(), entry.status))
        .collect();
    assert_eq!(
        rows,
        vec![("T1", EntryStatus::Skipped), ("T2", EntryStatus::Served)]
    );

    // A served token is no longer waiting
    let outcome = manager.serve("T2").await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Token not found"));
    assert_err!(manager.status("T2").await);

    assert!(manager.resume("T1").await.unwrap().success);
    assert_eq!(
        manager.status("T1").await.unwrap().status,
        EntryStatus::Waiting
    );
}

#[tokio::test]
async fn test_leave_preserves_order_of_others() {
    let (_store, manager) = setup();
    for name in ["A", "B", "C", "D"] {
        manager.join(name, "555", "haircut").await.unwrap();
    }

    assert!(manager.leave("T2").await.unwrap());

    let tokens: Vec<String> = manager
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.token)
        .collect();
    assert_eq!(tokens, vec!["T1", "T3", "T4"]);

    let status = manager.status("T4").await.unwrap();
    assert_eq!(status.position, 3);
    assert_eq!(status.eta, 6);
}

#[tokio::test]
async fn test_leave_unknown_token_succeeds() {
    let (_store, manager) = setup();
    manager.join("Alice", "555", "haircut").await.unwrap();

    let response = manager
        .execute_command(QueueCommand::Leave {
            token: "T99".to_string(),
        })
        .await;
    match response {
        QueueResponse::Left { token, removed } => {
            assert_eq!(token, "T99");
            assert!(!removed);
        }
        other => panic!("unexpected response: {other:?}"),
    }
    assert_eq!(manager.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_served_entries_do_not_affect_positions() {
    let (_store, manager) = setup();
    manager.join("A", "555", "haircut").await.unwrap();
    manager.join("B", "555", "haircut").await.unwrap();
    manager.serve("T1").await.unwrap();

    let status = manager.status("T2").await.unwrap();
    assert_eq!(status.position, 1);
    assert_eq!(status.eta, 2);
}

#[tokio::test]
async fn test_skipped_set_tracks_stored_status() {
    let (store, manager) = setup();
    manager.join("A", "555", "haircut").await.unwrap();
    manager.join("B", "555", "haircut").await.unwrap();

    manager.skip("T1").await.unwrap();
    manager.skip("T2").await.unwrap();
    manager.resume("T2").await.unwrap();
    manager.leave("T1").await.unwrap();

    let skipped = store.load_skipped().await.unwrap();
    assert!(skipped.is_empty());

    let waiting = store.load_waiting().await.unwrap();
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].status, EntryStatus::Waiting);
}

#[tokio::test]
async fn test_staff_actions_on_unknown_tokens() {
    let (store, manager) = setup();

    let serve = manager.serve("T1").await.unwrap();
    let skip = manager.skip("T1").await.unwrap();
    let resume = manager.resume("T1").await.unwrap();

    assert_eq!(serve.error.as_deref(), Some("Token not found"));
    assert_eq!(skip.error.as_deref(), Some("Token not found"));
    assert_eq!(resume.error.as_deref(), Some("Token not found or not skipped"));

    // Failed actions write nothing
    assert!(store.load_waiting().await.unwrap().is_empty());
    assert!(store.load_served().await.unwrap().is_empty());
    assert!(store.load_skipped().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_managers_sharing_a_store_see_the_same_queue() {
    let store = Arc::new(MemoryStateStore::new());
    let front_desk = QueueManager::new(store.clone(), QueueSettings::default());
    let counter = QueueManager::new(store, QueueSettings::default());

    front_desk.join("Alice", "555", "haircut").await.unwrap();
    assert!(counter.serve("T1").await.unwrap().success);

    let receipt = front_desk.join("Bob", "555", "haircut").await.unwrap();
    assert_eq!(receipt.token, "T2");
    assert_eq!(receipt.position, 1);
}
