use std::sync::Arc;
use std::time::Duration;

use noticeboard::{DismissPolicy, MemoryDismissalStore, RefreshOutcome};

use super::harness::{ScriptedSource, announcement, manager};

#[tokio::test]
async fn fresh_manager_starts_empty() {
    let source = ScriptedSource::new();
    let store = Arc::new(MemoryDismissalStore::new());
    let manager = manager(&source, &store);

    let state = manager.state();
    assert!(state.current_announcement.is_none());
    assert!(!state.is_expanded);
    assert!(!state.is_dismissed);
    assert!(!state.is_loading);
    assert!(state.last_error.is_none());
    assert!(!manager.should_show(&DismissPolicy::default()));
}

#[tokio::test]
async fn loading_flag_is_set_while_fetch_is_pending() {
    let source = ScriptedSource::new();
    let store = Arc::new(MemoryDismissalStore::new());
    let manager = manager(&source, &store);
    let mut rx = manager.subscribe();

    let release = source.push_gated();
    let pending = manager.refresh();
    tokio::pin!(pending);
    assert!(
        tokio::time::timeout(Duration::from_millis(20), &mut pending)
            .await
            .is_err()
    );

    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_loading);

    release.send(Ok(Some(announcement("a1")))).unwrap();
    assert_eq!(pending.await, RefreshOutcome::Applied);

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    assert!(!state.is_loading);
    assert_eq!(
        state.current_announcement.map(|a| a.id.as_str().to_string()),
        Some("a1".to_string())
    );
}

#[tokio::test]
async fn successful_refresh_clears_previous_error() {
    let source = ScriptedSource::new();
    let store = Arc::new(MemoryDismissalStore::new());
    source.push_failure("boom");
    source.push_announcement(announcement("a1"));
    let manager = manager(&source, &store);

    assert_eq!(manager.refresh().await, RefreshOutcome::Failed);
    assert!(manager.state().last_error.is_some());

    assert_eq!(manager.refresh().await, RefreshOutcome::Applied);
    assert!(manager.state().last_error.is_none());
}

#[tokio::test]
async fn empty_result_clears_announcement_but_not_dismissal() {
    let source = ScriptedSource::new();
    let store = Arc::new(MemoryDismissalStore::new());
    source.push_announcement(announcement("a1"));
    source.push_empty();
    let manager = manager(&source, &store);

    manager.refresh().await;
    manager.dismiss(&DismissPolicy::SessionOnly);

    assert_eq!(manager.refresh().await, RefreshOutcome::Applied);
    assert!(manager.current_announcement().is_none());
    assert!(manager.is_dismissed());
    assert!(!manager.should_show(&DismissPolicy::SessionOnly));
}

#[tokio::test]
async fn announcement_returning_after_gap_is_treated_as_new() {
    let source = ScriptedSource::new();
    let store = Arc::new(MemoryDismissalStore::new());
    source.push_announcement(announcement("a1"));
    source.push_empty();
    source.push_announcement(announcement("a1"));
    let manager = manager(&source, &store);

    manager.refresh().await;
    manager.dismiss(&DismissPolicy::SessionOnly);
    manager.refresh().await;
    manager.refresh().await;

    assert!(!manager.is_dismissed());
    // The session record still names a1, so session-only stays suppressed.
    assert!(!manager.should_show(&DismissPolicy::SessionOnly));
}

#[tokio::test]
async fn same_id_refresh_updates_payload_and_keeps_dismissal() {
    let source = ScriptedSource::new();
    let store = Arc::new(MemoryDismissalStore::new());
    let mut edited = announcement("a1");
    edited.title = "Edited title".into();
    source.push_announcement(announcement("a1"));
    source.push_announcement(edited);
    let manager = manager(&source, &store);

    manager.refresh().await;
    manager.dismiss(&DismissPolicy::SessionOnly);
    manager.refresh().await;

    assert!(manager.is_dismissed());
    assert_eq!(
        manager.current_announcement().map(|a| a.title),
        Some("Edited title".to_string())
    );
}

#[tokio::test]
async fn expanded_state_is_untouched_by_refresh() {
    let source = ScriptedSource::new();
    let store = Arc::new(MemoryDismissalStore::new());
    source.push_announcement(announcement("a1"));
    let manager = manager(&source, &store);

    manager.set_expanded(true);
    manager.refresh().await;
    assert!(manager.state().is_expanded);
}
