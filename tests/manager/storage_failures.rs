use noticeboard::DismissPolicy;

use super::harness::{FlakyStore, ScriptedSource, announcement, manager};

#[tokio::test]
async fn failed_write_still_dismisses_for_this_run() {
    let source = ScriptedSource::new();
    let store = FlakyStore::new();
    source.push_announcement(announcement("a1"));
    let manager = manager(&source, &store);
    manager.refresh().await;

    store.fail_writes(true);
    manager.dismiss(&DismissPolicy::Forever);

    let state = manager.state();
    assert!(state.is_dismissed);
    assert!(state.last_error.as_ref().is_some_and(|err| err.is_storage()));
    assert_eq!(store.len(), 0);
    assert!(!manager.should_show(&DismissPolicy::Forever));
}

#[tokio::test]
async fn failed_reset_still_clears_in_memory_flag() {
    let source = ScriptedSource::new();
    let store = FlakyStore::new();
    source.push_announcement(announcement("a1"));
    let manager = manager(&source, &store);
    manager.refresh().await;
    manager.dismiss(&DismissPolicy::Forever);

    store.fail_writes(true);
    manager.reset_dismiss_state();

    let state = manager.state();
    assert!(!state.is_dismissed);
    assert!(state.last_error.as_ref().is_some_and(|err| err.is_storage()));
    // The keyed record could not be removed, so the persisted check still hides.
    assert_eq!(store.len(), 1);
    assert!(!manager.should_show(&DismissPolicy::Forever));
}

#[tokio::test]
async fn failed_read_falls_back_to_in_memory_flag() {
    let source = ScriptedSource::new();
    let store = FlakyStore::new();
    source.push_announcement(announcement("a1"));
    let manager = manager(&source, &store);
    manager.refresh().await;
    manager.dismiss(&DismissPolicy::UntilNewAnnouncement);

    store.fail_reads(true);
    assert!(!manager.should_show(&DismissPolicy::UntilNewAnnouncement));

    manager.reset_dismiss_state();
    assert!(manager.should_show(&DismissPolicy::UntilNewAnnouncement));
}

#[tokio::test]
async fn next_refresh_clears_storage_error() {
    let source = ScriptedSource::new();
    let store = FlakyStore::new();
    source.push_announcement(announcement("a1"));
    source.push_announcement(announcement("a1"));
    let manager = manager(&source, &store);
    manager.refresh().await;

    store.fail_writes(true);
    manager.dismiss(&DismissPolicy::SessionOnly);
    assert!(manager.state().last_error.is_some());

    manager.refresh().await;
    let state = manager.state();
    assert!(state.last_error.is_none());
    assert!(state.is_dismissed);
}
