#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use noticeboard::source::FetchFuture;
use noticeboard::store::dismissed_key;
use noticeboard::{
    Announcement, AnnouncementId, AnnouncementManager, AnnouncementSource, DismissalRecord,
    DismissalStore, FetchError, MemoryDismissalStore, StorageError,
};

pub type FetchResult = Result<Option<Announcement>, FetchError>;

enum Step {
    Ready(FetchResult),
    Gated(oneshot::Receiver<FetchResult>),
}

/// Source that replays queued results in call order.
///
/// Gated steps park the fetch until the matching sender fires, which lets
/// tests control completion order of overlapping refreshes.
#[derive(Default)]
pub struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, result: FetchResult) {
        self.steps.lock().unwrap().push_back(Step::Ready(result));
    }

    pub fn push_announcement(&self, announcement: Announcement) {
        self.push(Ok(Some(announcement)));
    }

    pub fn push_empty(&self) {
        self.push(Ok(None));
    }

    pub fn push_failure(&self, message: &str) {
        self.push(Err(FetchError::Other(message.to_string())));
    }

    pub fn push_gated(&self) -> oneshot::Sender<FetchResult> {
        let (tx, rx) = oneshot::channel();
        self.steps.lock().unwrap().push_back(Step::Gated(rx));
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AnnouncementSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch_active_announcement(&self) -> FetchFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();
        Box::pin(async move {
            match step {
                Some(Step::Ready(result)) => result,
                Some(Step::Gated(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(FetchError::Other("gate dropped".into()))),
                None => Err(FetchError::Other("script exhausted".into())),
            }
        })
    }
}

/// Store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryDismissalStore,
    fail_writes: Mutex<bool>,
    fail_reads: Mutex<bool>,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    pub fn fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl DismissalStore for FlakyStore {
    fn name(&self) -> &str {
        "flaky"
    }

    fn get(&self, key: &str) -> Result<Option<DismissalRecord>, StorageError> {
        if *self.fail_reads.lock().unwrap() {
            return Err(StorageError::Backend("read refused".into()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, record: &DismissalRecord) -> Result<(), StorageError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StorageError::Backend("disk full".into()));
        }
        self.inner.set(key, record)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StorageError::Backend("disk full".into()));
        }
        self.inner.delete(key)
    }
}

pub fn announcement(id: &str) -> Announcement {
    Announcement::new(id, &format!("Announcement {id}"), "Details inside.")
}

pub fn manager(
    source: &Arc<ScriptedSource>,
    store: &Arc<impl DismissalStore + 'static>,
) -> AnnouncementManager {
    AnnouncementManager::new(source.clone(), store.clone())
}

/// Rewrite the keyed record of `id` as if it had been dismissed at `at`.
pub fn backdate_dismissal(store: &dyn DismissalStore, id: &str, at: DateTime<Utc>) {
    store
        .set(
            &dismissed_key(&AnnouncementId::from(id)),
            &DismissalRecord::DismissedAt { at },
        )
        .unwrap();
}
