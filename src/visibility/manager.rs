use super::state::{ManagerState, RefreshOutcome};
use crate::announcement::{Announcement, AnnouncementId, DismissPolicy};
use crate::error::{NoticeboardError, StorageError};
use crate::source::AnnouncementSource;
use crate::store::{DismissalRecord, DismissalStore, SESSION_KEY, dismissed_key};
use chrono::{TimeDelta, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Decides whether the active announcement should be shown and persists
/// dismissals according to the policy supplied by the caller.
///
/// State lives in a `watch` channel and every transition is applied in a
/// single modify call, so subscribers never observe a half-applied update.
/// Only [`refresh`](Self::refresh) suspends; everything else is synchronous.
pub struct AnnouncementManager {
    source: Arc<dyn AnnouncementSource>,
    store: Arc<dyn DismissalStore>,
    session_id: Uuid,
    state: watch::Sender<ManagerState>,
    latest_request: AtomicU64,
}

impl AnnouncementManager {
    pub fn new(source: Arc<dyn AnnouncementSource>, store: Arc<dyn DismissalStore>) -> Self {
        let (state, _) = watch::channel(ManagerState::default());
        Self {
            source,
            store,
            session_id: Uuid::new_v4(),
            state,
            latest_request: AtomicU64::new(0),
        }
    }

    /// Join an existing logical session instead of starting a fresh one.
    ///
    /// Session-only dismissals are honoured only by managers sharing the
    /// session id that wrote them.
    pub fn with_session_id(mut self, session_id: Uuid) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ManagerState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ManagerState> {
        self.state.subscribe()
    }

    pub fn current_announcement(&self) -> Option<Announcement> {
        self.state.borrow().current_announcement.clone()
    }

    pub fn is_dismissed(&self) -> bool {
        self.state.borrow().is_dismissed
    }

    /// Fetch the active announcement and apply it.
    ///
    /// Each call takes a new request token; when the fetch resolves after a
    /// newer call was issued, its result is dropped and the newer call owns
    /// `is_loading`. Dropping the returned future before it completes clears
    /// `is_loading` if no newer call has started.
    pub async fn refresh(&self) -> RefreshOutcome {
        let token = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.last_error = None;
        });
        debug!(token, source = self.source.name(), "refreshing announcement");

        let mut pending = PendingRefresh {
            manager: self,
            token,
            armed: true,
        };
        let result = self.source.fetch_active_announcement().await;
        pending.armed = false;

        let mut outcome = RefreshOutcome::Superseded;
        self.state.send_if_modified(|state| {
            if self.latest_request.load(Ordering::SeqCst) != token {
                return false;
            }

            state.is_loading = false;
            match result {
                Ok(fetched) => {
                    log_fetched(state.current_announcement.as_ref(), fetched.as_ref());
                    state.apply_fetched(fetched);
                    outcome = RefreshOutcome::Applied;
                }
                Err(err) => {
                    warn!(token, error = %err, "announcement fetch failed; keeping last known state");
                    state.last_error = Some(Arc::new(NoticeboardError::from(err)));
                    outcome = RefreshOutcome::Failed;
                }
            }
            true
        });

        if outcome == RefreshOutcome::Superseded {
            debug!(token, "dropping superseded refresh result");
        }
        outcome
    }

    /// Whether the banner should currently be rendered under `policy`.
    ///
    /// Persisted suppression is consulted first; the in-memory dismissal
    /// flag is the fallback.
    pub fn should_show(&self, policy: &DismissPolicy) -> bool {
        let (id, is_dismissed) = {
            let state = self.state.borrow();
            let Some(current) = state.current_announcement.as_ref() else {
                return false;
            };
            (current.id.clone(), state.is_dismissed)
        };

        if self.is_suppressed(&id, policy) {
            return false;
        }
        !is_dismissed
    }

    /// Dismiss the current announcement and persist the decision for `policy`.
    ///
    /// A storage failure is recorded in `last_error`; the in-memory dismissal
    /// still applies for this process.
    pub fn dismiss(&self, policy: &DismissPolicy) {
        let Some(id) = self.current_id() else {
            debug!(policy = policy.kind(), "dismiss ignored: no current announcement");
            return;
        };

        let (key, record) = if policy.is_keyed() {
            (dismissed_key(&id), DismissalRecord::dismissed_now())
        } else {
            (
                SESSION_KEY.to_string(),
                DismissalRecord::Session {
                    session_id: self.session_id,
                    announcement_id: id.clone(),
                },
            )
        };
        let failure = self.store.set(&key, &record).err().map(|err| {
            warn!(announcement_id = %id, key = %key, error = %err, "failed to persist dismissal");
            Arc::new(NoticeboardError::from(err))
        });

        let mut applied = false;
        self.state.send_if_modified(|state| {
            let still_current = state
                .current_announcement
                .as_ref()
                .is_some_and(|current| current.id == id);
            if still_current {
                state.is_dismissed = true;
                applied = true;
            }
            match failure {
                Some(err) => {
                    state.last_error = Some(err);
                    true
                }
                None => still_current,
            }
        });

        if applied {
            info!(announcement_id = %id, policy = %policy, "announcement dismissed");
        } else {
            debug!(announcement_id = %id, "dismiss dropped: announcement changed while persisting");
        }
    }

    /// Forget the session record and the current announcement's keyed record.
    pub fn reset_dismiss_state(&self) {
        let mut failure: Option<StorageError> = None;

        if let Err(err) = self.store.delete(SESSION_KEY) {
            warn!(key = SESSION_KEY, error = %err, "failed to clear session dismissal");
            failure = Some(err);
        }

        let current = self.current_id();
        if let Some(id) = &current {
            let key = dismissed_key(id);
            if let Err(err) = self.store.delete(&key) {
                warn!(key = %key, error = %err, "failed to clear dismissal record");
                failure.get_or_insert(err);
            }
        }

        self.state.send_modify(|state| {
            state.is_dismissed = false;
            if let Some(err) = failure {
                state.last_error = Some(Arc::new(NoticeboardError::from(err)));
            }
        });

        info!(announcement_id = ?current.as_ref().map(AnnouncementId::as_str), "dismiss state reset");
    }

    pub fn set_expanded(&self, expanded: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.is_expanded != expanded;
            state.is_expanded = expanded;
            changed
        });
    }

    pub fn toggle_expanded(&self) {
        self.state.send_modify(|state| state.is_expanded = !state.is_expanded);
    }

    fn current_id(&self) -> Option<AnnouncementId> {
        self.state
            .borrow()
            .current_announcement
            .as_ref()
            .map(|current| current.id.clone())
    }

    fn is_suppressed(&self, id: &AnnouncementId, policy: &DismissPolicy) -> bool {
        match policy {
            DismissPolicy::SessionOnly => matches!(
                self.read_record(SESSION_KEY),
                Some(DismissalRecord::Session { session_id, announcement_id })
                    if session_id == self.session_id && announcement_id == *id
            ),
            // Existence is enough: a newer announcement has a different key.
            DismissPolicy::Forever | DismissPolicy::UntilNewAnnouncement => {
                self.read_record(&dismissed_key(id)).is_some()
            }
            // The window comes from the caller, not the record, so a changed
            // duration applies retroactively.
            DismissPolicy::Timed { hours } => self
                .read_record(&dismissed_key(id))
                .and_then(|record| record.dismissed_at())
                .is_some_and(|at| Utc::now() - at < TimeDelta::hours(i64::from(*hours))),
        }
    }

    fn read_record(&self, key: &str) -> Option<DismissalRecord> {
        match self.store.get(key) {
            Ok(record) => record,
            Err(err) => {
                warn!(key = %key, store = self.store.name(), error = %err, "dismissal lookup failed; treating as absent");
                None
            }
        }
    }
}

/// Clears `is_loading` when a refresh future is dropped mid-fetch.
struct PendingRefresh<'a> {
    manager: &'a AnnouncementManager,
    token: u64,
    armed: bool,
}

impl Drop for PendingRefresh<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let manager = self.manager;
        let token = self.token;
        manager.state.send_if_modified(|state| {
            if manager.latest_request.load(Ordering::SeqCst) != token || !state.is_loading {
                return false;
            }
            state.is_loading = false;
            true
        });
        debug!(token, "refresh abandoned before the fetch completed");
    }
}

fn log_fetched(previous: Option<&Announcement>, fetched: Option<&Announcement>) {
    match (previous, fetched) {
        (_, None) => debug!("no active announcement"),
        (Some(previous), Some(next)) if previous.id == next.id => {
            debug!(announcement_id = %next.id, "announcement unchanged");
        }
        (_, Some(next)) => info!(announcement_id = %next.id, "new announcement active"),
    }
}
