use crate::announcement::Announcement;
use crate::error::NoticeboardError;
use serde::Serialize;
use std::sync::Arc;

/// Observable, in-memory manager state. Never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ManagerState {
    pub current_announcement: Option<Announcement>,
    /// UI-owned: whether the banner shows its full body.
    pub is_expanded: bool,
    /// Whether the current announcement was dismissed during this session.
    pub is_dismissed: bool,
    pub is_loading: bool,
    #[serde(serialize_with = "serialize_error")]
    pub last_error: Option<Arc<NoticeboardError>>,
}

impl ManagerState {
    /// Apply a successful fetch result.
    ///
    /// A different (or first) announcement id clears the in-memory dismissal;
    /// the same id only refreshes the payload.
    pub(crate) fn apply_fetched(&mut self, fetched: Option<Announcement>) {
        let Some(next) = fetched else {
            self.current_announcement = None;
            return;
        };

        let is_new = self
            .current_announcement
            .as_ref()
            .is_none_or(|current| current.id != next.id);
        if is_new {
            self.is_dismissed = false;
        }
        self.current_announcement = Some(next);
    }
}

#[allow(clippy::ref_option)]
fn serialize_error<S>(error: &Option<Arc<NoticeboardError>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match error {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

/// What a `refresh()` call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetch result was applied to the state.
    Applied,
    /// The fetch failed; the error was recorded and nothing else changed.
    Failed,
    /// A newer refresh was issued meanwhile; this result was dropped.
    Superseded,
}
