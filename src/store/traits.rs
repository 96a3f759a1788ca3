use crate::announcement::AnnouncementId;
use crate::error::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted dismissal decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DismissalRecord {
    /// Keyed record: the moment the announcement was dismissed.
    DismissedAt { at: DateTime<Utc> },
    /// Session singleton: which announcement the given session dismissed.
    Session {
        session_id: Uuid,
        announcement_id: AnnouncementId,
    },
}

impl DismissalRecord {
    pub fn dismissed_now() -> Self {
        Self::DismissedAt { at: Utc::now() }
    }

    pub fn dismissed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DismissedAt { at } => Some(*at),
            Self::Session { .. } => None,
        }
    }
}

/// Narrow persistent key-value contract for dismissal records.
///
/// Calls are synchronous; implementations are expected to be local and fast.
/// Deleting a missing key succeeds.
pub trait DismissalStore: Send + Sync {
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> Result<Option<DismissalRecord>, StorageError>;

    fn set(&self, key: &str, record: &DismissalRecord) -> Result<(), StorageError>;

    fn delete(&self, key: &str) -> Result<(), StorageError>;
}
