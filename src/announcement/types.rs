use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque announcement identity. Only equality is ever consulted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncementId(String);

impl AnnouncementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnouncementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnouncementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AnnouncementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An announcement row as served by the remote source.
///
/// Everything except `id` is payload the manager carries without reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    #[serde(default)]
    pub project_id: Option<String>,
    pub title: String,
    pub body: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    /// Build an active announcement stamped with the current time.
    pub fn new(id: impl Into<AnnouncementId>, title: &str, body: &str) -> Self {
        Self {
            id: id.into(),
            project_id: None,
            title: title.to_string(),
            body: body.to_string(),
            active: true,
            created_at: Utc::now(),
        }
    }
}
