use std::path::PathBuf;

use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Errors surfaced by the noticeboard library.
///
/// Config loading returns these directly. Fetch and storage failures are
/// never returned by the manager; they land in `ManagerState::last_error`.
#[derive(Debug, Error)]
pub enum NoticeboardError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Announcement source ─────────────────────────────────────────────
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),

    // ── Dismissal store ─────────────────────────────────────────────────
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NoticeboardError {
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not find home directory")]
    NoHomeDir,

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ─── Announcement source errors ─────────────────────────────────────────────

/// Failure to obtain the active announcement.
///
/// "No active announcement" is never an error: sources report it as
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("announcement source is not configured: {0}")]
    NotConfigured(String),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode announcement payload: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

// ─── Dismissal store errors ─────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt dismissal store {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("unsupported dismissal store version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("dismissal store lock poisoned")]
    Poisoned,

    #[error("{0}")]
    Backend(String),
}

pub type Result<T, E = NoticeboardError> = std::result::Result<T, E>;
