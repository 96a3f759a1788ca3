#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod announcement;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod source;
pub mod store;
pub mod visibility;

pub use announcement::{Announcement, AnnouncementId, DismissPolicy};
pub use config::Config;
pub use error::{ConfigError, FetchError, NoticeboardError, StorageError};
pub use source::{AnnouncementSource, HttpAnnouncementSource};
pub use store::{DismissalRecord, DismissalStore, JsonFileDismissalStore, MemoryDismissalStore};
pub use visibility::{AnnouncementManager, ManagerState, RefreshOutcome};
