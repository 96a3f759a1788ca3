pub mod file;
pub mod memory;
pub mod traits;

pub use file::JsonFileDismissalStore;
pub use memory::MemoryDismissalStore;
pub use traits::{DismissalRecord, DismissalStore};

use crate::announcement::AnnouncementId;

/// Namespace for keyed dismissal records.
pub const DISMISSED_KEY_PREFIX: &str = "noticeboard.dismissed.";

/// Fixed key of the session singleton. Lives outside [`DISMISSED_KEY_PREFIX`]
/// so no announcement id can collide with it.
pub const SESSION_KEY: &str = "noticeboard.session";

/// Store key for the keyed dismissal record of `id`.
pub fn dismissed_key(id: &AnnouncementId) -> String {
    format!("{DISMISSED_KEY_PREFIX}{id}")
}
