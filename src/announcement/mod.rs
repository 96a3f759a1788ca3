pub mod policy;
pub mod types;

pub use policy::{DismissPolicy, ParsePolicyError};
pub use types::{Announcement, AnnouncementId};
