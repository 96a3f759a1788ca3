pub mod manager;
pub mod state;

pub use manager::AnnouncementManager;
pub use state::{ManagerState, RefreshOutcome};
