use anyhow::{Context, Result};
use serde_json::json;

use crate::announcement::Announcement;
use crate::config::BannerConfig;
use crate::visibility::ManagerState;

pub(super) fn render_announcement(announcement: &Announcement) -> String {
    format!(
        "[{}] {}\n\n{}\n\n(posted {})",
        announcement.id,
        announcement.title,
        announcement.body,
        announcement.created_at.format("%Y-%m-%d %H:%M UTC")
    )
}

pub(super) fn render_status(state: &ManagerState, banner: &BannerConfig) -> Result<String> {
    let state = serde_json::to_value(state).context("Failed to serialize manager state")?;
    let status = json!({
        "state": state,
        "banner": {
            "dismiss_policy": banner.dismiss_policy.to_string(),
            "dismissible": banner.dismissible,
            "tappable": banner.tappable,
        },
    });
    serde_json::to_string_pretty(&status).context("Failed to serialize status")
}
