use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tracing::info;

use super::render::{render_announcement, render_status};
use crate::cli::{Cli, Commands};
use crate::config::{BannerConfig, Config};
use crate::source::create_source;
use crate::store::JsonFileDismissalStore;
use crate::visibility::{AnnouncementManager, RefreshOutcome};

/// Build the manager from config, run the command and print its output.
pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let source = create_source(&config.source).context("Failed to build announcement source")?;

    let store_path = config.store_path();
    let store = JsonFileDismissalStore::open(&store_path)
        .with_context(|| format!("Failed to open dismissal store: {}", store_path.display()))?;
    info!(path = %store_path.display(), "using dismissal store");

    let manager = AnnouncementManager::new(source, Arc::new(store));
    let output = execute(&cli.command, &config.banner, &manager).await?;
    println!("{output}");
    Ok(())
}

/// Run one command against `manager`. Every command starts with a refresh.
pub async fn execute(
    command: &Commands,
    banner: &BannerConfig,
    manager: &AnnouncementManager,
) -> Result<String> {
    if manager.refresh().await == RefreshOutcome::Failed {
        let reason = manager
            .state()
            .last_error
            .map_or_else(|| "unknown error".to_string(), |err| err.to_string());
        bail!("Failed to fetch the active announcement: {reason}");
    }

    match command {
        Commands::Show { policy } => {
            let policy = policy.unwrap_or(banner.dismiss_policy);
            match manager.current_announcement() {
                None => Ok("No active announcement.".into()),
                Some(announcement) if manager.should_show(&policy) => {
                    Ok(render_announcement(&announcement))
                }
                Some(announcement) => Ok(format!(
                    "Announcement {} is dismissed ({policy}).",
                    announcement.id
                )),
            }
        }
        Commands::Dismiss { policy } => {
            if !banner.dismissible {
                bail!("Announcements are not dismissible (banner.dismissible = false)");
            }
            let policy = policy.unwrap_or(banner.dismiss_policy);
            let Some(announcement) = manager.current_announcement() else {
                return Ok("No active announcement to dismiss.".into());
            };

            manager.dismiss(&policy);
            if let Some(err) = manager.state().last_error {
                bail!("Dismissed for this run only; failed to persist: {err}");
            }
            Ok(format!("Dismissed {} ({policy}).", announcement.id))
        }
        Commands::Reset => {
            manager.reset_dismiss_state();
            if let Some(err) = manager.state().last_error {
                bail!("Failed to reset dismiss state: {err}");
            }
            Ok(match manager.current_announcement() {
                Some(announcement) => format!("Dismiss state reset for {}.", announcement.id),
                None => "Session dismiss state reset.".into(),
            })
        }
        Commands::Status => render_status(&manager.state(), banner),
    }
}
