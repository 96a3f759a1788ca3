use crate::announcement::DismissPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `Noticeboard` - announcement visibility and dismissal engine.
#[derive(Parser, Debug)]
#[command(name = "noticeboard")]
#[command(version)]
#[command(about = "Check, dismiss and reset the active announcement.", long_about = None)]
pub struct Cli {
    /// Config file (defaults to ~/.noticeboard/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the active announcement and print it if it should be shown
    Show {
        /// Dismiss policy (session-only, until-new-announcement, forever, timed:<hours>)
        #[arg(short, long)]
        policy: Option<DismissPolicy>,
    },

    /// Dismiss the active announcement
    Dismiss {
        /// Dismiss policy (session-only, until-new-announcement, forever, timed:<hours>)
        #[arg(short, long)]
        policy: Option<DismissPolicy>,
    },

    /// Clear stored dismissals for the active announcement
    Reset,

    /// Print the manager state as JSON
    Status,
}
