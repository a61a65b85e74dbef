//! Command-line interface definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Uptimey - server uptime dashboard
///
/// Shows how long a server has been up, its clock and where it is.
#[derive(Parser, Debug)]
#[command(name = "uptimey")]
#[command(version)]
#[command(about = "Server uptime dashboard for the terminal")]
#[command(after_help = "\
BEHAVIOR:
  - Uptime, current time, background image and location are loaded on start
  - Uptime and time refresh periodically (settings.refresh_interval_secs)
  - The clock shows a sun or moon once sunrise/sunset for the server is known

DASHBOARD KEYS:
  t  toggle the button bar      a  toggle the advanced panel
  r  refresh uptime and time    s  compose a share link
  c  clear the server session   q  quit (also Esc)

CONFIG:
  $XDG_CONFIG_HOME/uptimey/config.toml (created on first run)

LOGS (dashboard mode):
  $XDG_DATA_HOME/uptimey/uptimey.log")]
pub struct Args {
    /// Use this config file instead of the default location
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Terminal dashboard (default)
    Tui,

    /// Fetch everything once and print it
    Snapshot {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print a share link for the current uptime
    Share,

    /// Ask the server to drop its session
    Clear,

    /// Validate the config file
    Validate,
}
