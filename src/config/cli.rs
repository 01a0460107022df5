//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// pubip-notify: Public IP change notifier
///
/// Checks the host's public IP address once, and notifies every configured
/// target when it differs from the last recorded value.
#[derive(Debug, Parser)]
#[command(name = "pubip-notify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Self-test: sample the address for five minutes, then send a test notification
    #[arg(long, short)]
    pub verbose: bool,

    /// Path to configuration file (TOML, or JSON with a .json extension)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Notification target URL (can be specified multiple times)
    #[arg(long = "target", value_name = "URL")]
    pub targets: Vec<String>,

    /// Address lookup endpoint, tried in order (can be specified multiple times)
    #[arg(long = "lookup-url", value_name = "URL")]
    pub lookup_urls: Vec<String>,

    /// Path to the file holding the last observed address
    #[arg(long = "state-file")]
    pub state_file: Option<PathBuf>,

    /// Path to the heartbeat statistics file
    #[arg(long = "heartbeat-file")]
    pub heartbeat_file: Option<PathBuf>,

    /// Disable heartbeat bookkeeping and notifications
    #[arg(long = "no-heartbeat", conflicts_with = "heartbeat_file")]
    pub no_heartbeat: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Subcommands for pubip-notify
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
