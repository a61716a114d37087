//! Command-line argument parsing for wotc-bot.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// World of Tanks Console Reddit bot.
#[derive(Parser, Debug)]
#[command(name = "wotc-bot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Write a configuration file with default values and exit
    #[arg(short = 'g', long)]
    pub generate: bool,

    /// Keep running, checking the inbox every SECS seconds
    #[arg(short = 'i', long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Answer TEXT as if it were a mention and print the reply, without Reddit
    #[arg(long, value_name = "TEXT")]
    pub dry_run: Option<String>,

    /// Subreddit the dry-run mention comes from
    #[arg(long, value_name = "NAME", requires = "dry_run")]
    pub subreddit: Option<String>,

    /// Log to stderr instead of the log file
    #[arg(long)]
    pub stderr_log: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the positional argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(wotc_bot::config::Config::default_path)
    }

    /// Polling interval, if the bot should keep running.
    pub fn poll_interval(&self) -> Option<Duration> {
        self.interval.map(|secs| Duration::from_secs(secs.max(1)))
    }
}
