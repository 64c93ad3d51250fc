use std::{path::PathBuf, time::Duration};

use clap::Parser;

const LOG_FILE_NAME: &str = "neochat.log";

#[derive(Parser, Debug)]
#[command(name = "neochat", about = "Local chat rooms in your terminal")]
pub struct Args {
    /// Directory holding the rooms, display name and theme
    #[arg(long, env = "NEOCHAT_DATA_DIR", default_value = ".neochat")]
    pub data_dir: PathBuf,

    /// Log file, defaults to neochat.log inside the data directory
    #[arg(long, env = "NEOCHAT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Milliseconds without input before the typing indicator clears
    #[arg(long, default_value_t = 1500)]
    pub typing_idle_ms: u64,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub typing_idle: Duration,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let log_file = args
            .log_file
            .unwrap_or_else(|| args.data_dir.join(LOG_FILE_NAME));

        Config {
            data_dir: args.data_dir,
            log_file,
            typing_idle: Duration::from_millis(args.typing_idle_ms),
        }
    }
}
