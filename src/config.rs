//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// Default log file name inside the temp directory
const LOG_FILE_NAME: &str = "pomodoro-player.log";

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-player")]
#[command(about = "A terminal Pomodoro timer that pauses your music during breaks")]
#[command(version)]
pub struct Config {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to this file instead of the temp directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Play this audio file at phase changes instead of the built-in chime
    #[arg(long, value_name = "PATH")]
    pub beep: Option<PathBuf>,

    /// Skip the dependency check at startup
    #[arg(long)]
    pub skip_checks: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Where log output goes
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
    }
}
