//! CLI interface and argument parsing
//!
//! This module provides the `mytracker` command-line interface using clap.

pub mod commands;

use crate::domain::MyTrackerError;
use clap::{Parser, Subcommand};

/// Exit code for a successful command
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for configuration and usage errors
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code for errors reported by the remote API
pub const EXIT_API_ERROR: i32 = 4;
/// Exit code for any other failure
pub const EXIT_FATAL: i32 = 5;
/// Exit code when the user interrupted the command
pub const EXIT_INTERRUPTED: i32 = 130;

/// MyTracker export API client
#[derive(Parser, Debug)]
#[command(name = "mytracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "mytracker.toml", env = "MYTRACKER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MYTRACKER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full export (create, poll, download)
    Export(commands::export::ExportArgs),

    /// Poll an existing export job once
    Status(commands::status::StatusArgs),

    /// Cancel a raw data export job
    Cancel(commands::cancel::CancelArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Maps a library error to the process exit code
pub fn exit_code_for(error: &MyTrackerError) -> i32 {
    match error {
        MyTrackerError::Configuration(_) => EXIT_CONFIG_ERROR,
        MyTrackerError::Interrupted { .. } => EXIT_INTERRUPTED,
        MyTrackerError::RetryLimitExceeded { .. } | MyTrackerError::InvalidResponse(_) => {
            EXIT_API_ERROR
        }
        e if e.is_api_error() => EXIT_API_ERROR,
        _ => EXIT_FATAL,
    }
}
