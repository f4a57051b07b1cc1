//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the MyTracker configuration file.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates; the summary never prints the secret key.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  API Host: {}", config.api.base_url);
        println!("  Account: {}", config.api.account_id);
        println!("  Request Timeout: {}s", config.api.timeout_seconds);
        println!("  Download Timeout: {}s", config.api.download_timeout_seconds);
        println!("  Poll Interval: {}ms", config.polling.interval_ms);
        println!(
            "  Max Polls: {}",
            config
                .polling
                .max_polls
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
        );
        println!(
            "  Max Error Retries: {}",
            config
                .polling
                .max_error_retries
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(EXIT_SUCCESS)
    }
}
