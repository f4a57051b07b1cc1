//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "mytracker.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing MyTracker configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set account_id in {}", self.output);
                println!("  2. Put MYTRACKER_SECRET_KEY=<your API secret> into .env");
                println!("  3. Validate configuration: mytracker validate-config");
                println!("  4. Run an export: mytracker export raw -p idApp[]=1 -p event=installs ...");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Sample configuration with comments
    pub fn generate_config() -> String {
        r#"# MyTracker export client configuration

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[api]
# API host; point this at a mock server for testing
base_url = "https://tracker.my.com"

# API user id shown in the MyTracker account settings
account_id = "12345"

# API secret used to sign requests (keep it out of version control)
secret_key = "${MYTRACKER_SECRET_KEY}"

# Timeout for API calls in seconds
timeout_seconds = 30

# Timeout for each result file download in seconds
download_timeout_seconds = 10

[polling]
# Delay between status requests in milliseconds
interval_ms = 3000

# Give up after this many status requests (omit for no limit)
# max_polls = 1200

# Give up after this many consecutive "Error occurred" answers (0 = no limit)
max_error_retries = 20

[logging]
# Write JSON logs to rolling files
local_enabled = false
local_path = "logs"

# Rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
