//! Status command implementation
//!
//! Sends a single status request for an existing job and prints the reply.

use crate::cli::{exit_code_for, EXIT_API_ERROR, EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use crate::domain::{ExportKind, ExportParams, JobHandle};
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Export kind (raw, report, segment)
    pub kind: ExportKind,

    /// Job handle returned when the export was created
    #[arg(long)]
    pub id: String,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(kind = %self.kind, id = %self.id, "Checking export status");

        let handle = match JobHandle::new(self.id.clone()) {
            Ok(h) => h,
            Err(e) => {
                println!("❌ Invalid job handle: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let coordinator = ExportCoordinator::from_config(&config)?;
        let params = ExportParams::new().with(self.kind.id_key(), handle.as_str());

        let envelope = match coordinator.get_export(self.kind, &params).await {
            Ok(e) => e,
            Err(e) => {
                println!("❌ Failed to fetch export status");
                println!("   Error: {}", e);
                return Ok(exit_code_for(&e));
            }
        };

        println!("📊 {} export {}", self.kind, handle);
        if let Some(status) = envelope.status() {
            println!("  Status: {status}");
        }
        println!("{}", serde_json::to_string_pretty(&envelope)?);

        Ok(if envelope.code == 200 {
            EXIT_SUCCESS
        } else {
            EXIT_API_ERROR
        })
    }
}
