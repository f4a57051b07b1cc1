//! Cancel command implementation

use crate::cli::{exit_code_for, EXIT_API_ERROR, EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use crate::domain::JobHandle;
use clap::Args;

/// Arguments for the cancel command
#[derive(Args, Debug)]
pub struct CancelArgs {
    /// Raw export job handle (idRawExport)
    #[arg(long)]
    pub id: String,
}

impl CancelArgs {
    /// Execute the cancel command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
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
        match coordinator.cancel_raw_data_export(&handle).await {
            Ok(envelope) if envelope.code == 200 => {
                println!("✅ Cancel requested for raw export {handle}");
                println!("{}", serde_json::to_string_pretty(&envelope)?);
                Ok(EXIT_SUCCESS)
            }
            Ok(envelope) => {
                println!("❌ Server refused to cancel raw export {handle}");
                println!("{}", serde_json::to_string_pretty(&envelope)?);
                Ok(EXIT_API_ERROR)
            }
            Err(e) => {
                println!("❌ Failed to cancel raw export {handle}");
                println!("   Error: {}", e);
                Ok(exit_code_for(&e))
            }
        }
    }
}
