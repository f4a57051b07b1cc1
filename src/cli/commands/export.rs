//! Export command implementation
//!
//! Runs a full create/poll/download flow and writes the result as CSV, or the
//! final status envelope as JSON.

use crate::cli::{exit_code_for, EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use crate::core::export::{CancelSignal, ExportCoordinator, ExportOutcome, ResultFormat};
use crate::domain::{ExportKind, ExportParams, MyTrackerError};
use clap::Args;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export kind (raw, report, segment)
    pub kind: ExportKind,

    /// Request parameter as KEY=VALUE; repeating a key builds a list
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// JSON object with request parameters; a --param key replaces the file's value
    #[arg(long, value_name = "FILE")]
    pub params_file: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Return the final status response instead of downloading files
    #[arg(long)]
    pub envelope: bool,
}

impl ExportArgs {
    /// Execute the export command
    ///
    /// Progress goes to stderr; stdout only carries the result.
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(kind = %self.kind, "Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration file");
                eprintln!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let params = match self.build_params() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("❌ Invalid export parameters");
                eprintln!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let coordinator = match ExportCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to initialize client: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let format = if self.envelope {
            ResultFormat::Envelope
        } else {
            ResultFormat::Table
        };

        eprintln!("🚀 Starting {} export...", self.kind);

        let run = match coordinator
            .execute(self.kind, params, format, CancelSignal::from(shutdown_signal))
            .await
        {
            Ok(run) => run,
            Err(e) => return Ok(report_failure(&e)),
        };

        match &run.outcome {
            ExportOutcome::Table(table) => {
                let csv = table.to_csv_string()?;
                self.write_output(csv.as_bytes())?;
            }
            ExportOutcome::Envelope(envelope) => {
                let mut json = serde_json::to_string_pretty(envelope)?;
                json.push('\n');
                self.write_output(json.as_bytes())?;
            }
        }

        let summary = &run.summary;
        eprintln!();
        eprintln!("📊 Export Summary:");
        if let Some(handle) = &summary.handle {
            eprintln!("  Job: {handle}");
        }
        eprintln!("  Polls: {}", summary.polls);
        eprintln!("  Error Retries: {}", summary.error_retries);
        eprintln!("  Files Downloaded: {}", summary.files_downloaded);
        eprintln!("  Rows: {}", summary.rows);
        eprintln!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        if let Some(path) = &self.output {
            eprintln!("  Output: {}", path.display());
        }
        eprintln!();
        eprintln!("✅ Export completed successfully!");

        Ok(EXIT_SUCCESS)
    }

    /// Builds request parameters from `--params-file` and `--param`
    pub fn build_params(&self) -> Result<ExportParams, String> {
        let mut params = match &self.params_file {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
                let value: serde_json::Value = serde_json::from_str(&contents)
                    .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
                ExportParams::from_json(&value)?
            }
            None => ExportParams::new(),
        };

        let mut from_file: HashSet<String> =
            params.iter().map(|(k, _)| k.to_string()).collect();
        for raw in &self.params {
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| format!("Expected KEY=VALUE, got '{raw}'"))?;
            if key.is_empty() {
                return Err(format!("Empty parameter name in '{raw}'"));
            }
            // First --param for a file key replaces it, later ones extend the list
            if from_file.remove(key) {
                params.insert(key, value);
            } else {
                params.append(key, value);
            }
        }

        Ok(params)
    }

    fn write_output(&self, bytes: &[u8]) -> std::io::Result<()> {
        match &self.output {
            Some(path) => fs::write(path, bytes),
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(bytes)?;
                stdout.flush()
            }
        }
    }
}

fn report_failure(error: &MyTrackerError) -> i32 {
    tracing::error!(error = %error, "Export failed");
    let code = exit_code_for(error);

    if let MyTrackerError::Interrupted { cancel_response } = error {
        eprintln!();
        eprintln!("⚠️  {error}");
        if let Some(response) = cancel_response {
            eprintln!("   Cancel response: {response}");
        }
    } else {
        eprintln!("❌ Export failed");
        eprintln!("   {error}");
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParamValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(params: &[&str]) -> ExportArgs {
        ExportArgs {
            kind: ExportKind::Raw,
            params: params.iter().map(|p| p.to_string()).collect(),
            params_file: None,
            output: None,
            envelope: false,
        }
    }

    #[test]
    fn test_build_params_repeated_keys_become_lists() {
        let params = args(&["idApp[]=1", "idApp[]=2", "event=installs"])
            .build_params()
            .unwrap();
        assert_eq!(params.encode(), "idApp%5B%5D=1&idApp%5B%5D=2&event=installs");
    }

    #[test]
    fn test_build_params_value_may_contain_equals() {
        let params = args(&["filter=a=b"]).build_params().unwrap();
        assert_eq!(
            params.get("filter"),
            Some(&ParamValue::Scalar("a=b".to_string()))
        );
    }

    #[test]
    fn test_build_params_rejects_malformed() {
        assert!(args(&["idApp"]).build_params().is_err());
        assert!(args(&["=1"]).build_params().is_err());
    }

    #[test]
    fn test_build_params_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"idSegment": 1111, "requestFields[]": ["idfa"]}"#)
            .unwrap();
        file.flush().unwrap();

        let mut export = args(&["includeHeaderLine=1"]);
        export.params_file = Some(file.path().to_path_buf());
        let params = export.build_params().unwrap();

        assert_eq!(params.len(), 3);
        assert!(params.contains_key("idSegment"));
        assert!(params.contains_key("includeHeaderLine"));
    }

    #[test]
    fn test_build_params_overrides_file_values() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"event": "installs", "idApp[]": [1, 2]}"#)
            .unwrap();
        file.flush().unwrap();

        let mut export = args(&["event=clicks", "idApp[]=3", "idApp[]=4"]);
        export.params_file = Some(file.path().to_path_buf());
        let params = export.build_params().unwrap();

        assert_eq!(
            params.get("event"),
            Some(&ParamValue::Scalar("clicks".to_string()))
        );
        assert_eq!(
            params.get("idApp[]"),
            Some(&ParamValue::List(vec!["3".to_string(), "4".to_string()]))
        );
    }
}
