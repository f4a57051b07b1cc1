//! Core business logic for MyTracker exports.
//!
//! # Modules
//!
//! - [`export`] - Export orchestration, status handling and cancellation
//!
//! # Export Workflow
//!
//! 1. **Create**: signed POST with the export parameters, yielding a job handle
//! 2. **Poll**: signed GET with the handle until the job reaches a terminal status
//! 3. **Fetch**: download the gzip CSV files listed in the final status
//! 4. **Report**: log the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use mytracker::config::load_config;
//! use mytracker::core::export::{CancelSignal, ExportCoordinator, ResultFormat};
//! use mytracker::domain::{ExportKind, ExportParams};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("mytracker.toml")?;
//!
//! // Create cancellation signal
//! let (_cancel_tx, cancel) = CancelSignal::pair();
//!
//! let coordinator = ExportCoordinator::from_config(&config)?;
//! let params = ExportParams::new().with("idSegment", 1111);
//! let run = coordinator
//!     .execute(ExportKind::Segment, params, ResultFormat::Envelope, cancel)
//!     .await?;
//!
//! println!("Polls: {}", run.summary.polls);
//! # Ok(())
//! # }
//! ```

pub mod export;
