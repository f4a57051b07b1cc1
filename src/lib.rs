// MyTracker - export API client for the MyTracker analytics platform
// Copyright (c) 2025 MyTracker Client Contributors
// Licensed under the MIT License

//! # MyTracker - export API client
//!
//! A client for the MyTracker export API: raw event data, report files and
//! audience segments. Every request is signed with HMAC-SHA1; exports are
//! asynchronous jobs that are created, polled until done and then fetched as
//! gzip-compressed CSV files.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export state machine, status handling and cancellation
//! - [`adapters`] - Request signing and the HTTP client
//! - [`domain`] - Parameters, envelopes, tables and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mytracker::{ExportParams, MyTracker, ResultFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tracker = MyTracker::new("12345", "secret-key")?;
//!
//!     let params = ExportParams::new()
//!         .with("idApp[]", vec![1, 2, 3])
//!         .with("event", "installs")
//!         .with("selectors", "tsEvent,idApp,idAppInstall")
//!         .with("dateFrom", "2022-05-01")
//!         .with("dateTo", "2022-05-01");
//!
//!     if let Some(table) = tracker.get_raw_data(params, ResultFormat::Table).await?.into_table() {
//!         println!("{} rows, columns {:?}", table.len(), table.headers());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Cancellation
//!
//! Long raw exports can be interrupted. When the signal fires, the remote job
//! is canceled and the call fails with [`MyTrackerError::Interrupted`]:
//!
//! ```rust,no_run
//! use mytracker::{CancelSignal, ExportParams, MyTracker, ResultFormat};
//!
//! # async fn example(tracker: MyTracker, params: ExportParams) -> mytracker::Result<()> {
//! let (cancel_tx, cancel) = CancelSignal::pair();
//! tokio::spawn(async move {
//!     let _ = tokio::signal::ctrl_c().await;
//!     let _ = cancel_tx.send(true);
//! });
//! let outcome = tracker
//!     .get_raw_data_with_cancel(params, ResultFormat::Table, cancel)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures are [`MyTrackerError`] values. Errors reported by the server keep
//! the full response:
//!
//! ```rust,no_run
//! use mytracker::{ExportParams, MyTracker, MyTrackerError};
//!
//! # async fn example(tracker: MyTracker) {
//! match tracker.get_segment(ExportParams::new().with("idSegment", 1)).await {
//!     Ok(envelope) => println!("{envelope}"),
//!     Err(MyTrackerError::AccessDenied { response }) => eprintln!("check credentials: {response}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

pub use crate::core::export::{
    CancelSignal, ExportCoordinator, ExportOutcome, ExportRun, ResultFormat,
};
pub use domain::{
    DataTable, ExportKind, ExportParams, JobHandle, MyTrackerError, ResponseEnvelope, Result,
};

/// Client entry point; an [`ExportCoordinator`] over the HTTP API
pub type MyTracker = ExportCoordinator;
