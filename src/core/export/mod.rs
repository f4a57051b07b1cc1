//! Export orchestration
//!
//! This module provides the create/poll/fetch flow shared by all export kinds:
//! - Per-kind status handling
//! - Cancellable polling
//! - Summary and reporting

pub mod cancel;
pub mod coordinator;
pub mod policy;
pub mod summary;

pub use cancel::CancelSignal;
pub use coordinator::{ExportCoordinator, ExportOutcome, ExportRun, ResultFormat};
pub use policy::{Disposition, FailureKind, StatusPolicy};
pub use summary::ExportSummary;
