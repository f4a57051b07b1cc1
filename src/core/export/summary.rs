//! Export run summary and reporting

use crate::domain::{ExportKind, JobHandle};
use std::time::Duration;

/// Statistics of one export flow
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Export kind
    pub kind: ExportKind,

    /// Remote job handle, once the job was created
    pub handle: Option<JobHandle>,

    /// Number of status requests sent
    pub polls: u32,

    /// Number of `Error occurred` answers that were retried
    pub error_retries: u32,

    /// Number of result files downloaded
    pub files_downloaded: usize,

    /// Number of rows in the resulting table
    pub rows: usize,

    /// Wall-clock duration of the flow
    pub duration: Duration,
}

impl ExportSummary {
    /// Create an empty summary for `kind`
    pub fn new(kind: ExportKind) -> Self {
        Self {
            kind,
            handle: None,
            polls: 0,
            error_retries: 0,
            files_downloaded: 0,
            rows: 0,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            kind = %self.kind,
            handle = self.handle.as_ref().map(JobHandle::as_str).unwrap_or("-"),
            polls = self.polls,
            error_retries = self.error_retries,
            files = self.files_downloaded,
            rows = self.rows,
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new(ExportKind::Report);

        assert_eq!(summary.kind, ExportKind::Report);
        assert!(summary.handle.is_none());
        assert_eq!(summary.polls, 0);
        assert_eq!(summary.error_retries, 0);
        assert_eq!(summary.files_downloaded, 0);
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
    }

    #[test]
    fn test_with_duration() {
        let summary = ExportSummary::new(ExportKind::Raw).with_duration(Duration::from_secs(5));
        assert_eq!(summary.duration, Duration::from_secs(5));
    }
}
