//! Per-kind interpretation of job statuses
//!
//! All three export kinds share one polling loop. What differs is how each
//! kind reacts to a status, which this module captures as a table.

use crate::domain::{ExportKind, ExportStatus};

/// What the polling loop does after a status response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The job finished; hand over the result
    Complete,
    /// Not done yet; wait and poll again
    Retry,
    /// The job failed and will not recover
    Fail(FailureKind),
}

/// Reason a job is treated as failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// `User error occurred`
    UserError,
    /// `Canceled by user`
    Canceled,
    /// `Error occurred` on a kind that does not retry it
    ReportGeneration,
    /// Status string not known to the client
    Unknown,
}

/// Status table for one export kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    kind: ExportKind,
}

impl StatusPolicy {
    /// Policy for `kind`
    pub const fn for_kind(kind: ExportKind) -> Self {
        Self { kind }
    }

    /// Decide what to do with `status`
    ///
    /// Raw and segment exports retry `Error occurred`; reports fail on it
    /// since the remote side never produces the file afterwards.
    pub fn disposition(&self, status: &ExportStatus) -> Disposition {
        match status {
            ExportStatus::Success => Disposition::Complete,
            ExportStatus::InProgress => Disposition::Retry,
            ExportStatus::ErrorOccurred => match self.kind {
                ExportKind::Report => Disposition::Fail(FailureKind::ReportGeneration),
                ExportKind::Raw | ExportKind::Segment => Disposition::Retry,
            },
            ExportStatus::UserError => Disposition::Fail(FailureKind::UserError),
            ExportStatus::Canceled => Disposition::Fail(FailureKind::Canceled),
            ExportStatus::Unrecognized(_) => Disposition::Fail(FailureKind::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ExportKind::Raw, "Success!", Disposition::Complete)]
    #[test_case(ExportKind::Raw, "In progress", Disposition::Retry)]
    #[test_case(ExportKind::Raw, "Error occurred", Disposition::Retry)]
    #[test_case(ExportKind::Raw, "User error occurred", Disposition::Fail(FailureKind::UserError))]
    #[test_case(ExportKind::Raw, "Canceled by user", Disposition::Fail(FailureKind::Canceled))]
    #[test_case(ExportKind::Report, "Success!", Disposition::Complete)]
    #[test_case(ExportKind::Report, "In progress", Disposition::Retry)]
    #[test_case(ExportKind::Report, "Error occurred", Disposition::Fail(FailureKind::ReportGeneration))]
    #[test_case(ExportKind::Report, "User error occurred", Disposition::Fail(FailureKind::UserError))]
    #[test_case(ExportKind::Segment, "Success!", Disposition::Complete)]
    #[test_case(ExportKind::Segment, "Error occurred", Disposition::Retry)]
    #[test_case(ExportKind::Segment, "Canceled by user", Disposition::Fail(FailureKind::Canceled))]
    #[test_case(ExportKind::Segment, "Queued", Disposition::Fail(FailureKind::Unknown))]
    fn test_status_table(kind: ExportKind, status: &str, expected: Disposition) {
        let policy = StatusPolicy::for_kind(kind);
        assert_eq!(
            policy.disposition(&ExportStatus::from_remote(status)),
            expected
        );
    }
}
