//! Export kinds and remote job statuses

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three export APIs offered by MyTracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// Raw event data (`/api/raw/v1/export`)
    Raw,
    /// Aggregated report file (`/api/report/v1/file`)
    Report,
    /// Audience segment export (`/api/segment/v1/export`)
    Segment,
}

impl ExportKind {
    /// All kinds, in declaration order
    pub const ALL: [ExportKind; 3] = [Self::Raw, Self::Report, Self::Segment];

    /// Name of the job handle field in create responses and get/cancel parameters
    pub const fn id_key(self) -> &'static str {
        match self {
            Self::Raw => "idRawExport",
            Self::Report => "idReportFile",
            Self::Segment => "idSegmentExport",
        }
    }

    /// Whether the remote API offers a cancel endpoint for this kind
    pub const fn supports_cancel(self) -> bool {
        matches!(self, Self::Raw)
    }

    /// Lowercase name used in logs and on the command line
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Report => "report",
            Self::Segment => "segment",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" | "raw-data" | "raw_data" => Ok(Self::Raw),
            "report" => Ok(Self::Report),
            "segment" => Ok(Self::Segment),
            other => Err(format!(
                "Invalid export kind '{other}'. Must be one of: raw, report, segment"
            )),
        }
    }
}

/// Job status as reported in `data.status` of a get response
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExportStatus {
    /// `"In progress"`
    InProgress,
    /// `"Success!"`
    Success,
    /// `"User error occurred"`
    UserError,
    /// `"Canceled by user"`
    Canceled,
    /// `"Error occurred"`
    ErrorOccurred,
    /// Any status string outside the documented vocabulary
    Unrecognized(String),
}

impl ExportStatus {
    /// Parses the exact remote status string
    pub fn from_remote(status: &str) -> Self {
        match status {
            "In progress" => Self::InProgress,
            "Success!" => Self::Success,
            "User error occurred" => Self::UserError,
            "Canceled by user" => Self::Canceled,
            "Error occurred" => Self::ErrorOccurred,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The remote status string
    pub fn as_remote(&self) -> &str {
        match self {
            Self::InProgress => "In progress",
            Self::Success => "Success!",
            Self::UserError => "User error occurred",
            Self::Canceled => "Canceled by user",
            Self::ErrorOccurred => "Error occurred",
            Self::Unrecognized(s) => s,
        }
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_remote())
    }
}
