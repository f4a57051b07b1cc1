//! Response envelope returned by every MyTracker endpoint
//!
//! The remote API wraps each reply in `{"code": <int>, "data": {...}}`. The
//! envelope is kept as-is so it can be handed back to callers unmodified.

use super::ids::JobHandle;
use super::status::ExportStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// `{code, data}` wrapper around a remote reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Remote result code (200, 400, 403, 404, ...)
    pub code: i64,

    /// Payload; shape depends on endpoint and code
    #[serde(default)]
    pub data: Value,
}

/// A downloadable result file listed in a success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    /// Download URL of the gzip-compressed CSV
    pub link: String,
}

impl ResponseEnvelope {
    /// Create an envelope from a code and payload
    pub fn new(code: i64, data: Value) -> Self {
        Self { code, data }
    }

    /// Raw `data.status` string, if present
    pub fn status_str(&self) -> Option<&str> {
        self.data.get("status").and_then(Value::as_str)
    }

    /// Parsed `data.status`, if present
    pub fn status(&self) -> Option<ExportStatus> {
        self.status_str().map(ExportStatus::from_remote)
    }

    /// File descriptors from `data.files`, in listed order
    ///
    /// Entries without a string `link` are skipped.
    pub fn files(&self) -> Vec<FileLink> {
        self.data
            .get("files")
            .and_then(Value::as_array)
            .map(|files| {
                files
                    .iter()
                    .filter_map(|f| f.get("link").and_then(Value::as_str))
                    .map(|link| FileLink {
                        link: link.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `data.error.detail` from a 400 reply
    pub fn error_detail(&self) -> Option<&str> {
        self.data
            .get("error")
            .and_then(|e| e.get("detail"))
            .and_then(Value::as_str)
    }

    /// `data.errorMessage` from a "User error occurred" reply
    pub fn error_message(&self) -> Option<&str> {
        self.data.get("errorMessage").and_then(Value::as_str)
    }

    /// Extract a job handle stored under `data.<key>`
    pub fn job_handle(&self, key: &str) -> Option<JobHandle> {
        self.data.get(key).and_then(JobHandle::from_json)
    }
}

impl fmt::Display for ResponseEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{{\"code\":{}}}", self.code),
        }
    }
}
