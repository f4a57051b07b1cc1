//! Export job identifiers
//!
//! The remote service hands back an opaque identifier when an export job is
//! created. It is only ever echoed back to the get/cancel endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Export job handle newtype wrapper
///
/// Represents `idRawExport`, `idReportFile` or `idSegmentExport`. The server
/// returns integers today; the textual form is kept so the handle survives any
/// change of representation.
///
/// # Examples
///
/// ```
/// use mytracker::domain::ids::JobHandle;
/// use std::str::FromStr;
///
/// let handle = JobHandle::from_str("12345").unwrap();
/// assert_eq!(handle.as_str(), "12345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle(String);

impl JobHandle {
    /// Creates a new JobHandle from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(JobHandle)` if the handle is non-empty, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Job handle cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Builds a handle from a JSON number or string
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(n.to_string())),
            Value::String(s) => Self::new(s.clone()).ok(),
            _ => None,
        }
    }

    /// Returns the handle as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for JobHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<u64> for JobHandle {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}
