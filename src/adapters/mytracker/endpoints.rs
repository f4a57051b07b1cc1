//! Endpoint paths of the MyTracker export API

use crate::domain::ExportKind;

/// Resolves create/get/cancel URLs against a base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Create an endpoint table; a trailing slash on `base_url` is ignored
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the job creation endpoint
    pub fn create_url(&self, kind: ExportKind) -> String {
        format!("{}{}", self.base_url, create_path(kind))
    }

    /// URL of the job status endpoint
    pub fn get_url(&self, kind: ExportKind) -> String {
        format!("{}{}", self.base_url, get_path(kind))
    }

    /// URL of the job cancel endpoint; only raw exports have one
    pub fn cancel_url(&self, kind: ExportKind) -> Option<String> {
        kind.supports_cancel()
            .then(|| format!("{}/api/raw/v1/export/cancel.json", self.base_url))
    }
}

fn create_path(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Raw => "/api/raw/v1/export/create.json",
        ExportKind::Report => "/api/report/v1/file/create.json",
        ExportKind::Segment => "/api/segment/v1/export/create.json",
    }
}

fn get_path(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Raw => "/api/raw/v1/export/get.json",
        ExportKind::Report => "/api/report/v1/file/get.json",
        ExportKind::Segment => "/api/segment/v1/export/get.json",
    }
}
