//! Scripted export API used by the flow tests

#![allow(dead_code)]

use async_trait::async_trait;
use mytracker::adapters::mytracker::ExportApi;
use mytracker::config::PollingConfig;
use mytracker::domain::{
    DataTable, ExportKind, ExportParams, JobHandle, MyTrackerError, ResponseEnvelope, Result,
};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// One recorded call against the scripted API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(ExportKind, String),
    Get(ExportKind, String),
    Cancel(ExportKind, String),
    Download(String),
}

/// Replays canned envelopes; the last poll reply repeats once the script runs out
pub struct ScriptedApi {
    create_reply: ResponseEnvelope,
    poll_replies: Mutex<VecDeque<ResponseEnvelope>>,
    cancel_reply: ResponseEnvelope,
    files: HashMap<String, DataTable>,
    calls: Mutex<Vec<Call>>,
    poll_delay: Duration,
    download_delay: Duration,
}

impl ScriptedApi {
    pub fn new(create_reply: ResponseEnvelope, poll_replies: Vec<ResponseEnvelope>) -> Self {
        Self {
            create_reply,
            poll_replies: Mutex::new(poll_replies.into()),
            cancel_reply: envelope(200, json!({"status": "Canceled by user"})),
            files: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            poll_delay: Duration::ZERO,
            download_delay: Duration::ZERO,
        }
    }

    /// Makes every status request take `delay` before answering
    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    /// Makes every download take `delay` before answering
    pub fn with_download_delay(mut self, delay: Duration) -> Self {
        self.download_delay = delay;
        self
    }

    pub fn with_file(mut self, link: &str, csv: &str) -> Self {
        let table = DataTable::from_csv_reader(csv.as_bytes()).expect("valid csv fixture");
        self.files.insert(link.to_string(), table);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn polls(&self) -> usize {
        self.count(|c| matches!(c, Call::Get(..)))
    }

    pub fn downloads(&self) -> usize {
        self.count(|c| matches!(c, Call::Download(_)))
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ExportApi for ScriptedApi {
    async fn create(&self, kind: ExportKind, params: &ExportParams) -> Result<ResponseEnvelope> {
        self.record(Call::Create(kind, params.encode()));
        Ok(self.create_reply.clone())
    }

    async fn get(&self, kind: ExportKind, params: &ExportParams) -> Result<ResponseEnvelope> {
        self.record(Call::Get(kind, params.encode()));
        tokio::time::sleep(self.poll_delay).await;
        let mut replies = self.poll_replies.lock().unwrap();
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        };
        reply.ok_or_else(|| MyTrackerError::Http("no scripted poll reply".to_string()))
    }

    async fn cancel(&self, kind: ExportKind, handle: &JobHandle) -> Result<ResponseEnvelope> {
        self.record(Call::Cancel(kind, handle.to_string()));
        Ok(self.cancel_reply.clone())
    }

    async fn download(&self, link: &str) -> Result<DataTable> {
        self.record(Call::Download(link.to_string()));
        tokio::time::sleep(self.download_delay).await;
        self.files
            .get(link)
            .cloned()
            .ok_or_else(|| MyTrackerError::Download(format!("{link}: not found")))
    }
}

pub fn envelope(code: i64, data: Value) -> ResponseEnvelope {
    ResponseEnvelope::new(code, data)
}

pub fn created(kind: ExportKind, id: u64) -> ResponseEnvelope {
    envelope(200, json!({ (kind.id_key()): id }))
}

pub fn status(status: &str) -> ResponseEnvelope {
    envelope(200, json!({ "status": status }))
}

pub fn success(links: &[&str]) -> ResponseEnvelope {
    let files: Vec<Value> = links.iter().map(|l| json!({ "link": l })).collect();
    envelope(200, json!({ "status": "Success!", "files": files }))
}

pub fn fast_polling() -> PollingConfig {
    PollingConfig {
        interval_ms: 1,
        ..PollingConfig::default()
    }
}
