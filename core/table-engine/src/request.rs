//! FILENAME: core/table-engine/src/request.rs
//! Outbound requests built from user actions.
//!
//! The table never talks to the network. Each user action produces at most
//! one `Request`, handed to a `RequestSink`; batching, retries and feedback
//! toasts for the result belong to the sink's side.

use std::fmt;

use records::Record;
use serde::{Deserialize, Serialize};

/// What the request asks the backend to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Accept,
    Reject,
    Delete,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Accept => "accept",
            RequestKind::Reject => "reject",
            RequestKind::Delete => "delete",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload: one acted-upon row, or the gathered selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestContent {
    Single(Record),
    Many(Vec<Record>),
}

impl RequestContent {
    pub fn len(&self) -> usize {
        match self {
            RequestContent::Single(_) => 1,
            RequestContent::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub content: RequestContent,
}

impl Request {
    pub fn single(kind: RequestKind, record: Record) -> Self {
        Request {
            kind,
            content: RequestContent::Single(record),
        }
    }

    pub fn many(kind: RequestKind, records: Vec<Record>) -> Self {
        Request {
            kind,
            content: RequestContent::Many(records),
        }
    }
}

/// Receiver for requests and user-facing warnings.
pub trait RequestSink {
    fn dispatch(&mut self, request: Request);

    /// Show a non-fatal warning to the user.
    fn warn(&mut self, message: &str);
}

/// Result of a bulk emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitOutcome {
    Dispatched { records: usize },
    /// Nothing was selected; the user was warned and nothing was sent.
    NothingSelected,
}

/// Sink that keeps everything in memory, for hosts that drain requests
/// on their own schedule.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub requests: Vec<Request>,
    pub warnings: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }
}

impl RequestSink for RecordingSink {
    fn dispatch(&mut self, request: Request) {
        self.requests.push(request);
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_json_shape() {
        let request = Request::single(RequestKind::Accept, Record::new().with("bucketName", "docs"));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "type": "accept", "content": { "bucketName": "docs" } })
        );
    }

    #[test]
    fn test_bulk_request_json_shape() {
        let request = Request::many(
            RequestKind::Delete,
            vec![Record::new().with("id", 1.0), Record::new().with("id", 2.0)],
        );
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"type":"delete","content":[{"id":1.0},{"id":2.0}]}"#);

        let parsed: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.content.len(), 2);
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.dispatch(Request::many(RequestKind::Reject, vec![]));
        sink.warn("careful");

        assert_eq!(sink.take_requests().len(), 1);
        assert!(sink.requests.is_empty());
        assert_eq!(sink.warnings, vec!["careful"]);
    }
}
