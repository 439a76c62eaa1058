//! FILENAME: core/table-engine/tests/common/mod.rs
//! Fixtures shared by the table-engine integration tests.

#![allow(dead_code)]

use records::Record;
use table_engine::{SessionConfig, TableMetadata, TableSession};

/// The periodic-table sample the admin table was prototyped with.
pub fn elements() -> Vec<Record> {
    vec![
        element("Ne", "Neon"),
        element("He", "Helium"),
        element("Ne", "Neon2"),
    ]
}

pub fn element(sym: &str, name: &str) -> Record {
    Record::new().with("sym", sym).with("name", name)
}

/// Access requests as delivered for the owner perspective.
pub fn access_requests() -> Vec<Record> {
    vec![
        request("q1.csv", "finance", "kim", "READ", "PENDING"),
        request("q2.csv", "finance", "lee", "WRITE", "ACCEPTED"),
        request("q1.csv", "finance", "lee", "READ", "REJECTED"),
        request("logo.png", "assets", "kim", "DELETE", "PENDING"),
    ]
}

pub fn request(object: &str, bucket: &str, user: &str, kind: &str, status: &str) -> Record {
    Record::new()
        .with("bucketObjectName", object)
        .with("bucketName", bucket)
        .with("userName", user)
        .with("requestType", kind)
        .with("status", status)
}

pub fn owner_columns() -> Vec<String> {
    ["select", "bucketObjectName", "bucketName", "userName", "requestType", "status", "action"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn metadata(data: Vec<Record>, group_by: &[&str]) -> TableMetadata {
    TableMetadata::new(
        "Bucket Object",
        owner_columns(),
        data,
        group_by.iter().map(|s| s.to_string()).collect(),
    )
}

/// Session over the access-request sample, grouped by object name.
pub fn request_session() -> TableSession {
    TableSession::new(
        metadata(access_requests(), &["bucketObjectName"]),
        SessionConfig::default(),
    )
    .unwrap()
}

/// Session over the element sample, grouped by symbol.
pub fn element_session() -> TableSession {
    TableSession::new(metadata(elements(), &["sym"]), SessionConfig::default()).unwrap()
}
