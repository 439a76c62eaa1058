//! FILENAME: core/records/src/lib.rs
//! PURPOSE: Main library entry point for the record model.
//! CONTEXT: Re-exports the value and record types used by `group-engine`
//! and `table-engine`.

pub mod record;
pub mod value;

pub use record::{Record, RecordId};
pub use value::FieldValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_records() {
        let record = Record::new()
            .with("symbol", "Ne")
            .with("position", 10.0);

        assert_eq!(record.get("symbol"), &FieldValue::Text("Ne".to_string()));
        assert_eq!(record.get("position"), &FieldValue::Number(10.0));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let record = Record::new().with("symbol", "He");
        assert!(record.get("name").is_empty());
    }

    #[test]
    fn it_reads_access_request_json() {
        let json = r#"{
            "bucketObjectName": "reports/q1.csv",
            "bucketName": "finance",
            "userName": "dana",
            "requestType": "READ",
            "status": "PENDING",
            "ownerId": null,
            "accessInfo": { "read": true }
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.get("bucketName").display_value(), "finance");
        assert!(record.get("ownerId").is_empty());
        assert!(matches!(record.get("accessInfo"), FieldValue::Json(_)));
    }
}
