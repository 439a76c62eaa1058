//! FILENAME: core/table-engine/src/error.rs

use group_engine::GroupingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error(transparent)]
    Grouping(#[from] GroupingError),

    #[error("Invalid table metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("Row {index} is out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Row {0} is a group row, not a record")]
    NotARecord(usize),

    #[error("Row {0} is not a group row")]
    NotAGroup(usize),
}
