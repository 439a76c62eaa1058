//! FILENAME: core/group-engine/src/error.rs

use thiserror::Error;

use crate::key::GroupKey;
use crate::view::NodeId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroupingError {
    /// A data row matched several group rows. The grouped sequence is
    /// structurally broken; rebuilding from the same input reproduces it.
    #[error("data row is in {} groups at once: {:?}", .matches.len(), .matches)]
    AmbiguousGroup { matches: Vec<GroupKey> },

    #[error("unknown group node: {0}")]
    UnknownNode(NodeId),
}
