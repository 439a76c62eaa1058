//! FILENAME: core/group-engine/src/lib.rs
//! Row grouping subsystem.
//!
//! This crate turns a flat record collection and an ordered list of
//! group-by columns into a display sequence where synthetic group rows are
//! interleaved with the records they contain. It depends on `records` only
//! for the shared value types.
//!
//! Layers:
//! - `key`: Group values and their canonical key (what identifies a group)
//! - `view`: The grouped display sequence and its node arena (WHAT we display)
//! - `builder`: Recursive partitioning (HOW the sequence is built)
//! - `visibility`: Expand/collapse resolution over the ancestor chain

pub mod builder;
pub mod error;
pub mod key;
pub mod view;
pub mod visibility;

pub use builder::build_grouped_view;
pub use error::GroupingError;
pub use key::{values_equal, GroupKey, GroupValues};
pub use view::{DisplayRow, GroupNode, GroupedView, NodeId, ROOT_NODE};
