//! FILENAME: core/table-engine/src/lib.rs
//! Administration table subsystem.
//!
//! This crate drives one grouped table: it takes the metadata delivered by
//! the fetch layer, asks `group-engine` for the grouped sequence, and keeps
//! the filter mode, selection and expand state for the lifetime of the
//! table. Requests built from user actions leave through a `RequestSink`.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the table IS)
//! - `filter`: Filter modes and the row predicate (WHAT is shown)
//! - `selection`: Checkbox state and cascade toggles
//! - `request`: Outbound requests and the sink they are handed to
//! - `session`: One table's state and user actions
//! - `explorer`: Folder tree over object names, for folder-wide actions

#[macro_use]
pub mod logging;

pub mod definition;
pub mod error;
pub mod explorer;
pub mod filter;
pub mod request;
pub mod selection;
pub mod session;

pub use definition::*;
pub use error::TableError;
pub use explorer::{FolderEntry, FolderNodeId, FolderTree};
pub use filter::{build_view, displayed_rows, filter_predicate, FilterMode};
pub use request::{EmitOutcome, RecordingSink, Request, RequestContent, RequestKind, RequestSink};
pub use selection::SelectionTracker;
pub use session::TableSession;

#[doc(hidden)]
pub use log as __log;
