//! FILENAME: core/table-engine/src/logging.rs
// PURPOSE: Category-tagged logging macros.
// CONTEXT: Same call shape as the application's unified log macros
//          (`log_info!("FILTER", "...")`), routed through the `log` facade.
//          The category becomes the log target so hosts can filter on it.
//          The library never installs a logger.

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::warn!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::error!(target: $cat, $($arg)*)
    };
}

/// Log categories used across the crate.
pub mod category {
    pub const VIEW: &str = "VIEW";
    pub const FILTER: &str = "FILTER";
    pub const SELECT: &str = "SELECT";
    pub const REQUEST: &str = "REQUEST";
    pub const EXPLORER: &str = "EXPLORER";
}
