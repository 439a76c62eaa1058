//! FILENAME: core/table-engine/src/filter.rs
//! Filter Engine - Decides which rows of the current view are displayed.
//!
//! Two modes:
//! - `Grouped`: the grouped sequence, gated by expand/collapse visibility
//! - `Preset`: a flat record list chosen by a categorical preset; group
//!   visibility does not apply
//!
//! Expand flags are read at query time, so after a header click the caller
//! simply asks again; there is no filter key to bump.

use group_engine::{build_grouped_view, DisplayRow, GroupedView, GroupingError};
use serde::{Deserialize, Serialize};

use crate::definition::{SessionConfig, TableMetadata};

/// The active filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    Grouped,
    Preset(String),
}

impl Default for FilterMode {
    fn default() -> Self {
        FilterMode::Grouped
    }
}

impl FilterMode {
    /// A token naming a configured preset selects that preset; any other
    /// token selects the grouped view.
    pub fn resolve(token: &str, config: &SessionConfig) -> Self {
        match config.preset(token) {
            Some(preset) => FilterMode::Preset(preset.name.clone()),
            None => FilterMode::Grouped,
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, FilterMode::Grouped)
    }

    pub fn preset_name(&self) -> Option<&str> {
        match self {
            FilterMode::Preset(name) => Some(name),
            FilterMode::Grouped => None,
        }
    }
}

/// Builds a fresh display sequence for `mode`. Expand state always starts
/// from scratch.
pub fn build_view(metadata: &TableMetadata, config: &SessionConfig, mode: &FilterMode) -> GroupedView {
    match mode {
        FilterMode::Grouped => {
            build_grouped_view(metadata.data.clone(), &metadata.grouping_columns())
        }
        FilterMode::Preset(name) => {
            let records = match config.preset(name) {
                Some(preset) => metadata
                    .data
                    .iter()
                    .filter(|r| preset.keeps(r))
                    .cloned()
                    .collect(),
                None => metadata.data.clone(),
            };
            GroupedView::flat(records)
        }
    }
}

/// Row predicate handed to the renderer.
pub fn filter_predicate(
    view: &GroupedView,
    row: DisplayRow,
    mode: &FilterMode,
) -> Result<bool, GroupingError> {
    if !mode.is_grouped() {
        return Ok(true);
    }
    match row {
        DisplayRow::Group(id) => view.is_group_visible(id),
        DisplayRow::Data(id) => match view.record(id) {
            Some(record) => view.is_record_visible(record),
            None => Ok(false),
        },
    }
}

/// Indices of the rows that pass `filter_predicate`, in display order.
pub fn displayed_rows(view: &GroupedView, mode: &FilterMode) -> Result<Vec<usize>, GroupingError> {
    let mut shown = Vec::with_capacity(view.len());
    for (index, row) in view.rows().iter().enumerate() {
        if filter_predicate(view, *row, mode)? {
            shown.push(index);
        }
    }
    Ok(shown)
}
