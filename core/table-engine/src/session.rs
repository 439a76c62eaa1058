//! FILENAME: core/table-engine/src/session.rs
//! Table Session - One administration table and its user actions.
//!
//! The session exclusively owns the metadata, the current display sequence,
//! the filter mode and the selection. Every action runs to completion, and
//! queries always see the latest rebuild.
//!
//! Expand/collapse state lives on the group nodes of the current view, so
//! it is lost whenever the view is rebuilt (new data or a filter switch).
//! Callers who want to keep it can carry `collapsed_keys()` across and hand
//! them to `restore_collapsed()`.

use group_engine::{DisplayRow, GroupKey, GroupedView};
use rustc_hash::FxHashSet;

use crate::definition::{
    ActionButtons, Perspective, SessionConfig, TableMetadata, ACTION_COLUMN,
};
use crate::error::TableError;
use crate::filter::{build_view, displayed_rows, FilterMode};
use crate::logging::category;
use crate::request::{EmitOutcome, Request, RequestKind, RequestSink};
use crate::selection::SelectionTracker;

pub struct TableSession {
    metadata: TableMetadata,
    config: SessionConfig,
    mode: FilterMode,
    view: GroupedView,
    /// Rows passing the filter predicate, recomputed after every change.
    visible: Vec<usize>,
    selection: SelectionTracker,
    /// Bumped whenever `visible` is recomputed.
    revision: u64,
}

impl TableSession {
    /// Creates a session showing the grouped view of `metadata`.
    pub fn new(metadata: TableMetadata, config: SessionConfig) -> Result<Self, TableError> {
        let mode = FilterMode::Grouped;
        let (view, visible) = prepare(&metadata, &config, &mode)?;
        let session = TableSession {
            metadata,
            config,
            mode,
            view,
            visible,
            selection: SelectionTracker::new(),
            revision: 1,
        };
        session.log_rebuild();
        Ok(session)
    }

    pub fn from_json(json: &str, config: SessionConfig) -> Result<Self, TableError> {
        Self::new(TableMetadata::from_json(json)?, config)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> &FilterMode {
        &self.mode
    }

    pub fn view(&self) -> &GroupedView {
        &self.view
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Indices of the rows the renderer should show.
    pub fn visible_rows(&self) -> &[usize] {
        &self.visible
    }

    pub fn is_group_row(&self, index: usize) -> bool {
        self.view.row(index).map_or(false, |row| row.is_group())
    }

    pub fn perspective(&self) -> Perspective {
        self.config.perspective
    }

    // ========================================================================
    // DATA & FILTER CHANGES
    // ========================================================================

    /// A new collection arrived from the fetch layer. The grouped view is
    /// rebuilt; the selection is left alone. On error the session keeps
    /// its previous metadata and view.
    pub fn replace_metadata(&mut self, metadata: TableMetadata) -> Result<(), TableError> {
        let mode = FilterMode::Grouped;
        let (view, visible) = prepare(&metadata, &self.config, &mode)?;
        self.metadata = metadata;
        self.mode = mode;
        self.commit(view, visible);
        Ok(())
    }

    /// Switches the filter. The selection is always cleared; the view is
    /// rebuilt, so any collapsed groups come back expanded.
    pub fn apply_filter(&mut self, token: &str) -> Result<(), TableError> {
        self.selection.clear();
        let mode = FilterMode::resolve(token, &self.config);
        log_info!(category::FILTER, "filter '{}' -> {:?}", token, mode);
        let (view, visible) = prepare(&self.metadata, &self.config, &mode)?;
        self.mode = mode;
        self.commit(view, visible);
        Ok(())
    }

    pub fn set_perspective(&mut self, perspective: Perspective) {
        self.config.perspective = perspective;
    }

    /// Group header click: flips the group's expand flag and recomputes
    /// the visible rows. Returns the new expand flag.
    pub fn toggle_group(&mut self, index: usize) -> Result<bool, TableError> {
        let id = match self.row(index)? {
            DisplayRow::Group(id) => id,
            DisplayRow::Data(_) => return Err(TableError::NotAGroup(index)),
        };
        let expanded = self.view.toggle_expanded(id)?;
        let key = self.view.node(id)?.key();
        log_debug!(
            category::VIEW,
            "group '{}' {}",
            key,
            if expanded { "expanded" } else { "collapsed" }
        );
        self.refresh()?;
        Ok(expanded)
    }

    pub fn collapsed_keys(&self) -> Vec<GroupKey> {
        self.view.collapsed_keys()
    }

    /// Re-applies collapse state saved before a rebuild.
    pub fn restore_collapsed(&mut self, keys: &[GroupKey]) -> Result<usize, TableError> {
        let applied = self.view.restore_collapsed(keys);
        self.refresh()?;
        Ok(applied)
    }

    fn commit(&mut self, view: GroupedView, visible: Vec<usize>) {
        self.view = view;
        self.visible = visible;
        self.revision += 1;
        self.log_rebuild();
    }

    fn refresh(&mut self) -> Result<(), TableError> {
        match displayed_rows(&self.view, &self.mode) {
            Ok(visible) => {
                self.visible = visible;
                self.revision += 1;
                Ok(())
            }
            Err(e) => {
                log_error!(category::VIEW, "visibility failed: {}", e);
                Err(e.into())
            }
        }
    }

    fn log_rebuild(&self) {
        log_debug!(
            category::VIEW,
            "built {} rows ({} groups) over {:?}",
            self.view.len(),
            self.view.group_count(),
            self.view.group_columns()
        );
    }

    fn row(&self, index: usize) -> Result<DisplayRow, TableError> {
        self.view.row(index).ok_or(TableError::RowOutOfRange {
            index,
            len: self.view.len(),
        })
    }

    // ========================================================================
    // PRESENTATION
    // ========================================================================

    pub fn action_buttons(&self) -> ActionButtons {
        if self.mode.is_grouped() {
            ActionButtons::grouped()
        } else {
            ActionButtons::preset()
        }
    }

    /// Columns to render. The action column is dropped for read-only
    /// presets and for the user perspective.
    pub fn displayed_columns(&self) -> Vec<String> {
        let preset_hides_action = self
            .mode
            .preset_name()
            .and_then(|name| self.config.preset(name))
            .map_or(false, |preset| !preset.show_action_column);
        let hide_action = preset_hides_action || self.config.perspective == Perspective::User;

        self.metadata
            .displayed_columns
            .iter()
            .filter(|c| !(hide_action && c.as_str() == ACTION_COLUMN))
            .cloned()
            .collect()
    }

    /// Data columns only, without the pseudo-columns.
    pub fn filtered_columns(&self) -> Vec<String> {
        self.metadata.data_columns()
    }

    // ========================================================================
    // SELECTION
    // ========================================================================

    pub fn toggle_row(&mut self, index: usize) -> Result<bool, TableError> {
        self.row(index)?;
        Ok(self.selection.toggle(index))
    }

    pub fn toggle_all(&mut self) {
        self.selection.toggle_all(&self.view);
        log_debug!(category::SELECT, "{} rows selected", self.selection.len());
    }

    pub fn toggle_group_children(&mut self, index: usize) -> Result<usize, TableError> {
        let count = self.selection.toggle_group_children(&self.view, index)?;
        log_debug!(category::SELECT, "group row {} toggled {} children", index, count);
        Ok(count)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn checkbox_label(&self, row: Option<usize>) -> String {
        self.selection.label(&self.view, row)
    }

    // ========================================================================
    // REQUESTS
    // ========================================================================

    pub fn accept(&self, index: usize, sink: &mut dyn RequestSink) -> Result<(), TableError> {
        self.emit_row(RequestKind::Accept, index, sink)
    }

    pub fn reject(&self, index: usize, sink: &mut dyn RequestSink) -> Result<(), TableError> {
        self.emit_row(RequestKind::Reject, index, sink)
    }

    /// Sends a request for the record at row `index`.
    pub fn emit_row(
        &self,
        kind: RequestKind,
        index: usize,
        sink: &mut dyn RequestSink,
    ) -> Result<(), TableError> {
        let record = match self.row(index)? {
            DisplayRow::Data(id) => self
                .view
                .record(id)
                .ok_or(TableError::NotARecord(index))?,
            DisplayRow::Group(_) => return Err(TableError::NotARecord(index)),
        };
        log_info!(category::REQUEST, "{} row {}", kind, index);
        sink.dispatch(Request::single(kind, record.clone()));
        Ok(())
    }

    /// Sends one request carrying every gathered record, each once, in
    /// pick order. Group headers among the gathered rows are not part of
    /// the payload. With nothing to send the user is warned instead.
    pub fn emit_selected(
        &self,
        kind: RequestKind,
        sink: &mut dyn RequestSink,
    ) -> Result<EmitOutcome, TableError> {
        let mut seen = FxHashSet::default();
        let records: Vec<_> = self
            .selection
            .selected_rows()
            .iter()
            .filter(|&&index| seen.insert(index))
            .filter_map(|&index| self.view.record_at(index))
            .cloned()
            .collect();

        if records.is_empty() {
            log_warn!(category::REQUEST, "{} requested with no rows selected", kind);
            sink.warn(&self.config.empty_selection_warning);
            return Ok(EmitOutcome::NothingSelected);
        }

        let count = records.len();
        log_info!(category::REQUEST, "{} {} selected rows", kind, count);
        sink.dispatch(Request::many(kind, records));
        Ok(EmitOutcome::Dispatched { records: count })
    }
}

/// Builds the view for `mode` together with its visible rows, so a
/// failing build never replaces a consistent one.
fn prepare(
    metadata: &TableMetadata,
    config: &SessionConfig,
    mode: &FilterMode,
) -> Result<(GroupedView, Vec<usize>), TableError> {
    let view = build_view(metadata, config, mode);
    match displayed_rows(&view, mode) {
        Ok(visible) => Ok((view, visible)),
        Err(e) => {
            log_error!(
                category::VIEW,
                "rejected view over {:?}: {}",
                view.group_columns(),
                e
            );
            Err(e.into())
        }
    }
}
