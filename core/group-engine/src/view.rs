//! FILENAME: core/group-engine/src/view.rs
//! Grouped View - The display sequence handed to the renderer.
//!
//! Group nodes live in an arena owned by the view; rows and parent links
//! refer to them by `NodeId`. Slot 0 is the root sentinel, which is never
//! emitted as a row. The whole view is rebuilt whenever the records or the
//! group columns change, so node ids are only meaningful within one view.

use records::{Record, RecordId};
use serde::{Deserialize, Serialize};

use crate::error::GroupingError;
use crate::key::{GroupKey, GroupValues};

/// Handle into the node arena of a `GroupedView`.
pub type NodeId = usize;

/// Arena slot of the root sentinel.
pub const ROOT_NODE: NodeId = 0;

// ============================================================================
// GROUP NODE
// ============================================================================

/// One synthetic group row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    /// Depth, 1-based. The root sentinel has level 0.
    pub level: usize,

    /// The grouping column this node partitions on (empty for the root).
    pub column: String,

    /// Values of every grouping column at depth <= `level`.
    pub group_values: GroupValues,

    /// Enclosing group. Lookup only; the arena owns every node.
    pub parent: Option<NodeId>,

    /// Whether the children of this group are shown.
    pub expanded: bool,
}

impl GroupNode {
    pub(crate) fn root() -> Self {
        GroupNode {
            level: 0,
            column: String::new(),
            group_values: GroupValues::new(),
            parent: None,
            expanded: true,
        }
    }

    pub(crate) fn new(
        level: usize,
        column: String,
        group_values: GroupValues,
        parent: NodeId,
    ) -> Self {
        GroupNode {
            level,
            column,
            group_values,
            parent: Some(parent),
            expanded: true,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn key(&self) -> GroupKey {
        self.group_values.key()
    }

    /// Header text: the value of the column this group partitions on.
    pub fn label(&self) -> String {
        self.group_values
            .get(&self.column)
            .map(|v| v.display_value())
            .unwrap_or_default()
    }
}

// ============================================================================
// DISPLAY ROW
// ============================================================================

/// One entry of the display sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayRow {
    /// Synthetic group header.
    Group(NodeId),
    /// An original record, by its position in the source collection.
    Data(RecordId),
}

impl DisplayRow {
    pub fn is_group(&self) -> bool {
        matches!(self, DisplayRow::Group(_))
    }
}

// ============================================================================
// GROUPED VIEW
// ============================================================================

/// Records, group column list, node arena and row sequence of one build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedView {
    pub(crate) group_columns: Vec<String>,
    pub(crate) records: Vec<Record>,
    pub(crate) nodes: Vec<GroupNode>,
    pub(crate) rows: Vec<DisplayRow>,
}

impl GroupedView {
    /// An ungrouped view: every record as a data row, in order.
    pub fn flat(records: Vec<Record>) -> Self {
        let rows = (0..records.len()).map(DisplayRow::Data).collect();
        GroupedView {
            group_columns: Vec::new(),
            records,
            nodes: vec![GroupNode::root()],
            rows,
        }
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<DisplayRow> {
        self.rows.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn group_columns(&self) -> &[String] {
        &self.group_columns
    }

    pub fn is_grouped(&self) -> bool {
        !self.group_columns.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&GroupNode, GroupingError> {
        self.nodes.get(id).ok_or(GroupingError::UnknownNode(id))
    }

    /// Record behind row `index`, if that row is a data row.
    pub fn record_at(&self, index: usize) -> Option<&Record> {
        match self.row(index)? {
            DisplayRow::Data(id) => self.records.get(id),
            DisplayRow::Group(_) => None,
        }
    }

    /// Group node behind row `index`, if that row is a group row.
    pub fn group_at(&self, index: usize) -> Option<&GroupNode> {
        match self.row(index)? {
            DisplayRow::Group(id) => self.nodes.get(id),
            DisplayRow::Data(_) => None,
        }
    }

    /// Number of group rows in the sequence (the root is not counted).
    pub fn group_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_group()).count()
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len() - self.group_count()
    }

    /// Group rows as (row index, node id) pairs.
    pub fn group_rows(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.rows.iter().enumerate().filter_map(|(i, row)| match row {
            DisplayRow::Group(id) => Some((i, *id)),
            DisplayRow::Data(_) => None,
        })
    }

    /// Sets the expand flag. Nothing is recomputed; visibility is derived
    /// on every query.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> Result<(), GroupingError> {
        if id == ROOT_NODE {
            return Err(GroupingError::UnknownNode(id));
        }
        let node = self
            .nodes
            .get_mut(id)
            .ok_or(GroupingError::UnknownNode(id))?;
        node.expanded = expanded;
        Ok(())
    }

    /// Flips the expand flag and returns the new value.
    pub fn toggle_expanded(&mut self, id: NodeId) -> Result<bool, GroupingError> {
        let expanded = !self.node(id)?.expanded;
        self.set_expanded(id, expanded)?;
        Ok(expanded)
    }

    /// Keys of every collapsed group, in display order.
    pub fn collapsed_keys(&self) -> Vec<GroupKey> {
        self.group_rows()
            .filter_map(|(_, id)| self.nodes.get(id))
            .filter(|node| !node.expanded)
            .map(GroupNode::key)
            .collect()
    }

    /// Collapses every group whose key is in `keys`. Returns how many
    /// groups were collapsed. Keys with no matching group are ignored.
    pub fn restore_collapsed(&mut self, keys: &[GroupKey]) -> usize {
        let mut applied = 0;
        for node in self.nodes.iter_mut().skip(1) {
            if keys.contains(&node.key()) {
                node.expanded = false;
                applied += 1;
            }
        }
        applied
    }
}
