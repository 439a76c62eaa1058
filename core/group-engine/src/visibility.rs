//! FILENAME: core/group-engine/src/visibility.rs
//! Visibility Resolver - Which rows are shown under the current expand flags.
//!
//! Nothing here is cached. Every query walks the ancestor chain against the
//! flags as they are now, so toggling a group never leaves stale state.

use records::Record;

use crate::error::GroupingError;
use crate::view::{DisplayRow, GroupedView, NodeId};

impl GroupedView {
    /// A group is visible when every ancestor below the root is expanded.
    /// The root itself is always visible.
    pub fn is_group_visible(&self, id: NodeId) -> Result<bool, GroupingError> {
        let mut current = self.node(id)?.parent;
        while let Some(ancestor_id) = current {
            let ancestor = self.node(ancestor_id)?;
            if ancestor.is_root() {
                break;
            }
            if !ancestor.expanded {
                return Ok(false);
            }
            current = ancestor.parent;
        }
        Ok(true)
    }

    /// Finds the group rows that claim `record`: those carrying a non-empty
    /// value equal to the record's for every group column.
    pub fn matching_groups(&self, record: &Record) -> Vec<NodeId> {
        self.group_rows()
            .filter_map(|(_, id)| {
                let node = self.nodes.get(id)?;
                node.group_values
                    .matches_record(record, &self.group_columns)
                    .then_some(id)
            })
            .collect()
    }

    /// A record is visible when its group is visible and expanded.
    ///
    /// A record no group claims is always visible. A record claimed by
    /// more than one group means the sequence is malformed, which is
    /// reported as `AmbiguousGroup` instead of picking one.
    pub fn is_record_visible(&self, record: &Record) -> Result<bool, GroupingError> {
        let matches = self.matching_groups(record);
        match matches.as_slice() {
            [] => Ok(true),
            [id] => {
                let group = self.node(*id)?;
                Ok(group.expanded && self.is_group_visible(*id)?)
            }
            _ => {
                let mut keys = Vec::with_capacity(matches.len());
                for id in matches {
                    keys.push(self.node(id)?.key());
                }
                Err(GroupingError::AmbiguousGroup { matches: keys })
            }
        }
    }

    /// Visibility of the row at `index`. Out-of-range rows are not visible.
    pub fn is_row_visible(&self, index: usize) -> Result<bool, GroupingError> {
        match self.row(index) {
            Some(DisplayRow::Group(id)) => self.is_group_visible(id),
            Some(DisplayRow::Data(id)) => match self.record(id) {
                Some(record) => self.is_record_visible(record),
                None => Ok(false),
            },
            None => Ok(false),
        }
    }

    /// Indices of every visible row, in display order.
    pub fn visible_rows(&self) -> Result<Vec<usize>, GroupingError> {
        let mut visible = Vec::new();
        for index in 0..self.rows.len() {
            if self.is_row_visible(index)? {
                visible.push(index);
            }
        }
        Ok(visible)
    }
}
