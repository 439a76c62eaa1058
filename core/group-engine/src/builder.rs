//! FILENAME: core/group-engine/src/builder.rs
//! Grouping Builder - Turns records + group columns into a display sequence.
//!
//! Algorithm (depth-first):
//! 1. The whole collection is the partition at depth 0, under the root node
//! 2. At depth `d`, derive one candidate group per record from the values of
//!    columns `0..=d`, and drop duplicates keeping first-seen order
//! 3. For each group, select the partition's records whose value in column
//!    `d` matches, and recurse one level deeper with the group as parent
//! 4. Emit the group row followed by its subtree; past the last column the
//!    partition's records are emitted as data rows
//!
//! Group order follows record order, not any sort: reordering the records
//! can reorder the groups.

use records::{Record, RecordId};
use rustc_hash::FxHashSet;

use crate::key::{values_equal, GroupValues};
use crate::view::{DisplayRow, GroupNode, GroupedView, NodeId, ROOT_NODE};

/// Builds the grouped display sequence for `records`.
///
/// With no group columns the result is the flat record list.
pub fn build_grouped_view(records: Vec<Record>, group_columns: &[String]) -> GroupedView {
    let all: Vec<RecordId> = (0..records.len()).collect();

    let mut builder = GroupBuilder {
        records: &records,
        columns: group_columns,
        nodes: vec![GroupNode::root()],
    };
    let rows = builder.build_level(&all, 0, ROOT_NODE);
    let nodes = builder.nodes;

    GroupedView {
        group_columns: group_columns.to_vec(),
        records,
        nodes,
        rows,
    }
}

struct GroupBuilder<'a> {
    records: &'a [Record],
    columns: &'a [String],
    nodes: Vec<GroupNode>,
}

impl<'a> GroupBuilder<'a> {
    /// Recursively builds the rows for one partition.
    fn build_level(
        &mut self,
        partition: &[RecordId],
        depth: usize,
        parent: NodeId,
    ) -> Vec<DisplayRow> {
        let records = self.records;
        let columns = self.columns;

        if depth >= columns.len() {
            return partition.iter().copied().map(DisplayRow::Data).collect();
        }

        let identifying = &columns[..=depth];
        let column = &columns[depth];

        // Stable dedup: first record to produce a key decides its position
        let mut seen = FxHashSet::default();
        let mut groups: Vec<GroupValues> = Vec::new();
        for &id in partition {
            let values = GroupValues::from_record(&records[id], identifying);
            if seen.insert(values.key()) {
                groups.push(values);
            }
        }

        let mut rows = Vec::with_capacity(partition.len() + groups.len());

        for values in groups {
            let value = values.get(column).cloned().unwrap_or_default();

            let members: Vec<RecordId> = partition
                .iter()
                .copied()
                .filter(|&id| values_equal(records[id].get(column), &value))
                .collect();

            let node_id = self.nodes.len();
            self.nodes
                .push(GroupNode::new(depth + 1, column.clone(), values, parent));

            rows.push(DisplayRow::Group(node_id));
            rows.extend(self.build_level(&members, depth + 1, node_id));
        }

        rows
    }
}
