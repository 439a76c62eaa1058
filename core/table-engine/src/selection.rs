//! FILENAME: core/table-engine/src/selection.rs
//! Selection Tracker - Checkbox state for one display sequence.
//!
//! Two pieces of state are kept:
//! - the selection set: which row indices have a ticked checkbox
//! - the selected-rows list: rows gathered for the next bulk request, in
//!   the order they were picked (group headers included)
//!
//! Both refer to row indices of the current sequence. Rebuilding the view
//! does not prune them; the owner clears them when the data changes.

use group_engine::{DisplayRow, GroupedView};
use rustc_hash::FxHashSet;

use crate::error::TableError;

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selected: FxHashSet<usize>,
    selected_rows: Vec<usize>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected row indices, ascending.
    pub fn selected(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.selected.iter().copied().collect();
        rows.sort_unstable();
        rows
    }

    /// Rows gathered for the next bulk request, in pick order.
    pub fn selected_rows(&self) -> &[usize] {
        &self.selected_rows
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.selected_rows.clear();
    }

    /// Whether every row of a `row_count`-row sequence is selected.
    /// Trivially true for an empty sequence.
    pub fn is_all_selected(&self, row_count: usize) -> bool {
        (0..row_count).all(|i| self.selected.contains(&i))
    }

    /// Single row checkbox. Returns whether the row is now selected.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.selected.remove(&index) {
            self.selected_rows.retain(|&i| i != index);
            false
        } else {
            self.selected.insert(index);
            self.selected_rows.push(index);
            true
        }
    }

    /// Header checkbox: clears everything when all rows are selected,
    /// otherwise selects every row.
    pub fn toggle_all(&mut self, view: &GroupedView) {
        if self.is_all_selected(view.len()) {
            self.clear();
        } else {
            for index in 0..view.len() {
                self.selected.insert(index);
                self.selected_rows.push(index);
            }
        }
    }

    /// Group checkbox. The group row is gathered for the request; each
    /// member record is gathered and has its own checkbox flipped, so
    /// rows that were already selected become unselected.
    ///
    /// Returns the number of member records.
    pub fn toggle_group_children(
        &mut self,
        view: &GroupedView,
        group_index: usize,
    ) -> Result<usize, TableError> {
        let group = match view.row(group_index) {
            Some(DisplayRow::Group(id)) => view.node(id)?,
            Some(DisplayRow::Data(_)) => return Err(TableError::NotAGroup(group_index)),
            None => {
                return Err(TableError::RowOutOfRange {
                    index: group_index,
                    len: view.len(),
                })
            }
        };

        let children: Vec<usize> = view
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(index, row)| match row {
                DisplayRow::Data(id) => view
                    .record(*id)
                    .filter(|record| group.group_values.contains_record(record))
                    .map(|_| index),
                DisplayRow::Group(_) => None,
            })
            .collect();

        self.selected_rows.push(group_index);
        for &index in &children {
            self.selected_rows.push(index);
            if !self.selected.remove(&index) {
                self.selected.insert(index);
            }
        }
        Ok(children.len())
    }

    /// Accessible checkbox label. `None` labels the header checkbox.
    ///
    /// Labels name the action a click performs: the header reads
    /// "deselect all" once every row is selected, "select all" otherwise.
    pub fn label(&self, view: &GroupedView, row: Option<usize>) -> String {
        match row {
            None => {
                if self.is_all_selected(view.len()) {
                    "deselect all".to_string()
                } else {
                    "select all".to_string()
                }
            }
            Some(index) => {
                let verb = if self.is_selected(index) { "deselect" } else { "select" };
                format!("{} row {}", verb, index + 1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use group_engine::build_grouped_view;
    use records::Record;

    fn view() -> GroupedView {
        let records = vec![
            Record::new().with("sym", "Ne").with("name", "Neon"),
            Record::new().with("sym", "He").with("name", "Helium"),
            Record::new().with("sym", "Ne").with("name", "Neon2"),
        ];
        // rows: Ne, Neon, Neon2, He, Helium
        build_grouped_view(records, &["sym".to_string()])
    }

    #[test]
    fn test_toggle_all_twice_returns_to_empty() {
        let view = view();
        let mut selection = SelectionTracker::new();

        selection.toggle_all(&view);
        assert_eq!(selection.selected(), vec![0, 1, 2, 3, 4]);
        assert!(selection.is_all_selected(view.len()));

        selection.toggle_all(&view);
        assert!(selection.is_empty());
        assert!(selection.selected_rows().is_empty());
    }

    #[test]
    fn test_toggle_all_completes_partial_selection() {
        let view = view();
        let mut selection = SelectionTracker::new();
        selection.toggle(1);

        selection.toggle_all(&view);
        assert_eq!(selection.len(), 5);
    }

    #[test]
    fn test_group_children_flip_individually() {
        let view = view();
        let mut selection = SelectionTracker::new();
        selection.toggle(2);

        let count = selection.toggle_group_children(&view, 0).unwrap();
        assert_eq!(count, 2);
        // Neon was off -> on, Neon2 was on -> off
        assert_eq!(selection.selected(), vec![1]);
        assert_eq!(selection.selected_rows(), &[2, 0, 1, 2]);
        // The header itself is gathered but not ticked
        assert!(!selection.is_selected(0));
    }

    #[test]
    fn test_group_children_twice_restores_selection() {
        let view = view();
        let mut selection = SelectionTracker::new();
        selection.toggle(4);
        let before = selection.selected();

        selection.toggle_group_children(&view, 3).unwrap();
        assert_eq!(selection.selected(), Vec::<usize>::new());
        selection.toggle_group_children(&view, 3).unwrap();
        assert_eq!(selection.selected(), before);
    }

    #[test]
    fn test_group_children_requires_group_row() {
        let view = view();
        let mut selection = SelectionTracker::new();

        assert!(matches!(
            selection.toggle_group_children(&view, 1),
            Err(TableError::NotAGroup(1))
        ));
        assert!(matches!(
            selection.toggle_group_children(&view, 99),
            Err(TableError::RowOutOfRange { index: 99, len: 5 })
        ));
    }

    #[test]
    fn test_labels() {
        let view = view();
        let mut selection = SelectionTracker::new();

        assert_eq!(selection.label(&view, None), "select all");
        assert_eq!(selection.label(&view, Some(1)), "select row 2");

        selection.toggle(1);
        assert_eq!(selection.label(&view, Some(1)), "deselect row 2");

        selection.toggle_all(&view);
        assert_eq!(selection.label(&view, None), "deselect all");
    }

    #[test]
    fn test_single_toggle_updates_gathered_rows() {
        let mut selection = SelectionTracker::new();
        assert!(selection.toggle(3));
        assert_eq!(selection.selected_rows(), &[3]);
        assert!(!selection.toggle(3));
        assert!(selection.selected_rows().is_empty());
    }
}
