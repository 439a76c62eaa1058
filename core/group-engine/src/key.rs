//! FILENAME: core/group-engine/src/key.rs
//! Group values and the canonical group key.
//!
//! A group at depth `k` is identified by the values of the first `k`
//! grouping columns. `GroupValues` carries those pairs in grouping order;
//! `GroupKey` is their canonical text form (e.g. `sym=s:Ne/name=s:Neon`),
//! used for deduplication while building and for re-applying collapse
//! state after a rebuild.

use std::fmt;

use records::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// VALUE COMPARISON
// ============================================================================

/// Structural equality used for partitioning.
///
/// Same as `==` except that NaN equals NaN, so that every record lands in
/// exactly one partition.
pub fn values_equal(a: &FieldValue, b: &FieldValue) -> bool {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        _ => a == b,
    }
}

/// Type-tagged encoding of a single value. Text "1" and number 1 stay distinct.
fn encode_value(value: &FieldValue, out: &mut String) {
    match value {
        FieldValue::Empty => out.push_str("e:"),
        FieldValue::Boolean(b) => {
            out.push_str("b:");
            out.push_str(if *b { "true" } else { "false" });
        }
        FieldValue::Number(n) => {
            out.push_str("n:");
            if *n == 0.0 {
                // -0.0 and 0.0 compare equal
                out.push('0');
            } else {
                out.push_str(&n.to_string());
            }
        }
        FieldValue::Text(s) => {
            out.push_str("s:");
            escape_into(s, out);
        }
        FieldValue::Json(v) => {
            out.push_str("j:");
            escape_into(&v.to_string(), out);
        }
    }
}

fn escape_into(s: &str, out: &mut String) {
    for ch in s.chars() {
        if matches!(ch, '\\' | '/' | '=') {
            out.push('\\');
        }
        out.push(ch);
    }
}

// ============================================================================
// GROUP VALUES
// ============================================================================

/// Column -> value pairs identifying one group, in grouping-column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupValues {
    entries: SmallVec<[(String, FieldValue); 4]>,
}

impl GroupValues {
    pub fn new() -> Self {
        GroupValues {
            entries: SmallVec::new(),
        }
    }

    /// Takes the values of `columns` from `record`.
    /// A column listed twice keeps a single entry.
    pub fn from_record(record: &Record, columns: &[String]) -> Self {
        let mut values = GroupValues::new();
        for column in columns {
            values.insert(column.clone(), record.get(column).clone());
        }
        values
    }

    /// Inserts or replaces the value for `column`.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<FieldValue>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visibility lookup rule: this group carries every one of `columns`
    /// and agrees with `record` on each, with neither side empty.
    /// Only `FieldValue::Empty` counts as empty; `""`, `0` and `false` match.
    pub fn matches_record(&self, record: &Record, columns: &[String]) -> bool {
        columns.iter().all(|column| match self.get(column) {
            Some(own) => {
                let theirs = record.get(column);
                !own.is_empty() && !theirs.is_empty() && values_equal(own, theirs)
            }
            None => false,
        })
    }

    /// True when `record` has the same value for every column this group
    /// carries. Used to find a group's member rows.
    pub fn contains_record(&self, record: &Record) -> bool {
        self.entries
            .iter()
            .all(|(column, value)| values_equal(value, record.get(column)))
    }

    pub fn key(&self) -> GroupKey {
        GroupKey::from(self)
    }
}

// ============================================================================
// GROUP KEY
// ============================================================================

/// Canonical, hashable form of a `GroupValues`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&GroupValues> for GroupKey {
    fn from(values: &GroupValues) -> Self {
        let mut out = String::new();
        for (i, (column, value)) in values.entries.iter().enumerate() {
            if i > 0 {
                out.push('/');
            }
            escape_into(column, &mut out);
            out.push('=');
            encode_value(value, &mut out);
        }
        GroupKey(out)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn key_lists_columns_in_grouping_order() {
        let record = Record::new().with("name", "Neon").with("sym", "Ne");
        let values = GroupValues::from_record(&record, &columns(&["sym", "name"]));

        assert_eq!(values.key().as_str(), "sym=s:Ne/name=s:Neon");
    }

    #[test]
    fn key_distinguishes_value_types() {
        let text = GroupValues::from_record(&Record::new().with("n", "1"), &columns(&["n"]));
        let number = GroupValues::from_record(&Record::new().with("n", 1.0), &columns(&["n"]));

        assert_ne!(text.key(), number.key());
    }

    #[test]
    fn key_escapes_separators() {
        let a = GroupValues::from_record(
            &Record::new().with("path", "a/b=c"),
            &columns(&["path"]),
        );
        let b = GroupValues::from_record(
            &Record::new().with("path", "a").with("b", "c"),
            &columns(&["path", "b"]),
        );

        assert_eq!(a.key().as_str(), "path=s:a\\/b\\=c");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn signed_zero_and_nan_share_keys() {
        let cols = columns(&["x"]);
        let pos = GroupValues::from_record(&Record::new().with("x", 0.0), &cols);
        let neg = GroupValues::from_record(&Record::new().with("x", -0.0), &cols);
        assert_eq!(pos.key(), neg.key());

        let nan_a = GroupValues::from_record(&Record::new().with("x", f64::NAN), &cols);
        let nan_b = GroupValues::from_record(&Record::new().with("x", f64::NAN), &cols);
        assert_eq!(nan_a.key(), nan_b.key());
        assert!(values_equal(&FieldValue::Number(f64::NAN), &FieldValue::Number(f64::NAN)));
    }

    #[test]
    fn repeated_column_keeps_one_entry() {
        let record = Record::new().with("sym", "Ne");
        let values = GroupValues::from_record(&record, &columns(&["sym", "sym"]));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn empty_values_never_match_for_visibility() {
        let cols = columns(&["owner"]);
        let record = Record::new();
        let values = GroupValues::from_record(&record, &cols);

        assert!(!values.matches_record(&record, &cols));
        // ...but an empty-valued group still contains its empty-valued rows
        assert!(values.contains_record(&record));
    }

    #[test]
    fn falsy_values_still_match_for_visibility() {
        let cols = columns(&["v"]);
        for record in [
            Record::new().with("v", ""),
            Record::new().with("v", 0.0),
            Record::new().with("v", false),
        ] {
            let values = GroupValues::from_record(&record, &cols);
            assert!(values.matches_record(&record, &cols), "{:?}", record);
        }
    }

    #[test]
    fn shallow_group_does_not_match_on_deeper_columns() {
        let cols = columns(&["sym", "name"]);
        let record = Record::new().with("sym", "Ne").with("name", "Neon");
        let shallow = GroupValues::from_record(&record, &cols[..1]);
        let deep = GroupValues::from_record(&record, &cols);

        assert!(!shallow.matches_record(&record, &cols));
        assert!(deep.matches_record(&record, &cols));
    }
}
