//! FILENAME: core/table-engine/src/definition.rs
//! Table Definition - The serializable configuration.
//!
//! This module contains the types that DESCRIBE a table:
//! - `TableMetadata`: what the fetch layer delivers (records + column lists)
//! - `SessionConfig`: categorical presets, perspective, user-facing texts
//!
//! Both are plain serde structs so hosts can load them from JSON.

use records::{FieldValue, Record};
use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Checkbox pseudo-column. Never a data or grouping column.
pub const SELECT_COLUMN: &str = "select";

/// Row-action pseudo-column (accept/reject buttons).
pub const ACTION_COLUMN: &str = "action";

fn is_pseudo_column(column: &str) -> bool {
    column == SELECT_COLUMN || column == ACTION_COLUMN
}

// ============================================================================
// TABLE METADATA
// ============================================================================

/// Everything needed to render one table, as delivered by the fetch layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    /// Free-form table kind (e.g. "Bucket Object").
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Columns to render, including the `select`/`action` pseudo-columns.
    pub displayed_columns: Vec<String>,

    /// The full record collection. Grouping is done client-side.
    #[serde(default)]
    pub data: Vec<Record>,

    /// Ordered group-by columns.
    #[serde(default)]
    pub group_by_columns: Vec<String>,
}

impl TableMetadata {
    pub fn new(
        kind: impl Into<String>,
        displayed_columns: Vec<String>,
        data: Vec<Record>,
        group_by_columns: Vec<String>,
    ) -> Self {
        TableMetadata {
            kind: kind.into(),
            displayed_columns,
            data,
            group_by_columns,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Displayed columns that hold record data.
    pub fn data_columns(&self) -> Vec<String> {
        self.displayed_columns
            .iter()
            .filter(|c| !is_pseudo_column(c))
            .cloned()
            .collect()
    }

    /// Group-by columns with any pseudo-column dropped.
    pub fn grouping_columns(&self) -> Vec<String> {
        self.group_by_columns
            .iter()
            .filter(|c| !is_pseudo_column(c))
            .cloned()
            .collect()
    }
}

// ============================================================================
// PERSPECTIVE
// ============================================================================

/// Whose requests the table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Perspective {
    /// Requests made against the user's own objects. Rows can be acted on.
    Owner,
    /// Requests the user made. Read-only, so the action column is hidden.
    User,
}

impl Default for Perspective {
    fn default() -> Self {
        Perspective::Owner
    }
}

// ============================================================================
// CATEGORICAL PRESETS
// ============================================================================

/// `column == equals` predicate over a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    pub column: String,
    pub equals: FieldValue,
}

impl FieldMatch {
    pub fn new(column: impl Into<String>, equals: impl Into<FieldValue>) -> Self {
        FieldMatch {
            column: column.into(),
            equals: equals.into(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.get(&self.column) == &self.equals
    }
}

/// A named filter that shows a flat record list instead of the grouped view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalPreset {
    /// Filter token selecting this preset.
    pub name: String,

    /// Records kept by the preset. `None` keeps every record.
    #[serde(default)]
    pub condition: Option<FieldMatch>,

    /// Whether the row-action column stays visible under this preset.
    #[serde(default)]
    pub show_action_column: bool,
}

impl CategoricalPreset {
    /// Preset listing every record.
    pub fn all(name: impl Into<String>) -> Self {
        CategoricalPreset {
            name: name.into(),
            condition: None,
            show_action_column: true,
        }
    }

    /// Preset listing records where `column == value`.
    pub fn matching(
        name: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        CategoricalPreset {
            name: name.into(),
            condition: Some(FieldMatch::new(column, value)),
            show_action_column: false,
        }
    }

    pub fn keeps(&self, record: &Record) -> bool {
        self.condition.as_ref().map_or(true, |c| c.matches(record))
    }
}

// ============================================================================
// SESSION CONFIG
// ============================================================================

/// Per-table settings that do not come from the fetch layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Categorical presets, looked up by filter token.
    pub presets: Vec<CategoricalPreset>,

    #[serde(default)]
    pub perspective: Perspective,

    /// Warning shown when a bulk action is triggered with nothing selected.
    #[serde(default = "default_empty_selection_warning")]
    pub empty_selection_warning: String,
}

fn default_empty_selection_warning() -> String {
    "Please select Rows".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            presets: vec![
                CategoricalPreset::all("total"),
                CategoricalPreset::matching("accepted", "status", "ACCEPTED"),
                CategoricalPreset::matching("rejected", "status", "REJECTED"),
            ],
            perspective: Perspective::Owner,
            empty_selection_warning: default_empty_selection_warning(),
        }
    }
}

impl SessionConfig {
    pub fn preset(&self, token: &str) -> Option<&CategoricalPreset> {
        self.presets.iter().find(|p| p.name == token)
    }
}

// ============================================================================
// ACTION BUTTONS
// ============================================================================

/// Which bulk-action buttons the table offers in its current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButtons {
    pub accept: bool,
    pub reject: bool,
    pub delete: bool,
}

impl ActionButtons {
    /// Pending requests, grouped: they can be accepted or rejected.
    pub fn grouped() -> Self {
        ActionButtons {
            accept: true,
            reject: true,
            delete: false,
        }
    }

    /// Flat preset listings: requests can only be deleted.
    pub fn preset() -> Self {
        ActionButtons {
            accept: false,
            reject: false,
            delete: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_from_json() {
        let json = r#"{
            "type": "Bucket Object",
            "displayedColumns": ["select", "bucketObjectName", "bucketName", "userName", "status", "action"],
            "data": [
                { "bucketObjectName": "a.txt", "bucketName": "docs", "userName": "kim", "status": "PENDING" }
            ],
            "groupByColumns": ["bucketObjectName"]
        }"#;

        let metadata = TableMetadata::from_json(json).unwrap();
        assert_eq!(metadata.kind, "Bucket Object");
        assert_eq!(metadata.data.len(), 1);
        assert_eq!(
            metadata.data_columns(),
            vec!["bucketObjectName", "bucketName", "userName", "status"]
        );
        assert_eq!(metadata.grouping_columns(), vec!["bucketObjectName"]);
    }

    #[test]
    fn test_metadata_rejects_malformed_json() {
        let result = TableMetadata::from_json(r#"{ "data": 3 }"#);
        assert!(matches!(result, Err(TableError::Metadata(_))));
    }

    #[test]
    fn test_pseudo_columns_never_group() {
        let metadata = TableMetadata::new(
            "Bucket Object",
            vec![],
            vec![],
            vec!["select".to_string(), "bucketName".to_string()],
        );
        assert_eq!(metadata.grouping_columns(), vec!["bucketName"]);
    }

    #[test]
    fn test_default_presets() {
        let config = SessionConfig::default();
        let accepted = config.preset("accepted").unwrap();

        assert!(accepted.keeps(&Record::new().with("status", "ACCEPTED")));
        assert!(!accepted.keeps(&Record::new().with("status", "PENDING")));
        assert!(!accepted.show_action_column);

        let total = config.preset("total").unwrap();
        assert!(total.keeps(&Record::new()));
        assert!(total.show_action_column);

        assert!(config.preset("").is_none());
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let json = r#"{ "presets": [ { "name": "mine", "condition": { "column": "userName", "equals": "kim" } } ] }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.perspective, Perspective::Owner);
        assert_eq!(config.empty_selection_warning, "Please select Rows");
        assert!(config.preset("mine").unwrap().keeps(&Record::new().with("userName", "kim")));
    }
}
