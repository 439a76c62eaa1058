//! FILENAME: core/table-engine/src/explorer.rs
//! Folder tree over bucket object names.
//!
//! Object stores have flat keys; folders exist only as `/`-separated
//! prefixes, plus optional placeholder objects whose name ends in `/`.
//! The tree lets folder-level actions reach everything below a folder.
//!
//! Children keep first-seen order, the same rule the grouped table uses.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::logging::category;

/// Index into the entries of a `FolderTree`. 0 is the bucket root.
pub type FolderNodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Last path segment ("q1.csv", "reports/").
    pub name: String,
    /// Full object key ("2024/reports/q1.csv"). Folders end in `/`.
    pub complete_name: String,
    pub parent: Option<FolderNodeId>,
    pub children: Vec<FolderNodeId>,
}

impl FolderEntry {
    pub fn is_folder(&self) -> bool {
        self.complete_name.is_empty() || self.complete_name.ends_with('/')
    }
}

#[derive(Debug, Clone)]
pub struct FolderTree {
    entries: Vec<FolderEntry>,
    by_name: FxHashMap<String, FolderNodeId>,
}

impl FolderTree {
    pub const ROOT: FolderNodeId = 0;

    /// Builds the tree from object keys. Intermediate folders are created
    /// on demand; a key listed twice yields a single entry.
    pub fn from_object_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = FolderTree {
            entries: vec![FolderEntry {
                name: "/".to_string(),
                complete_name: String::new(),
                parent: None,
                children: Vec::new(),
            }],
            by_name: FxHashMap::default(),
        };

        for name in names {
            tree.insert(name.as_ref());
        }

        log_debug!(category::EXPLORER, "folder tree with {} entries", tree.entries.len() - 1);
        tree
    }

    fn insert(&mut self, key: &str) {
        let mut parent = Self::ROOT;
        let mut consumed = 0;

        for segment in key.split_inclusive('/') {
            consumed += segment.len();
            if segment == "/" {
                // Empty segment ("a//b") adds no level
                continue;
            }
            let complete_name = &key[..consumed];
            parent = match self.by_name.get(complete_name) {
                Some(&id) => id,
                None => {
                    let id = self.entries.len();
                    self.entries.push(FolderEntry {
                        name: segment.to_string(),
                        complete_name: complete_name.to_string(),
                        parent: Some(parent),
                        children: Vec::new(),
                    });
                    self.entries[parent].children.push(id);
                    self.by_name.insert(complete_name.to_string(), id);
                    id
                }
            };
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    pub fn entry(&self, id: FolderNodeId) -> Option<&FolderEntry> {
        self.entries.get(id)
    }

    pub fn find(&self, complete_name: &str) -> Option<FolderNodeId> {
        if complete_name.is_empty() || complete_name == "/" {
            return Some(Self::ROOT);
        }
        self.by_name.get(complete_name).copied()
    }

    /// Every file below `id`, depth-first. Folder placeholders are skipped.
    /// A file id yields nothing.
    pub fn descendant_files(&self, id: FolderNodeId) -> Vec<&FolderEntry> {
        let mut files = Vec::new();
        if let Some(entry) = self.entries.get(id) {
            self.collect_files(&entry.children, &mut files);
        }
        files
    }

    fn collect_files<'a>(&'a self, ids: &[FolderNodeId], out: &mut Vec<&'a FolderEntry>) {
        for &child_id in ids {
            let child = &self.entries[child_id];
            if child.is_folder() {
                self.collect_files(&child.children, out);
            } else {
                out.push(child);
            }
        }
    }

    /// The entry followed by its direct children: what a folder-wide
    /// delete or access request is issued for.
    pub fn cascade(&self, id: FolderNodeId) -> Vec<&FolderEntry> {
        match self.entries.get(id) {
            Some(entry) => std::iter::once(entry)
                .chain(entry.children.iter().map(|&c| &self.entries[c]))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[&FolderEntry]) -> Vec<String> {
        entries.iter().map(|e| e.complete_name.clone()).collect()
    }

    fn sample() -> FolderTree {
        FolderTree::from_object_names([
            "reports/",
            "reports/q1.csv",
            "reports/2024/",
            "reports/2024/q2.csv",
            "readme.md",
            "reports/q1.csv",
        ])
    }

    #[test]
    fn test_builds_nested_folders() {
        let tree = sample();
        // root + reports/ + q1 + 2024/ + q2 + readme
        assert_eq!(tree.len(), 6);

        let reports = tree.find("reports/").unwrap();
        let entry = tree.entry(reports).unwrap();
        assert!(entry.is_folder());
        assert_eq!(entry.name, "reports/");
        assert_eq!(entry.children.len(), 2);
        assert!(!tree.entry(tree.find("readme.md").unwrap()).unwrap().is_folder());
    }

    #[test]
    fn test_intermediate_folders_are_created() {
        let tree = FolderTree::from_object_names(["a/b/c.txt"]);
        assert!(tree.find("a/").is_some());
        assert!(tree.find("a/b/").is_some());
        assert_eq!(tree.entry(tree.find("a/b/c.txt").unwrap()).unwrap().name, "c.txt");
    }

    #[test]
    fn test_descendant_files_skip_placeholders() {
        let tree = sample();
        let reports = tree.find("reports/").unwrap();

        assert_eq!(
            names(&tree.descendant_files(reports)),
            vec!["reports/q1.csv", "reports/2024/q2.csv"]
        );
        assert_eq!(
            names(&tree.descendant_files(FolderTree::ROOT)),
            vec!["reports/q1.csv", "reports/2024/q2.csv", "readme.md"]
        );
        let file = tree.find("readme.md").unwrap();
        assert!(tree.descendant_files(file).is_empty());
    }

    #[test]
    fn test_cascade_is_folder_then_children() {
        let tree = sample();
        let reports = tree.find("reports/").unwrap();

        assert_eq!(
            names(&tree.cascade(reports)),
            vec!["reports/", "reports/q1.csv", "reports/2024/"]
        );
        assert!(tree.cascade(999).is_empty());
    }

    #[test]
    fn test_empty_tree() {
        let tree = FolderTree::from_object_names(Vec::<String>::new());
        assert!(tree.is_empty());
        assert_eq!(tree.find("/"), Some(FolderTree::ROOT));
    }
}
