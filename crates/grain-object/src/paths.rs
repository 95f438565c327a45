//! Flattening a tree graph into virtual file paths.
//!
//! Every non-root tree contributes `<ancestors>/<name>/` and every blob
//! `<ancestors>/<blob>`, where `<ancestors>` concatenates the names of all
//! non-root trees above it. The walk is a stack-based depth-first traversal,
//! so the order of the result is not declaration order; treat it as a set.

use serde::{Deserialize, Serialize};

use crate::object::{ObjectKind, Tree};

/// One flattened node: its virtual path and what kind of node it denotes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathEntry {
    pub path: String,
    pub kind: ObjectKind,
}

impl Tree {
    /// Walk this tree and return one [`PathEntry`] per tree and blob node.
    ///
    /// `prefix` is prepended verbatim to every path.
    pub fn walk(&self, prefix: &str) -> Vec<PathEntry> {
        let mut result = Vec::new();
        let mut stack: Vec<(String, &Tree)> = vec![(prefix.to_string(), self)];

        while let Some((mut prefix, current)) = stack.pop() {
            if !current.is_root() {
                prefix.push_str(current.name());
                prefix.push('/');
                result.push(PathEntry {
                    path: prefix.clone(),
                    kind: ObjectKind::Tree,
                });
            }

            result.extend(current.blobs().iter().map(|blob| PathEntry {
                path: format!("{prefix}{}", blob.name()),
                kind: ObjectKind::Blob,
            }));

            for child in current.trees() {
                stack.push((prefix.clone(), child));
            }
        }

        result
    }

    /// Virtual paths of every tree and blob node under this tree.
    pub fn object_paths(&self, prefix: &str) -> Vec<String> {
        enumerate_paths(self, prefix)
    }
}

/// Flatten `tree` into the list of virtual paths it represents.
pub fn enumerate_paths(tree: &Tree, prefix: &str) -> Vec<String> {
    tree.walk(prefix).into_iter().map(|entry| entry.path).collect()
}
