use serde::{Deserialize, Serialize};

use crate::error::ObjectResult;
use crate::hasher::ContentHasher;
use crate::id::ObjectId;
use crate::names::validate_name;

/// The name of the absolute root tree. No other node may carry it.
pub const ROOT_NAME: &str = "";

/// The kind of a node in a tree graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Named leaf holding text content.
    Blob,
    /// Named container of blobs and child trees.
    Tree,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Tree => write!(f, "tree"),
        }
    }
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Named, opaque text payload (analogous to a git blob).
///
/// A blob is immutable once built. Two blobs may share a name only when they
/// live in different trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    name: String,
    body: String,
}

impl Blob {
    /// Create a blob without checking its name.
    ///
    /// For trusted input only: fixed leaf names and names already passed
    /// through [`validate_name`]. Use [`Blob::named`] for anything else.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Create a blob after validating its name.
    pub fn named(name: impl Into<String>, body: impl Into<String>) -> ObjectResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self::new(name, body))
    }

    /// The blob's name within its tree.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text payload.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Content-addressed ID of the body. The name is not part of the id; it
    /// is recorded by the enclosing tree's listing.
    pub fn object_id(&self) -> ObjectId {
        ContentHasher::BLOB.hash(self.body.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// Named, ordered container of blobs and child trees (analogous to a git
/// tree).
///
/// A tree owns its children exclusively, so a tree graph is always a rooted
/// ordered tree with no sharing and no cycles. Lookups return the first
/// match by name; no uniqueness between a blob and a tree of the same name is
/// enforced here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    name: String,
    blobs: Vec<Blob>,
    trees: Vec<Tree>,
}

impl Tree {
    /// Create an empty tree without checking its name.
    ///
    /// For trusted input only: category tokens, [`ROOT_NAME`] via
    /// [`Tree::root`], and names already passed through [`validate_name`].
    /// Use [`Tree::named`] for anything else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blobs: Vec::new(),
            trees: Vec::new(),
        }
    }

    /// Create an empty tree after validating its name.
    pub fn named(name: impl Into<String>) -> ObjectResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self::new(name))
    }

    /// Create an empty absolute root.
    pub fn root() -> Self {
        Self::new(ROOT_NAME)
    }

    /// The tree's name; empty only for the absolute root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename this tree without checking the new name.
    ///
    /// Same contract as [`Tree::new`]; conflict resolution only ever appends
    /// a suffix to an already valid name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns `true` if this is the absolute root.
    pub fn is_root(&self) -> bool {
        self.name == ROOT_NAME
    }

    /// Returns `true` if the tree holds neither blobs nor child trees.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty() && self.trees.is_empty()
    }

    /// Append a blob after the existing ones.
    pub fn append_blob(&mut self, blob: Blob) {
        self.blobs.push(blob);
    }

    /// Append a child tree after the existing ones.
    ///
    /// `tree` must not be an absolute root: a nested empty name would
    /// collapse its paths into the parent's. Checked in debug builds only.
    pub fn append_tree(&mut self, tree: Tree) {
        debug_assert!(!tree.is_root(), "the root tree cannot be nested");
        self.trees.push(tree);
    }

    /// Append every blob from `blobs`, preserving order.
    pub fn extend_blobs(&mut self, blobs: impl IntoIterator<Item = Blob>) {
        self.blobs.extend(blobs);
    }

    /// Append every tree from `trees`, preserving order.
    pub fn extend_trees(&mut self, trees: impl IntoIterator<Item = Tree>) {
        for tree in trees {
            self.append_tree(tree);
        }
    }

    /// Blobs in append order.
    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// Child trees in append order.
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Returns `true` if a blob carries `name`.
    pub fn has_blob(&self, name: &str) -> bool {
        self.blobs.iter().any(|b| b.name == name)
    }

    /// Returns `true` if a child tree carries `name`.
    pub fn has_tree(&self, name: &str) -> bool {
        self.trees.iter().any(|t| t.name == name)
    }

    /// Returns `true` if a child tree or a blob carries `name`.
    pub fn has(&self, name: &str) -> bool {
        self.has_tree(name) || self.has_blob(name)
    }

    /// Take the tree apart into its blobs and child trees, dropping the name.
    pub fn into_entries(self) -> (Vec<Blob>, Vec<Tree>) {
        (self.blobs, self.trees)
    }

    /// First blob named `name`.
    pub fn blob(&self, name: &str) -> Option<&Blob> {
        self.blobs.iter().find(|b| b.name == name)
    }

    /// First child tree named `name`.
    pub fn child(&self, name: &str) -> Option<&Tree> {
        self.trees.iter().find(|t| t.name == name)
    }

    /// First child tree named `name`, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Tree> {
        self.trees.iter_mut().find(|t| t.name == name)
    }

    /// Return the child named `name`, appending an empty one first if none
    /// exists. Repeated calls return the same child.
    pub fn child_or_insert(&mut self, name: &str) -> &mut Tree {
        let index = match self.trees.iter().position(|t| t.name == name) {
            Some(index) => index,
            None => {
                self.append_tree(Tree::new(name));
                self.trees.len() - 1
            }
        };
        &mut self.trees[index]
    }

    /// Content-addressed ID of this tree.
    ///
    /// Hashes a canonical listing of the direct entries sorted by name and
    /// kind, so two trees with equal content share an id regardless of the
    /// order their children were appended in. The tree's own name is not
    /// part of the id.
    pub fn object_id(&self) -> ObjectId {
        let mut entries: Vec<(&str, ObjectKind, ObjectId)> = self
            .blobs
            .iter()
            .map(|b| (b.name(), ObjectKind::Blob, b.object_id()))
            .chain(
                self.trees
                    .iter()
                    .map(|t| (t.name(), ObjectKind::Tree, t.object_id())),
            )
            .collect();
        entries.sort();

        let lines: Vec<String> = entries
            .into_iter()
            .map(|(name, kind, id)| format!("{kind} {name} {id}\n"))
            .collect();
        ContentHasher::TREE.hash_parts(lines.iter().map(String::as_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObjectError;

    #[test]
    fn root_has_empty_name() {
        let root = Tree::root();
        assert!(root.is_root());
        assert!(root.is_empty());
        assert!(!Tree::new("a").is_root());
    }

    #[test]
    fn named_constructors_validate() {
        assert!(matches!(Tree::named(""), Err(ObjectError::InvalidName { .. })));
        assert!(matches!(Blob::named("a/b", ""), Err(ObjectError::InvalidName { .. })));
        assert_eq!(Blob::named("body", "{}").unwrap().body(), "{}");
    }

    #[test]
    fn unchecked_constructors_accept_reserved_names() {
        assert!(Tree::named("").is_err());
        assert_eq!(Tree::new("[CN]").name(), "[CN]");
        assert_eq!(Tree::named("[CN]").unwrap(), Tree::new("[CN]"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "the root tree cannot be nested")]
    fn nesting_a_root_panics_in_debug() {
        Tree::root().append_tree(Tree::root());
    }

    #[test]
    fn into_entries_keeps_order() {
        let mut tree = Tree::new("Foo");
        tree.append_blob(Blob::new("modifiers", "public\n"));
        tree.append_tree(Tree::new("[FE]"));
        tree.append_tree(Tree::new("[CS]"));

        let (blobs, trees) = tree.into_entries();
        assert_eq!(blobs, [Blob::new("modifiers", "public\n")]);
        let names: Vec<_> = trees.iter().map(Tree::name).collect();
        assert_eq!(names, ["[FE]", "[CS]"]);
    }

    #[test]
    fn lookup_by_name() {
        let mut tree = Tree::new("Foo");
        tree.append_blob(Blob::new("modifiers", "public\n"));
        tree.append_tree(Tree::new("[CS]"));

        assert!(tree.has_blob("modifiers"));
        assert!(!tree.has_tree("modifiers"));
        assert!(tree.has_tree("[CS]"));
        assert!(tree.has("modifiers"));
        assert!(tree.has("[CS]"));
        assert!(!tree.has("[FE]"));
        assert_eq!(tree.blob("modifiers").map(Blob::body), Some("public\n"));
        assert!(tree.child("[CS]").is_some());
        assert!(tree.child("missing").is_none());
    }

    #[test]
    fn child_returns_first_match() {
        let mut tree = Tree::root();
        let mut first = Tree::new("dup");
        first.append_blob(Blob::new("marker", "1"));
        tree.append_tree(first);
        tree.append_tree(Tree::new("dup"));

        assert!(tree.child("dup").unwrap().has_blob("marker"));
    }

    #[test]
    fn child_or_insert_is_idempotent() {
        let mut root = Tree::root();
        root.child_or_insert("[CN]").append_tree(Tree::new("A"));
        root.child_or_insert("[CN]").append_tree(Tree::new("B"));

        assert_eq!(root.trees().len(), 1);
        let classes = root.child("[CN]").unwrap();
        let names: Vec<_> = classes.trees().iter().map(Tree::name).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn set_name_renames_in_place() {
        let mut tree = Tree::new("bar()");
        tree.set_name("bar().conflicted0");
        assert_eq!(tree.name(), "bar().conflicted0");
    }

    #[test]
    fn blob_id_depends_on_body_only() {
        let a = Blob::new("a", "same");
        let b = Blob::new("b", "same");
        assert_eq!(a.object_id(), b.object_id());
        assert_ne!(a.object_id(), Blob::new("a", "other").object_id());
    }

    #[test]
    fn tree_id_ignores_append_order() {
        let mut left = Tree::new("T");
        left.append_blob(Blob::new("x", "1"));
        left.append_blob(Blob::new("y", "2"));
        left.append_tree(Tree::new("[CS]"));

        let mut right = Tree::new("U");
        right.append_tree(Tree::new("[CS]"));
        right.append_blob(Blob::new("y", "2"));
        right.append_blob(Blob::new("x", "1"));

        assert_eq!(left.object_id(), right.object_id());
    }

    #[test]
    fn tree_id_tracks_nested_content() {
        let mut before = Tree::root();
        before.child_or_insert("a").append_blob(Blob::new("body", "{}"));
        let mut after = Tree::root();
        after
            .child_or_insert("a")
            .append_blob(Blob::new("body", "{ return; }"));

        assert_ne!(before.object_id(), after.object_id());
    }

    #[test]
    fn blob_and_tree_with_same_name_differ() {
        let mut with_blob = Tree::root();
        with_blob.append_blob(Blob::new("x", ""));
        let mut with_tree = Tree::root();
        with_tree.append_tree(Tree::new("x"));

        assert_ne!(with_blob.object_id(), with_tree.object_id());
    }

    #[test]
    fn serde_keeps_structure() {
        let mut tree = Tree::root();
        tree.child_or_insert("[CN]")
            .append_blob(Blob::new("modifiers", "public\n"));
        let json = serde_json::to_string(&tree).unwrap();
        let parsed: Tree = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, parsed);
    }

    #[test]
    fn object_kind_display() {
        assert_eq!(ObjectKind::Blob.to_string(), "blob");
        assert_eq!(ObjectKind::Tree.to_string(), "tree");
    }
}
