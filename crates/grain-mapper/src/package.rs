//! Package names as chains of nested trees.
//!
//! `org.example.app` becomes `org/example/app/`, one tree per segment. When
//! several files are mapped into one shared root, [`PackageChain::merge_into`]
//! merges into the segments that already exist instead of adding sibling
//! duplicates.

use grain_object::{validate_name, Tree};

use crate::error::{MapError, MapResult};

/// Split a dotted package name into validated segments.
pub fn package_segments(package: &str) -> MapResult<Vec<&str>> {
    package
        .split('.')
        .map(|segment| {
            if segment.is_empty() {
                return Err(MapError::EmptyPackageSegment(package.to_string()));
            }
            validate_name(segment).map_err(|source| MapError::InvalidName {
                kind: "package segment",
                source,
            })?;
            Ok(segment)
        })
        .collect()
}

/// A standalone package chain: one tree per segment, each level holding a
/// single child.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageChain {
    root: Tree,
    segments: Vec<String>,
}

impl PackageChain {
    /// Build the chain for `package`.
    pub fn parse(package: &str) -> MapResult<Self> {
        let segments = package_segments(package)?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(MapError::EmptyPackageSegment(package.to_string()));
        };

        let mut root = Tree::new(*last);
        for segment in parents.iter().rev() {
            let mut parent = Tree::new(*segment);
            parent.append_tree(root);
            root = parent;
        }

        Ok(Self {
            root,
            segments: segments.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Tree of the first segment.
    pub fn root(&self) -> &Tree {
        &self.root
    }

    /// Tree of the last segment.
    pub fn leaf(&self) -> &Tree {
        let mut leaf = &self.root;
        for segment in &self.segments[1..] {
            match leaf.child(segment) {
                Some(child) => leaf = child,
                None => break,
            }
        }
        leaf
    }

    /// Tree of the last segment, mutably, for package-level content.
    pub fn leaf_mut(&mut self) -> &mut Tree {
        let mut leaf = &mut self.root;
        for segment in &self.segments[1..] {
            leaf = leaf.child_or_insert(segment);
        }
        leaf
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The chain's first tree.
    pub fn into_tree(self) -> Tree {
        self.root
    }

    /// Merge the chain below `parent` and return the merged leaf.
    ///
    /// Segments already present as child trees are descended into and
    /// receive the chain's content; missing ones are appended whole. Mapping
    /// `a.b` and then `a.c` into the same parent yields one `a` with children
    /// `b` and `c`.
    pub fn merge_into(self, parent: &mut Tree) -> &mut Tree {
        let Self { root, segments } = self;
        merge_tree(parent, root);

        let mut leaf = parent;
        for segment in &segments {
            leaf = leaf.child_or_insert(segment);
        }
        leaf
    }
}

/// Find-or-create every segment of `package` below `parent` and return the
/// deepest one.
pub fn attach_package<'t>(parent: &'t mut Tree, package: &str) -> MapResult<&'t mut Tree> {
    Ok(PackageChain::parse(package)?.merge_into(parent))
}

fn merge_tree(parent: &mut Tree, tree: Tree) {
    match parent.child_mut(tree.name()) {
        Some(existing) => {
            let (blobs, trees) = tree.into_entries();
            existing.extend_blobs(blobs);
            for child in trees {
                merge_tree(existing, child);
            }
        }
        None => parent.append_tree(tree),
    }
}
