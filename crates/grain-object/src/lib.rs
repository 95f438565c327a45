//! Tree and blob objects for fine-grained source history.
//!
//! A source file is represented as a rooted, ordered tree of named
//! directory-like [`Tree`] nodes holding named leaf [`Blob`]s. Flattened with
//! [`enumerate_paths`], the graph becomes a set of virtual file paths that a
//! version-control store can track entity by entity (a single method, a
//! single field, a modifier set) instead of file by file.
//!
//! # Key Types
//!
//! - [`Blob`] -- named, immutable text payload
//! - [`Tree`] -- named container of ordered blobs and child trees
//! - [`PathEntry`] -- one flattened node path
//! - [`ObjectId`] -- content id (BLAKE3 in a per-kind derivation context)
//!
//! # Design Rules
//!
//! 1. The absolute root is the only node with the empty name.
//! 2. A tree owns its children exclusively: no sharing, no cycles.
//! 3. Category children are materialised at most once per parent
//!    ([`Tree::child_or_insert`]).
//! 4. Object ids depend on content only, never on append order.

pub mod error;
pub mod hasher;
pub mod id;
pub mod names;
pub mod object;
pub mod paths;

pub use error::{ObjectError, ObjectResult};
pub use hasher::ContentHasher;
pub use id::{ObjectId, ID_LEN};
pub use names::{is_valid_name, validate_name};
pub use object::{Blob, ObjectKind, Tree, ROOT_NAME};
pub use paths::{enumerate_paths, PathEntry};
