//! Disambiguation of methods whose canonical signatures collide.
//!
//! Runs over the methods of one type after they are all mapped and before
//! any of them is attached, so a method tree's final name is settled before
//! it joins the type tree.

use std::collections::HashMap;

use tracing::debug;

use crate::config::ConflictNumbering;
use crate::method::MappedMethod;

/// Groups methods by signature and renames colliding ones.
///
/// The grouping map is keyed by the signature captured at construction and
/// lives only as long as one type's resolution.
pub struct ConflictResolver {
    numbering: ConflictNumbering,
    groups: HashMap<String, Vec<usize>>,
}

impl ConflictResolver {
    /// A resolver for one type's methods.
    pub fn new(numbering: ConflictNumbering) -> Self {
        Self {
            numbering,
            groups: HashMap::new(),
        }
    }

    /// Rename colliding methods in `methods`, processing them in order.
    pub fn resolve(mut self, methods: &mut [MappedMethod]) {
        for index in 0..methods.len() {
            let group = self
                .groups
                .entry(methods[index].signature().to_string())
                .or_default();

            if !group.is_empty() {
                match self.numbering {
                    ConflictNumbering::Renumber => {
                        for (number, &earlier) in group.iter().enumerate() {
                            methods[earlier].mark_conflicted(number);
                        }
                        methods[index].mark_conflicted(group.len());
                    }
                    ConflictNumbering::Stable => {
                        methods[index].mark_conflicted(group.len());
                    }
                }
                debug!(
                    signature = methods[index].signature(),
                    group_size = group.len() + 1,
                    "method signature conflict"
                );
            }

            group.push(index);
        }
    }
}
