//! Edit operations and edit sets.

use std::fmt;

use arbor_types::{Path, Value};
use serde::Serialize;

/// A single structural edit, relative to the old tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// A node that did not exist was added.
    Add { path: Path, value: Value },
    /// An existing node was removed.
    Remove { path: Path, old: Value },
    /// An existing node was replaced by a different value.
    Replace { path: Path, old: Value, new: Value },
}

impl EditOp {
    pub fn path(&self) -> &Path {
        match self {
            EditOp::Add { path, .. } | EditOp::Remove { path, .. } | EditOp::Replace { path, .. } => {
                path
            }
        }
    }

    /// The value at the path after the edit, `None` for a removal.
    pub fn new_value(&self) -> Option<&Value> {
        match self {
            EditOp::Add { value, .. } => Some(value),
            EditOp::Replace { new, .. } => Some(new),
            EditOp::Remove { .. } => None,
        }
    }

    /// Short lowercase name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            EditOp::Add { .. } => "add",
            EditOp::Remove { .. } => "remove",
            EditOp::Replace { .. } => "replace",
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Add { path, value } => write!(f, "add {path} = {value}"),
            EditOp::Remove { path, old } => write!(f, "remove {path} (was {old})"),
            EditOp::Replace { path, old, new } => write!(f, "replace {path}: {old} -> {new}"),
        }
    }
}

/// The result of comparing two trees.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EditSet {
    /// Edits in traversal order (mapping keys sorted, sequence members in
    /// old-then-new order).
    pub ops: Vec<EditOp>,
    /// Sequences whose common members changed relative order.
    pub reordered: Vec<Path>,
}

impl EditSet {
    /// Create an empty edit set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the trees are equal.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty() && self.reordered.is_empty()
    }

    /// Number of edit operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Number of additions.
    pub fn additions(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EditOp::Add { .. }))
            .count()
    }

    /// Number of removals.
    pub fn removals(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EditOp::Remove { .. }))
            .count()
    }

    /// Number of replacements.
    pub fn replacements(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EditOp::Replace { .. }))
            .count()
    }

    /// The edit touching exactly `path`, if any.
    pub fn at(&self, path: &Path) -> Option<&EditOp> {
        self.ops.iter().find(|op| op.path() == path)
    }
}
