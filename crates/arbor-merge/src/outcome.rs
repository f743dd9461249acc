//! Outcome types for three-way merge operations.

use arbor_annotate::AnnotatedValue;
use arbor_types::Value;
use serde::Serialize;

use crate::conflict::ConflictRecord;

/// The result of a three-way merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Every edit was reconciled.
    Merged(AnnotatedValue),
    /// Some paths need manual resolution. `partial` holds every reconciled
    /// edit and the base value at each conflicting path.
    Conflicted {
        partial: AnnotatedValue,
        conflicts: Vec<ConflictRecord>,
    },
}

impl MergeOutcome {
    pub(crate) fn from_parts(tree: AnnotatedValue, conflicts: Vec<ConflictRecord>) -> Self {
        if conflicts.is_empty() {
            MergeOutcome::Merged(tree)
        } else {
            MergeOutcome::Conflicted {
                partial: tree,
                conflicts,
            }
        }
    }

    /// Returns `true` if no conflict was found.
    pub fn is_clean(&self) -> bool {
        matches!(self, MergeOutcome::Merged(_))
    }

    pub fn is_conflicted(&self) -> bool {
        !self.is_clean()
    }

    /// Conflict records in traversal order; empty for a clean merge.
    pub fn conflicts(&self) -> &[ConflictRecord] {
        match self {
            MergeOutcome::Merged(_) => &[],
            MergeOutcome::Conflicted { conflicts, .. } => conflicts,
        }
    }

    pub fn conflict_count(&self) -> usize {
        self.conflicts().len()
    }

    /// The merged (or partially merged) tree, still annotated.
    pub fn annotated(&self) -> &AnnotatedValue {
        match self {
            MergeOutcome::Merged(tree) => tree,
            MergeOutcome::Conflicted { partial, .. } => partial,
        }
    }

    /// The merged (or partially merged) tree with annotation stripped.
    pub fn tree(&self) -> Value {
        self.annotated().strip()
    }

    /// Consume the outcome, keeping only the stripped tree.
    pub fn into_tree(self) -> Value {
        self.tree()
    }

    /// Consume the outcome into the stripped tree and its conflicts.
    pub fn into_parts(self) -> (Value, Vec<ConflictRecord>) {
        match self {
            MergeOutcome::Merged(tree) => (tree.strip(), Vec::new()),
            MergeOutcome::Conflicted { partial, conflicts } => (partial.strip(), conflicts),
        }
    }

    /// A serializable summary of the outcome.
    pub fn report(&self) -> MergeReport {
        MergeReport {
            clean: self.is_clean(),
            conflicts: self.conflicts().to_vec(),
            tree: self.tree(),
        }
    }
}

/// Serializable form of a [`MergeOutcome`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub clean: bool,
    pub conflicts: Vec<ConflictRecord>,
    pub tree: Value,
}
