//! Structural diff for Arbor.
//!
//! Computes the edits that turn one document tree into another. Mapping
//! entries are compared by key and sequence members by their annotated
//! matching key, so inserting or reordering siblings never shows up as a
//! cascade of positional changes.
//!
//! # Key Types
//!
//! - [`EditSet`] / [`EditOp`] -- Add / Remove / Replace operations by path
//! - [`diff_annotated`] -- Diff two annotated trees
//! - [`diff_trees`] / [`diff_trees_with`] -- Annotate two plain trees and diff them
//! - [`slot_edit`] -- The single operation one side applied at one slot

pub mod edit;
pub mod error;
pub mod tree_diff;

pub use edit::{EditOp, EditSet};
pub use error::{DiffError, DiffResult};
pub use tree_diff::{diff_annotated, diff_trees, diff_trees_with, slot_edit};
