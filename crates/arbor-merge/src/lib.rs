//! Merge engine for Arbor.
//!
//! Reconciles two versions of a document tree (ours, theirs) against their
//! common ancestor (base). Non-overlapping edits are combined; overlapping
//! edits that disagree are reported as [`ConflictRecord`]s instead of being
//! silently resolved.
//!
//! # Quick Start
//!
//! ```rust
//! use arbor_annotate::KeyFields;
//! use arbor_merge::merge_values;
//! use arbor_types::Value;
//!
//! let base = Value::mapping([("name", Value::from("svc")), ("replicas", Value::from(2))]);
//! let ours = Value::mapping([("name", Value::from("svc")), ("replicas", Value::from(3))]);
//! let theirs = Value::mapping([
//!     ("name", Value::from("svc")),
//!     ("replicas", Value::from(2)),
//!     ("timeout", Value::from(30)),
//! ]);
//!
//! let outcome = merge_values(&ours, &base, &theirs, &KeyFields::default()).unwrap();
//! assert!(outcome.is_clean());
//! assert_eq!(outcome.tree().get("replicas"), Some(&Value::from(3)));
//! assert_eq!(outcome.tree().get("timeout"), Some(&Value::from(30)));
//! ```

pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
mod order;
pub mod outcome;

// Re-exports for convenience.
pub use config::MergeOptions;
pub use conflict::{ConflictKind, ConflictRecord};
pub use engine::{merge, merge_values, merge_values_with};
pub use error::{MergeError, MergeResult, Side};
pub use outcome::{MergeOutcome, MergeReport};
