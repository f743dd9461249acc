//! Foundation types for Arbor.
//!
//! This crate provides the tree model that every other Arbor crate operates
//! on. Documents of any concrete format are decoded into a [`Value`] before
//! they reach the merge engine, and encoded back out afterwards.
//!
//! # Key Types
//!
//! - [`Value`] -- Recursive tree of nulls, scalars, sequences and mappings
//! - [`Map`] -- Mapping entries in document order
//! - [`Scalar`] / [`Number`] -- Leaf values
//! - [`Identity`] -- Stable key matching a sequence element across versions
//! - [`ElementKey`] -- How a sequence member is addressed (identity or value)
//! - [`Path`] / [`PathSegment`] -- Location of a node from the document root

pub mod error;
pub mod identity;
pub mod path;
pub mod value;

pub use error::{TypeError, TypeResult};
pub use identity::{ElementKey, Identity};
pub use path::{Path, PathSegment};
pub use value::{Map, Number, Scalar, Value, ValueKind};
