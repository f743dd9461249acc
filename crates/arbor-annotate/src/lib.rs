//! Identity annotation for Arbor.
//!
//! Sequence members are matched across base, ours and theirs by a stable
//! key instead of their index. [`annotate`] computes that key for every
//! sequence member of a tree, producing an [`AnnotatedValue`]; [`strip`]
//! removes it again. The annotated form only lives between parsing and
//! rendering and never leaks into a document.
//!
//! ```rust
//! use arbor_annotate::{annotate, strip, KeyFields};
//! use arbor_types::Value;
//!
//! let tree = Value::mapping([(
//!     "services",
//!     Value::sequence([Value::mapping([("name", "web")])]),
//! )]);
//! let annotated = annotate(&tree, &KeyFields::default()).unwrap();
//! assert_eq!(strip(&annotated), tree);
//! ```

pub mod annotate;
pub mod annotated;
pub mod config;
pub mod error;
pub mod identify;

pub use annotate::{annotate, annotate_with};
pub use annotated::{strip, AnnotatedValue, Element};
pub use config::{AnnotateOptions, DEFAULT_RESERVED_FIELD};
pub use error::{AnnotateError, AnnotateResult};
pub use identify::{ContentHash, Identify, KeyFields};
