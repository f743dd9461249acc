//! Error types for the annotate crate.

use arbor_types::Path;

/// Errors that can occur while annotating a tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnnotateError {
    /// A sequence member already uses the reserved identity field name.
    #[error("reserved identity field {field:?} already present at {path}")]
    IdentityFieldCollision { path: Path, field: String },
}

/// Convenience alias for annotate results.
pub type AnnotateResult<T> = Result<T, AnnotateError>;
