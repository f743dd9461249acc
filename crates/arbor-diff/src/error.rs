//! Error types for the diff crate.

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// One of the input trees could not be annotated.
    #[error("annotation failed: {0}")]
    Annotate(#[from] arbor_annotate::AnnotateError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
