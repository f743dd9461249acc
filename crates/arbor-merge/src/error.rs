//! Error types for the merge crate.

/// Errors that abort a merge before any reconciliation happens.
///
/// Conflicts are not errors; they are reported through
/// [`MergeOutcome::Conflicted`](crate::MergeOutcome::Conflicted).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MergeError {
    /// One of the three input trees could not be annotated.
    #[error("cannot annotate {side} tree")]
    Annotate {
        side: Side,
        #[source]
        source: arbor_annotate::AnnotateError,
    },
}

/// Which of the three merge inputs an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Base,
    Ours,
    Theirs,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Base => "base",
            Side::Ours => "ours",
            Side::Theirs => "theirs",
        })
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
