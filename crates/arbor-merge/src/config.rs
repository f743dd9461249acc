use arbor_annotate::AnnotateOptions;
use serde::{Deserialize, Serialize};

/// Configuration for a merge run through [`merge_values_with`](crate::merge_values_with).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Options applied when annotating each of the three inputs.
    pub annotate: AnnotateOptions,
}

impl MergeOptions {
    /// Options with a custom reserved identity field.
    pub fn with_reserved_field(field: impl Into<String>) -> Self {
        Self {
            annotate: AnnotateOptions::with_reserved_field(field),
        }
    }
}
