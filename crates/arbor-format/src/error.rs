use std::path::PathBuf;

use arbor_types::{ElementKey, Identity, Path, PathSegment, TypeError, Value};

use crate::format::Format;

/// Errors produced while reading or writing documents.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The file extension does not name a supported format.
    #[error("cannot infer document format from '{}'", .0.display())]
    UnknownExtension(PathBuf),

    /// A format name that is not supported.
    #[error("unknown format '{0}' (expected json, yaml or toml)")]
    UnknownName(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("cannot write TOML: {0}")]
    TomlRender(#[from] toml::ser::Error),

    /// The tree holds a value the target format has no encoding for.
    #[error("{format} cannot represent the value at {path}: {reason}")]
    Unrepresentable {
        format: Format,
        path: Path,
        reason: String,
    },

    #[error(transparent)]
    Type(#[from] TypeError),
}

impl FormatError {
    pub(crate) fn unrepresentable(format: Format, path: &Path, reason: impl Into<String>) -> Self {
        Self::Unrepresentable {
            format,
            path: path.clone(),
            reason: reason.into(),
        }
    }
}

/// Path segment naming an unannotated sequence member in error messages.
pub(crate) fn member_segment(item: &Value) -> PathSegment {
    let key = if item.is_composite() {
        ElementKey::Identity(Identity::content_hash(item))
    } else {
        ElementKey::of_value(item)
    };
    PathSegment::Element { key, occurrence: 0 }
}

/// Convenience alias for format results.
pub type FormatResult<T> = Result<T, FormatError>;
