use serde::{Deserialize, Serialize};

/// Field name used when an annotated tree is rendered for inspection.
pub const DEFAULT_RESERVED_FIELD: &str = "__id__";

/// Configuration for identity annotation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateOptions {
    /// Mapping key that carries an element's identity when an annotated
    /// tree is rendered. Caller data must not use it inside sequence members.
    pub reserved_field: String,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            reserved_field: DEFAULT_RESERVED_FIELD.to_owned(),
        }
    }
}

impl AnnotateOptions {
    /// Options with a custom reserved field name.
    pub fn with_reserved_field(field: impl Into<String>) -> Self {
        Self {
            reserved_field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        assert_eq!(AnnotateOptions::default().reserved_field, "__id__");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let options: AnnotateOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, AnnotateOptions::default());
    }

    #[test]
    fn custom_field() {
        let options = AnnotateOptions::with_reserved_field("_key");
        assert_eq!(options.reserved_field, "_key");
    }
}
