//! Format detection and the parse/render entry points.

use std::fmt;
use std::path::Path as FsPath;
use std::str::FromStr;

use arbor_types::Value;
use serde::{Deserialize, Serialize};

use crate::error::{FormatError, FormatResult};
use crate::{json, toml_doc, yaml};

/// A supported document format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Json, Format::Yaml, Format::Toml];

    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: impl AsRef<FsPath>) -> FormatResult<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .ok_or_else(|| FormatError::UnknownExtension(path.to_path_buf()))
    }

    /// The canonical file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    /// Decode a document into a tree.
    pub fn parse(&self, text: &str) -> FormatResult<Value> {
        match self {
            Format::Json => json::parse(text),
            Format::Yaml => yaml::parse(text),
            Format::Toml => toml_doc::parse(text),
        }
    }

    /// Encode a tree as a document, ending with a newline.
    ///
    /// Fails when the tree holds something the format cannot express:
    /// non-finite floats in JSON; `null`, integers above `i64::MAX` or a
    /// non-mapping root in TOML.
    pub fn render(&self, value: &Value) -> FormatResult<String> {
        match self {
            Format::Json => json::render(value),
            Format::Yaml => yaml::render(value),
            Format::Toml => toml_doc::render(value),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
            Format::Toml => "TOML",
        })
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> FormatResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            _ => Err(FormatError::UnknownName(s.to_owned())),
        }
    }
}
