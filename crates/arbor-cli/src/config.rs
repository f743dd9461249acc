use std::path::{Path, PathBuf};

use anyhow::Context;
use arbor_annotate::{KeyFields, DEFAULT_RESERVED_FIELD};
use arbor_format::Format;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::DocumentArgs;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".arbor.toml";

/// Settings for the merge driver, read from a TOML file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Fields tried in order to identify sequence elements.
    pub id_fields: Vec<String>,
    /// Field name reserved for rendered identities.
    pub reserved_field: String,
    /// Format applied to every document, overriding extension detection.
    pub format: Option<Format>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            id_fields: KeyFields::default().fields().to_vec(),
            reserved_field: DEFAULT_RESERVED_FIELD.to_owned(),
            format: None,
        }
    }
}

impl DriverConfig {
    /// Load `explicit`, or `.arbor.toml` in the working directory, or defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::read(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!(path = %path.display(), "loaded driver config");
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn resolve(&self, args: &DocumentArgs) -> Settings {
        let id_fields = if args.id_fields.is_empty() {
            self.id_fields.clone()
        } else {
            args.id_fields.clone()
        };
        Settings {
            identify: KeyFields::new(id_fields),
            reserved_field: args
                .reserved_field
                .clone()
                .unwrap_or_else(|| self.reserved_field.clone()),
            format: args.format.or(self.format),
        }
    }
}

/// Effective settings for one command.
#[derive(Clone, Debug)]
pub struct Settings {
    pub identify: KeyFields,
    pub reserved_field: String,
    pub format: Option<Format>,
}

impl Settings {
    /// The explicit format if one was given, otherwise the first candidate
    /// path with a recognized extension.
    pub fn format_for(&self, candidates: &[&Path]) -> anyhow::Result<Format> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        candidates
            .iter()
            .find_map(|path| Format::from_path(path).ok())
            .with_context(|| {
                let names: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
                format!("cannot infer document format from {}; pass --format", names.join(", "))
            })
    }
}
