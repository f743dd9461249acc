use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Stable key that matches a sequence element across document versions.
///
/// Identities are produced by a caller-supplied function, typically from a
/// name-like field of the element. Equal identities mean "the same logical
/// entity"; collisions are tolerated and only degrade matching quality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derive an identity from the element's full content.
    ///
    /// The identity is the BLAKE3 hash of the canonical text of `value`,
    /// so structurally equal elements always share an identity.
    pub fn content_hash(value: &Value) -> Self {
        let hash = blake3::hash(value.canonical_text().as_bytes());
        Self(format!("#{}", hex::encode(&hash.as_bytes()[..8])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for Identity {
    fn from(i: i64) -> Self {
        Self(i.to_string())
    }
}

/// How a sequence member is matched across versions.
///
/// Composite members (mappings and sequences) are matched by their
/// [`Identity`]. Scalar and null members have no identity and are matched by
/// value equality, keyed on their canonical text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKey {
    Identity(Identity),
    Value(String),
}

impl ElementKey {
    /// Key for a scalar or null member.
    pub fn of_value(value: &Value) -> Self {
        ElementKey::Value(value.canonical_text())
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKey::Identity(id) => write!(f, "{id}"),
            ElementKey::Value(text) => write!(f, "={text}"),
        }
    }
}
