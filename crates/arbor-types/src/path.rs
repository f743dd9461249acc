//! Structural paths from the document root to a node.
//!
//! Paths address mapping entries by key and sequence members by
//! [`ElementKey`], never by index, so a path stays valid across versions
//! in which siblings were inserted, removed, or reordered.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::identity::ElementKey;

/// One step of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A mapping entry.
    Key(String),
    /// A sequence member. `occurrence` separates members sharing a key
    /// (duplicate scalars, colliding identities) in first-seen order.
    Element { key: ElementKey, occurrence: usize },
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "/{key}"),
            PathSegment::Element { key, occurrence: 0 } => write!(f, "[{key}]"),
            PathSegment::Element { key, occurrence } => write!(f, "[{key}#{occurrence}]"),
        }
    }
}

/// Location of a node, as a list of segments from the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// A new path extended by `segment`.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    /// Builder-style: append a mapping key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.0.push(PathSegment::Key(key.into()));
        self
    }

    /// Builder-style: append a sequence member (first occurrence).
    pub fn element(mut self, key: ElementKey) -> Self {
        self.0.push(PathSegment::Element { key, occurrence: 0 });
        self
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use crate::value::Value;

    #[test]
    fn root_displays_as_slash() {
        assert_eq!(Path::root().to_string(), "/");
        assert!(Path::root().is_root());
    }

    #[test]
    fn keys_and_elements_display() {
        let path = Path::root()
            .key("services")
            .element(ElementKey::Identity(Identity::new("web")))
            .key("image");
        assert_eq!(path.to_string(), "/services[web]/image");
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn repeated_occurrence_is_numbered() {
        let path = Path::root().key("ports").child(PathSegment::Element {
            key: ElementKey::of_value(&Value::from(80)),
            occurrence: 1,
        });
        assert_eq!(path.to_string(), "/ports[=80#1]");
    }

    #[test]
    fn child_does_not_modify_parent() {
        let parent = Path::root().key("a");
        let child = parent.child(PathSegment::Key("b".into()));
        assert_eq!(parent.len(), 1);
        assert_eq!(child.to_string(), "/a/b");
    }

    #[test]
    fn serializes_as_display_string() {
        let path = Path::root().key("port");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"/port\"");
    }
}
