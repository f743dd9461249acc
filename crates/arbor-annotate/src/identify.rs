//! Identity functions for composite sequence members.

use arbor_types::{Identity, Scalar, Value};

/// Computes the [`Identity`] of a composite sequence member.
///
/// Implementations must be deterministic and pure: the same element must
/// always yield the same identity, in every version of the document.
/// Any `Fn(&Value) -> Identity` closure is an `Identify`.
pub trait Identify {
    fn identify(&self, element: &Value) -> Identity;
}

impl<F> Identify for F
where
    F: Fn(&Value) -> Identity,
{
    fn identify(&self, element: &Value) -> Identity {
        self(element)
    }
}

/// Identify elements by their whole content.
///
/// Any change to an element changes its identity, so an edited element is
/// seen as a removal plus an addition. Useful for sequences of anonymous
/// records.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentHash;

impl Identify for ContentHash {
    fn identify(&self, element: &Value) -> Identity {
        Identity::content_hash(element)
    }
}

/// Identify mapping elements by the first present key field.
///
/// Fields are tried in order; the first one holding a scalar value gives
/// the identity. Elements without any of the fields (and nested sequences)
/// fall back to [`ContentHash`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyFields {
    fields: Vec<String>,
}

impl KeyFields {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl Default for KeyFields {
    fn default() -> Self {
        Self::new(["name", "id", "key"])
    }
}

impl Identify for KeyFields {
    fn identify(&self, element: &Value) -> Identity {
        let key = self
            .fields
            .iter()
            .filter_map(|field| element.get(field))
            .find_map(|value| match value {
                Value::Scalar(Scalar::Text(s)) => Some(Identity::new(s.as_str())),
                Value::Scalar(scalar) => Some(Identity::new(Value::Scalar(scalar.clone()).canonical_text())),
                _ => None,
            });
        key.unwrap_or_else(|| Identity::content_hash(element))
    }
}
