//! The annotated tree representation.

use arbor_types::{ElementKey, Map, PathSegment, Scalar, Value, ValueKind};

/// A tree whose sequence members carry their matching key.
///
/// Mirrors [`Value`] variant for variant; only sequences differ, holding
/// [`Element`]s instead of bare values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnotatedValue {
    Null,
    Scalar(Scalar),
    Sequence(Vec<Element>),
    Mapping(Map<AnnotatedValue>),
}

/// A sequence member together with its matching key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Identity for composite members, canonical text for scalar ones.
    pub key: ElementKey,
    /// How many earlier members of the same sequence share `key`.
    pub occurrence: usize,
    pub value: AnnotatedValue,
}

impl Element {
    /// The path segment addressing this member inside its sequence.
    pub fn segment(&self) -> PathSegment {
        PathSegment::Element {
            key: self.key.clone(),
            occurrence: self.occurrence,
        }
    }
}

impl AnnotatedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            AnnotatedValue::Null => ValueKind::Null,
            AnnotatedValue::Scalar(scalar) => Value::Scalar(scalar.clone()).kind(),
            AnnotatedValue::Sequence(_) => ValueKind::Sequence,
            AnnotatedValue::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Returns `true` for mappings and sequences.
    pub fn is_composite(&self) -> bool {
        matches!(self, AnnotatedValue::Sequence(_) | AnnotatedValue::Mapping(_))
    }

    /// Drop all annotation, giving back the plain tree.
    pub fn strip(&self) -> Value {
        match self {
            AnnotatedValue::Null => Value::Null,
            AnnotatedValue::Scalar(scalar) => Value::Scalar(scalar.clone()),
            AnnotatedValue::Sequence(elements) => {
                Value::Sequence(elements.iter().map(|e| e.value.strip()).collect())
            }
            AnnotatedValue::Mapping(map) => {
                Value::Mapping(map.iter().map(|(k, v)| (k.clone(), v.strip())).collect())
            }
        }
    }

    /// Render the tree with identities embedded under `reserved_field`.
    ///
    /// Only mapping members with an identity key receive the field; nested
    /// sequences and scalar members are rendered unchanged.
    pub fn render(&self, reserved_field: &str) -> Value {
        match self {
            AnnotatedValue::Null => Value::Null,
            AnnotatedValue::Scalar(scalar) => Value::Scalar(scalar.clone()),
            AnnotatedValue::Sequence(elements) => Value::Sequence(
                elements
                    .iter()
                    .map(|element| {
                        let rendered = element.value.render(reserved_field);
                        match (&element.key, rendered) {
                            (ElementKey::Identity(id), Value::Mapping(mut map)) => {
                                map.insert(reserved_field.to_owned(), Value::from(id.as_str()));
                                Value::Mapping(map)
                            }
                            (_, other) => other,
                        }
                    })
                    .collect(),
            ),
            AnnotatedValue::Mapping(map) => Value::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.render(reserved_field)))
                    .collect(),
            ),
        }
    }
}

/// Remove the annotation from a tree.
///
/// `strip(&annotate(t, f)?) == t` holds for every tree `t` and identity
/// function `f`.
pub fn strip(annotated: &AnnotatedValue) -> Value {
    annotated.strip()
}
