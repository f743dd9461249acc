//! The tree value model.
//!
//! A [`Value`] is a closed sum type over the four node shapes a
//! configuration document can take. Every traversal in Arbor is an
//! exhaustive match over these variants.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// A numeric scalar.
///
/// Integers and floats are kept apart: `Int(1)` and `Float(1.0)` are
/// different values. Floats compare by bit pattern so that equality is
/// total (a `NaN` read from a TOML document equals itself).
///
/// `UInt` only holds integers above `i64::MAX`; use [`Number::from_u64`]
/// to keep that normalization.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    pub fn from_u64(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => Number::Int(i),
            Err(_) => Number::UInt(n),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::UInt(a), Number::UInt(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::UInt(u) => write!(f, "{u}"),
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// A leaf value: boolean, number, or text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

/// Key/value entries of a mapping, in document order.
///
/// Equality ignores order; iteration follows insertion.
pub type Map<V = Value> = IndexMap<String, V>;

/// A node in a document tree.
///
/// Mapping keys keep their document order so that a rendered document
/// keeps its layout. The order carries no meaning for equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(Map),
}

/// The shape of a [`Value`], used in error messages and shape checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    Text,
    Sequence,
    Mapping,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::Text => "text",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Build a mapping from key/value pairs.
    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a sequence from anything convertible into values.
    pub fn sequence<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Scalar(Scalar::Bool(_)) => ValueKind::Bool,
            Value::Scalar(Scalar::Number(_)) => ValueKind::Number,
            Value::Scalar(Scalar::Text(_)) => ValueKind::Text,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Returns `true` for mappings and sequences.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_mapping(&self) -> Option<&Map> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up a key if this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Consume the value as a mapping, failing for any other shape.
    pub fn into_mapping(self) -> TypeResult<Map> {
        match self {
            Value::Mapping(map) => Ok(map),
            other => Err(TypeError::UnexpectedKind {
                expected: ValueKind::Mapping,
                actual: other.kind(),
            }),
        }
    }

    /// Compact, deterministic text form of the value, with mapping keys
    /// sorted.
    ///
    /// Two values are equal exactly when their canonical texts are equal,
    /// which makes this usable as a matching key for scalar sequence members.
    pub fn canonical_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Scalar(Scalar::Bool(b)) => write!(f, "{b}"),
            Value::Scalar(Scalar::Number(n)) => write!(f, "{n}"),
            Value::Scalar(Scalar::Text(s)) => {
                let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Mapping(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                f.write_str("{")?;
                for (i, (key, value)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                    write!(f, "{quoted}:{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Scalar(Scalar::Number(Number::Int(i)))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Scalar(Scalar::Number(Number::from_u64(n)))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::from(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(Scalar::Number(Number::Float(x)))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::Text(s.to_owned()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::Text(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Mapping(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::from(i),
                (None, Some(u)) => Value::from(u),
                _ => Value::from(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = TypeError;

    fn try_from(value: Value) -> TypeResult<Self> {
        Ok(match value {
            Value::Null => serde_json::Value::Null,
            Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(b),
            Value::Scalar(Scalar::Number(Number::Int(i))) => serde_json::Value::from(i),
            Value::Scalar(Scalar::Number(Number::UInt(u))) => serde_json::Value::from(u),
            Value::Scalar(Scalar::Number(Number::Float(x))) => serde_json::Number::from_f64(x)
                .map(serde_json::Value::Number)
                .ok_or_else(|| TypeError::NonFiniteNumber(x.to_string()))?,
            Value::Scalar(Scalar::Text(s)) => serde_json::Value::String(s),
            Value::Sequence(items) => serde_json::Value::Array(
                items
                    .into_iter()
                    .map(serde_json::Value::try_from)
                    .collect::<TypeResult<_>>()?,
            ),
            Value::Mapping(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| Ok((k, serde_json::Value::try_from(v)?)))
                    .collect::<TypeResult<_>>()?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_cover_every_shape() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(3).kind(), ValueKind::Number);
        assert_eq!(Value::from("x").kind(), ValueKind::Text);
        assert_eq!(Value::sequence([1, 2]).kind(), ValueKind::Sequence);
        assert_eq!(Value::mapping([("a", 1)]).kind(), ValueKind::Mapping);
    }

    #[test]
    fn int_and_float_are_distinct() {
        assert_ne!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from(1).canonical_text(), Value::from(1.0).canonical_text());
    }

    #[test]
    fn nan_equals_itself() {
        let nan = Value::from(f64::NAN);
        assert_eq!(nan, nan.clone());
    }

    #[test]
    fn canonical_text_is_compact_json() {
        let value = Value::from(json!({"b": [1, "two", null], "a": {"x": true}}));
        assert_eq!(value.canonical_text(), r#"{"a":{"x":true},"b":[1,"two",null]}"#);
    }

    #[test]
    fn canonical_text_escapes_strings() {
        let value = Value::from("say \"hi\"\n");
        assert_eq!(value.canonical_text(), r#""say \"hi\"\n""#);
    }

    #[test]
    fn json_conversion_preserves_numbers() {
        let value = Value::from(json!({"port": 80, "ratio": 0.5, "big": 18446744073709551615u64}));
        assert_eq!(value.get("port"), Some(&Value::from(80)));
        assert_eq!(value.get("ratio"), Some(&Value::from(0.5)));
        assert_eq!(
            value.get("big"),
            Some(&Value::Scalar(Scalar::Number(Number::UInt(u64::MAX))))
        );
    }

    #[test]
    fn large_unsigned_integers_round_trip() {
        let original = json!({"id": 18446744073709551615u64});
        let back = serde_json::Value::try_from(Value::from(original.clone())).unwrap();
        assert_eq!(back, original);
        assert_eq!(Value::from(u64::MAX).canonical_text(), "18446744073709551615");
    }

    #[test]
    fn small_unsigned_integers_normalize_to_int() {
        assert_eq!(Value::from(7u64), Value::from(7));
        let value: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(value, Value::from(u64::MAX));
    }

    #[test]
    fn mapping_keeps_document_order() {
        let value = Value::from(json!({"version": "1.0", "name": "svc"}));
        let keys: Vec<&String> = value.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["version", "name"]);
        let back = serde_json::Value::try_from(value).unwrap();
        assert_eq!(back.to_string(), r#"{"version":"1.0","name":"svc"}"#);
    }

    #[test]
    fn mapping_equality_ignores_order() {
        let a = Value::mapping([("x", 1), ("y", 2)]);
        let b = Value::mapping([("y", 2), ("x", 1)]);
        assert_eq!(a, b);
        assert_eq!(a.canonical_text(), b.canonical_text());
    }

    #[test]
    fn json_round_trip() {
        let original = json!({"name": "svc", "ports": [80, 443], "tls": null, "on": false});
        let back = serde_json::Value::try_from(Value::from(original.clone())).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn non_finite_float_rejected_for_json() {
        let err = serde_json::Value::try_from(Value::from(f64::INFINITY)).unwrap_err();
        assert!(matches!(err, TypeError::NonFiniteNumber(_)));
    }

    #[test]
    fn serde_deserializes_untagged() {
        let value: Value = serde_json::from_str(r#"{"a": [1, 2.5, "s", null, true]}"#).unwrap();
        assert_eq!(
            value,
            Value::mapping([(
                "a",
                Value::sequence([
                    Value::from(1),
                    Value::from(2.5),
                    Value::from("s"),
                    Value::Null,
                    Value::from(true),
                ])
            )])
        );
    }

    #[test]
    fn into_mapping_rejects_sequence() {
        let err = Value::sequence([1]).into_mapping().unwrap_err();
        assert_eq!(
            err,
            TypeError::UnexpectedKind {
                expected: ValueKind::Mapping,
                actual: ValueKind::Sequence,
            }
        );
    }
}
