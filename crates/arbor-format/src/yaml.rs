//! YAML documents.
//!
//! Tags are dropped and mapping keys must be scalars; non-text scalar keys
//! are read as their text form.

use arbor_types::{Number, Path, PathSegment, Scalar, Value};
use serde_yaml::Value as Yaml;

use crate::error::{member_segment, FormatError, FormatResult};
use crate::format::Format;

pub(crate) fn parse(text: &str) -> FormatResult<Value> {
    let yaml: Yaml = serde_yaml::from_str(text)?;
    from_yaml(yaml, &Path::root())
}

pub(crate) fn render(value: &Value) -> FormatResult<String> {
    Ok(serde_yaml::to_string(&to_yaml(value))?)
}

fn from_yaml(yaml: Yaml, path: &Path) -> FormatResult<Value> {
    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::from(b),
        Yaml::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Value::from(i),
            (None, Some(u)) => Value::from(u),
            _ => Value::from(n.as_f64().unwrap_or(f64::NAN)),
        },
        Yaml::String(s) => Value::from(s),
        Yaml::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|item| from_yaml(item, path))
                .collect::<FormatResult<_>>()?,
        ),
        Yaml::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(key, child)| -> FormatResult<(String, Value)> {
                    let key = mapping_key(key, path)?;
                    let child_path = path.child(PathSegment::Key(key.clone()));
                    Ok((key, from_yaml(child, &child_path)?))
                })
                .collect::<FormatResult<_>>()?,
        ),
        Yaml::Tagged(tagged) => from_yaml(tagged.value, path)?,
    })
}

fn mapping_key(key: Yaml, path: &Path) -> FormatResult<String> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_owned()),
        Yaml::Tagged(tagged) => mapping_key(tagged.value, path),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(FormatError::unrepresentable(
            Format::Yaml,
            path,
            "mapping keys must be scalars",
        )),
    }
}

fn to_yaml(value: &Value) -> Yaml {
    match value {
        Value::Null => Yaml::Null,
        Value::Scalar(Scalar::Bool(b)) => Yaml::Bool(*b),
        Value::Scalar(Scalar::Number(Number::Int(i))) => Yaml::Number((*i).into()),
        Value::Scalar(Scalar::Number(Number::UInt(u))) => Yaml::Number((*u).into()),
        Value::Scalar(Scalar::Number(Number::Float(x))) => Yaml::Number((*x).into()),
        Value::Scalar(Scalar::Text(s)) => Yaml::String(s.clone()),
        Value::Sequence(items) => Yaml::Sequence(items.iter().map(to_yaml).collect()),
        Value::Mapping(map) => Yaml::Mapping(
            map.iter()
                .map(|(k, v)| (Yaml::String(k.clone()), to_yaml(v)))
                .collect(),
        ),
    }
}
