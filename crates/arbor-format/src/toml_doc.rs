//! TOML documents.
//!
//! TOML has no null and a document is always a table. Datetimes have no
//! counterpart in the tree model and are read as their RFC 3339 text.

use arbor_types::{Number, Path, PathSegment, Scalar, Value};

use crate::error::{member_segment, FormatError, FormatResult};
use crate::format::Format;

pub(crate) fn parse(text: &str) -> FormatResult<Value> {
    let table: toml::Table = text.parse()?;
    Ok(from_table(table))
}

pub(crate) fn render(value: &Value) -> FormatResult<String> {
    let root = Path::root();
    let Value::Mapping(map) = value else {
        return Err(FormatError::unrepresentable(
            Format::Toml,
            &root,
            format!("document root must be a mapping, found {}", value.kind()),
        ));
    };

    let mut table = toml::Table::new();
    for (key, child) in map {
        table.insert(key.clone(), to_toml(child, &root.child(PathSegment::Key(key.clone())))?);
    }
    Ok(toml::to_string_pretty(&table)?)
}

fn from_table(table: toml::Table) -> Value {
    Value::Mapping(table.into_iter().map(|(k, v)| (k, from_toml(v))).collect())
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::from(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(x) => Value::from(x),
        toml::Value::Boolean(b) => Value::from(b),
        toml::Value::Datetime(dt) => Value::from(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => from_table(table),
    }
}

fn to_toml(value: &Value, path: &Path) -> FormatResult<toml::Value> {
    Ok(match value {
        Value::Null => {
            return Err(FormatError::unrepresentable(Format::Toml, path, "TOML has no null value"));
        }
        Value::Scalar(Scalar::Bool(b)) => toml::Value::Boolean(*b),
        Value::Scalar(Scalar::Number(Number::Int(i))) => toml::Value::Integer(*i),
        Value::Scalar(Scalar::Number(Number::UInt(u))) => {
            return Err(FormatError::unrepresentable(
                Format::Toml,
                path,
                format!("integer {u} is outside the TOML integer range"),
            ));
        }
        Value::Scalar(Scalar::Number(Number::Float(x))) => toml::Value::Float(*x),
        Value::Scalar(Scalar::Text(s)) => toml::Value::String(s.clone()),
        Value::Sequence(items) => toml::Value::Array(
            items
                .iter()
                .map(|item| to_toml(item, &path.child(member_segment(item))))
                .collect::<FormatResult<_>>()?,
        ),
        Value::Mapping(map) => toml::Value::Table(
            map.iter()
                .map(|(k, v)| -> FormatResult<(String, toml::Value)> {
                    Ok((k.clone(), to_toml(v, &path.child(PathSegment::Key(k.clone())))?))
                })
                .collect::<FormatResult<_>>()?,
        ),
    })
}
