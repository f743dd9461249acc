//! JSON documents.

use arbor_types::Value;

use crate::error::FormatResult;

pub(crate) fn parse(text: &str) -> FormatResult<Value> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(json))
}

pub(crate) fn render(value: &Value) -> FormatResult<String> {
    let json = serde_json::Value::try_from(value.clone())?;
    let mut out = serde_json::to_string_pretty(&json)?;
    out.push('\n');
    Ok(out)
}
