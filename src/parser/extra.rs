use serde_json::Value;

/// Flattens the auxiliary values attached to an explicit report into the
/// `objects` text of a record.
///
/// Structured elements of an array are replaced by their JSON text before the
/// whole array is serialized. A structured value passed on its own is
/// serialized whole. Empty containers and `null` carry nothing and yield `None`.
pub fn normalize_extra_objects(extra: Value) -> Option<String> {
    match extra {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(_) | Value::Number(_) => Some(extra.to_string()),
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => {
            let flattened: Vec<Value> = items.into_iter().map(stringify_structured).collect();
            Some(Value::Array(flattened).to_string())
        }
        Value::Object(ref fields) if fields.is_empty() => None,
        Value::Object(_) => Some(extra.to_string()),
    }
}

fn stringify_structured(value: Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => Value::String(value.to_string()),
        primitive => primitive,
    }
}
