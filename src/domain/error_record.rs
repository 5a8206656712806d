use super::browser::BrowserName;
use serde::{Deserialize, Serialize};

/// A fully normalized error observation ready for batching and transmission.
///
/// Field names match the wire format expected by the collection endpoint.
/// `line` and `column` are written as an empty string when no location could
/// be derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,
    pub source: String,
    #[serde(default, with = "position")]
    pub line: Option<u64>,
    #[serde(default, with = "position")]
    pub column: Option<u64>,
    pub app_version: String,
    pub browser: BrowserName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<String>,
}

impl ErrorRecord {
    pub fn has_location(&self) -> bool {
        self.line.is_some() || self.column.is_some()
    }
}

mod position {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(position: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match position {
            Some(value) => serializer.serialize_u64(*value),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(number)) => number.as_u64(),
            Some(Value::String(text)) => text.parse().ok(),
            _ => None,
        })
    }
}
