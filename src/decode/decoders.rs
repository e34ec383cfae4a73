//! JSON record decoder

use super::types::{RecordDecoder, RecordLocator};
use crate::error::{Error, Result};
use serde_json::Value;

/// Object keys searched, in order, by [`RecordLocator::Envelope`]
pub const ENVELOPE_KEYS: [&str; 3] = ["items", "data", "results"];

/// JSON decoder with configurable record location
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    locator: RecordLocator,
}

impl JsonDecoder {
    /// Create a decoder that expects a top-level array
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given locator
    pub fn with_locator(locator: RecordLocator) -> Self {
        Self { locator }
    }

    /// Create a decoder that reads the array at a dot path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self::with_locator(RecordLocator::Path(path.into()))
    }

    /// The configured locator
    pub fn locator(&self) -> &RecordLocator {
        &self.locator
    }

    fn extract_records(&self, value: Value) -> Result<Vec<Value>> {
        match &self.locator {
            RecordLocator::Root => match value {
                Value::Array(arr) => Ok(arr),
                other => Err(Error::decode(format!(
                    "expected a JSON array, got {}",
                    kind(&other)
                ))),
            },
            RecordLocator::Envelope => extract_envelope(value),
            RecordLocator::Path(path) => match take_path(value, path) {
                Some(Value::Array(arr)) => Ok(arr),
                Some(other) => Err(Error::decode(format!(
                    "expected a JSON array at '{path}', got {}",
                    kind(&other)
                ))),
                None => Err(Error::decode(format!("path '{path}' not found in response"))),
            },
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;
        self.extract_records(value)
    }
}

fn extract_envelope(value: Value) -> Result<Vec<Value>> {
    let mut map = match value {
        Value::Array(arr) => return Ok(arr),
        Value::Object(map) => map,
        other => {
            return Err(Error::decode(format!(
                "expected a JSON array or object, got {}",
                kind(&other)
            )))
        }
    };

    if let Some(err) = map.get("error").filter(|v| is_truthy(v)) {
        let message = match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(Error::api(message));
    }

    for key in ENVELOPE_KEYS {
        if let Some(Value::Array(arr)) = map.remove(key) {
            return Ok(arr);
        }
    }

    Err(Error::decode(format!(
        "no records array under any of {ENVELOPE_KEYS:?}"
    )))
}

/// Walk a dot path, treating numeric segments as array indices
fn take_path(value: Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let mut current = value;
    for part in path.split('.').filter(|p| !p.is_empty()) {
        current = match current {
            Value::Object(mut map) => map.remove(part)?,
            Value::Array(mut arr) => {
                let idx: usize = part.parse().ok()?;
                if idx >= arr.len() {
                    return None;
                }
                arr.swap_remove(idx)
            }
            _ => return None,
        };
    }
    Some(current)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => true,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
