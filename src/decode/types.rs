//! Decoder types and traits

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the page's records sit in a response body
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLocator {
    /// The body itself must be a JSON array
    #[default]
    Root,
    /// A bare array, or an object wrapping one under `items`, `data` or `results`
    Envelope,
    /// Dot-separated path to the array (e.g. `data.rows`)
    Path(String),
}

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body into a list of records
    fn decode(&self, body: &str) -> Result<Vec<Value>>;
}
