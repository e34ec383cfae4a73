//! Query configuration
//!
//! Everything one fetch run needs: endpoint, credential, fixed filters and
//! page size. Loaded from an optional JSON or YAML file, then overridden from
//! the command line.

use crate::auth::AuthConfig;
use crate::decode::RecordLocator;
use crate::error::{Error, Result};
use crate::pagination::QueryParams;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default query endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.scrunchai.com/v1/2894/query";

/// Default page size
pub const DEFAULT_LIMIT: u32 = 1000;

/// Default field selection
pub const DEFAULT_FIELDS: [&str; 3] = ["responses", "prompt", "prompt_id"];

// ============================================================================
// Query Config
// ============================================================================

/// Configuration for a fetch run
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Query endpoint URL
    pub endpoint: String,

    /// Bearer token
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// First day of the date range (inclusive)
    pub start_date: NaiveDate,

    /// Last day of the date range (inclusive)
    pub end_date: NaiveDate,

    /// Fields to select, sent comma-joined
    pub fields: Vec<String>,

    /// Page size
    pub limit: u32,

    /// Stop once this many records have been received
    pub max_records: Option<u64>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Where records sit in each response body
    pub records: RecordLocator,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            start_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 27).unwrap_or_default(),
            fields: DEFAULT_FIELDS.iter().map(ToString::to_string).collect(),
            limit: DEFAULT_LIMIT,
            max_records: None,
            timeout_secs: None,
            records: RecordLocator::default(),
        }
    }
}

impl fmt::Debug for QueryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("fields", &self.fields)
            .field("limit", &self.limit)
            .field("max_records", &self.max_records)
            .field("timeout_secs", &self.timeout_secs)
            .field("records", &self.records)
            .finish()
    }
}

impl QueryConfig {
    /// Load a config file; `.yaml` / `.yml` is read as YAML, anything else as JSON
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Parse a JSON config
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a YAML config
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Check every value before the first request goes out
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| Error::invalid_value("endpoint", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        match self.token.as_deref() {
            None => return Err(Error::missing_field("token")),
            Some(token) if token.trim().is_empty() => {
                return Err(Error::invalid_value("token", "must not be empty"));
            }
            Some(_) => {}
        }

        if self.start_date > self.end_date {
            return Err(Error::invalid_value(
                "start_date",
                format!("{} is after end_date {}", self.start_date, self.end_date),
            ));
        }

        if self.fields.is_empty() {
            return Err(Error::invalid_value("fields", "select at least one field"));
        }
        if self.fields.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::invalid_value("fields", "field names must not be empty"));
        }

        if self.limit == 0 {
            return Err(Error::invalid_value("limit", "must be greater than 0"));
        }

        if self.max_records == Some(0) {
            return Err(Error::invalid_value("max_records", "must be greater than 0"));
        }

        if self.timeout_secs == Some(0) {
            return Err(Error::invalid_value("timeout_secs", "must be greater than 0"));
        }

        Ok(())
    }

    /// Query parameters of the first page request, in wire order
    ///
    /// The paginator overwrites `limit` and `offset` in place on each page.
    pub fn base_params(&self) -> QueryParams {
        vec![
            (
                "start_date".to_string(),
                self.start_date.format("%Y-%m-%d").to_string(),
            ),
            (
                "end_date".to_string(),
                self.end_date.format("%Y-%m-%d").to_string(),
            ),
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), "0".to_string()),
            ("fields".to_string(), self.fields.join(",")),
        ]
    }

    /// Authentication for the configured token
    pub fn auth(&self) -> AuthConfig {
        match &self.token {
            Some(token) => AuthConfig::bearer(token.clone()),
            None => AuthConfig::None,
        }
    }

    /// Per-request timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
