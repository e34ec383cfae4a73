//! HTTP client module
//!
//! One request per call: no retries, no rate limiting. Anything other than
//! `200 OK` is an error.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
