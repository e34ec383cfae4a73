//! HTTP client
//!
//! Thin wrapper around `reqwest::Client` that:
//! - Encodes ordered query parameters onto the request URL
//! - Applies default headers and authentication
//! - Classifies transport failures and non-200 replies

use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use reqwest::{Client, Response, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout (`None` = transport default)
    pub timeout: Option<Duration>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            timeout: None,
            default_headers,
            user_agent: format!("pagefetch/{}", crate::VERSION),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout if one is given
    pub fn timeout_opt(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, encoded in insertion order
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add several query parameters
    #[must_use]
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set query parameters, replacing same-named ones where they stand
    ///
    /// Keys not already present are appended.
    #[must_use]
    pub fn merge_queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in params {
            let (key, value) = (key.into(), value.into());
            match self.query.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => self.query.push((key, value)),
            }
        }
        self
    }
}

/// HTTP client for paginated GET requests
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            authenticator: Authenticator::default(),
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.set_authenticator(auth_config);
        Ok(client)
    }

    /// Set the authenticator
    pub fn set_authenticator(&mut self, auth_config: AuthConfig) {
        self.authenticator = Authenticator::new(auth_config);
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Build the full request URL: `url` with the request's query appended
    ///
    /// Query pairs already present on `url` are kept ahead of the new ones.
    pub fn request_url(&self, url: &str, config: &RequestConfig) -> Result<Url> {
        let mut full = Url::parse(url)?;
        if !config.query.is_empty() {
            full.query_pairs_mut().extend_pairs(
                config
                    .query
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(full)
    }

    /// Make a GET request with config
    ///
    /// Returns the response only for `200 OK`; any other status becomes
    /// [`Error::HttpStatus`] carrying the response body.
    pub async fn get_with_config(&self, url: &str, config: RequestConfig) -> Result<Response> {
        let full_url = self.request_url(url, &config)?;
        let timeout = self.config.timeout;

        let mut req = self.client.get(full_url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        req = self.authenticator.apply(req);

        debug!(url = %full_url, "GET");
        let response = req
            .send()
            .await
            .map_err(|e| classify_transport_error(e, timeout))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(response)
    }

    /// Make a GET request with config and return the body as text
    pub async fn get_text_with_config(&self, url: &str, config: RequestConfig) -> Result<String> {
        let response = self.get_with_config(url, config).await?;
        response
            .text()
            .await
            .map_err(|e| classify_transport_error(e, self.config.timeout))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("auth", self.authenticator.config())
            .finish_non_exhaustive()
    }
}

/// Map a reqwest failure to the crate error, surfacing timeouts separately
fn classify_transport_error(err: reqwest::Error, timeout: Option<Duration>) -> Error {
    match timeout {
        Some(timeout) if err.is_timeout() => Error::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        },
        _ => Error::Http(err),
    }
}
