//! Execution engine module
//!
//! The fetch-all loop.
//!
//! # Overview
//!
//! The engine module provides:
//! - `FetchEngine` - Requests pages one after another until the data runs out
//! - `FetchConfig` - Optional record cap
//! - `FetchResult` - How the run ended, with the records counted so far
//! - `ProgressEvent` - Per-page progress for observers

mod types;

pub use types::{FetchConfig, FetchResult, FetchStats, ProgressEvent};

use crate::config::QueryConfig;
use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{NextPage, OffsetPaginator, PaginationState, Paginator, QueryParams};
use std::time::Instant;
use tracing::{debug, info, warn};

type Observer = Box<dyn FnMut(&ProgressEvent) + Send>;

/// Fetch engine for draining an offset-paginated endpoint
pub struct FetchEngine {
    /// HTTP client
    client: HttpClient,
    /// Response decoder
    decoder: JsonDecoder,
    /// Fetch configuration
    config: FetchConfig,
    /// Statistics
    stats: FetchStats,
    /// Progress observer
    observer: Option<Observer>,
}

impl FetchEngine {
    /// Create a new fetch engine
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            decoder: JsonDecoder::new(),
            config: FetchConfig::default(),
            stats: FetchStats::default(),
            observer: None,
        }
    }

    /// Build an engine for a validated query config
    pub fn from_query_config(query: &QueryConfig) -> Result<Self> {
        query.validate()?;

        let http_config = HttpClientConfig::builder()
            .timeout_opt(query.timeout())
            .build();
        let client = HttpClient::with_auth(http_config, query.auth())?;

        let mut config = FetchConfig::new();
        if let Some(max) = query.max_records {
            config = config.with_max_records(max);
        }

        Ok(Self::new(client)
            .with_config(config)
            .with_decoder(JsonDecoder::with_locator(query.records.clone())))
    }

    /// Set fetch configuration
    #[must_use]
    pub fn with_config(mut self, config: FetchConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the response decoder
    #[must_use]
    pub fn with_decoder(mut self, decoder: JsonDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Register a progress observer
    #[must_use]
    pub fn on_progress<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&ProgressEvent) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Get statistics
    pub fn stats(&self) -> &FetchStats {
        &self.stats
    }

    /// Fetch every page of `endpoint`
    ///
    /// `params` go out with every request in the given order. The
    /// paginator's parameters replace same-named entries where they stand
    /// and are appended otherwise. Requests are strictly sequential. The
    /// loop ends on a short page, on the record cap, or on the first failed
    /// request; failures are reported in the result, never as `Err`.
    /// Statistics are reset at the start of each run.
    pub async fn fetch_all(
        &mut self,
        endpoint: &str,
        params: &QueryParams,
        paginator: &dyn Paginator,
    ) -> FetchResult {
        let start = Instant::now();
        self.stats = FetchStats::default();
        let mut state = PaginationState::new();
        let mut page_params = paginator.initial_params(&state);
        let mut pages = 0u32;

        let result = loop {
            let offset = state.offset;
            pages += 1;
            self.stats.add_page();
            self.emit(&ProgressEvent::requested(pages, offset));

            let request = RequestConfig::new()
                .queries(params.iter().cloned())
                .merge_queries(std::mem::take(&mut page_params));

            let batch_size = match self.fetch_page(endpoint, request).await {
                Ok(count) => count,
                Err(error) => {
                    warn!(page = pages, offset, %error, "Page fetch failed, stopping");
                    break FetchResult::Failed {
                        total_count: state.total_fetched,
                        pages,
                        offset,
                        error,
                    };
                }
            };

            let next = paginator.process_page(batch_size, &mut state);
            self.stats.add_records(batch_size as u64);

            // Records past the cap are not counted.
            let cap_hit = self.config.max_records.filter(|&max| {
                state.total_fetched > max
                    || (state.total_fetched == max && matches!(next, NextPage::Continue { .. }))
            });
            if let Some(max) = cap_hit {
                state.total_fetched = max;
            }

            info!(
                page = pages,
                offset,
                batch_size,
                total = state.total_fetched,
                "Page received"
            );
            self.emit(&ProgressEvent::received(
                pages,
                offset,
                batch_size,
                state.total_fetched,
            ));

            if let Some(max) = cap_hit {
                info!(max_records = max, "Record cap reached, stopping");
                break FetchResult::Truncated {
                    total_count: state.total_fetched,
                    pages,
                    max_records: max,
                };
            }

            match next {
                NextPage::Done => {
                    break FetchResult::Complete {
                        total_count: state.total_fetched,
                        pages,
                    };
                }
                NextPage::Continue { query_params } => page_params = query_params,
            }
        };

        self.stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            total = result.total_count(),
            pages = result.pages(),
            duration_ms = self.stats.duration_ms,
            "Fetch finished"
        );
        result
    }

    /// Request one page and count its records
    async fn fetch_page(&self, endpoint: &str, request: RequestConfig) -> Result<usize> {
        let body = self.client.get_text_with_config(endpoint, request).await?;
        let records = self.decoder.decode(&body)?;
        debug!(records = records.len(), bytes = body.len(), "Decoded page");
        Ok(records.len())
    }

    fn emit(&mut self, event: &ProgressEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }
}

impl std::fmt::Debug for FetchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchEngine")
            .field("client", &self.client)
            .field("decoder", &self.decoder)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

/// Fetch every page described by `query`
///
/// Configuration problems are returned as `Err` before any request is made.
/// Once fetching starts, the outcome (including failures) is in the
/// [`FetchResult`].
pub async fn fetch_all(query: &QueryConfig) -> Result<FetchResult> {
    let mut engine = FetchEngine::from_query_config(query)?;
    let paginator = OffsetPaginator::with_limit(query.limit);
    Ok(engine
        .fetch_all(&query.endpoint, &query.base_params(), &paginator)
        .await)
}
