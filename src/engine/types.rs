//! Engine types
//!
//! Progress events, configuration, statistics and the fetch result.

use crate::error::Error;
use std::fmt;

/// Progress reported while pages are fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A page request is about to be sent
    PageRequested {
        /// 1-based request number
        page: u32,
        /// Offset sent with the request
        offset: u64,
    },
    /// A page came back and was counted
    PageReceived {
        /// 1-based request number
        page: u32,
        /// Offset sent with the request
        offset: u64,
        /// Records in this page
        batch_size: usize,
        /// Running total including this page
        total_count: u64,
    },
}

impl ProgressEvent {
    /// Create a page requested event
    pub fn requested(page: u32, offset: u64) -> Self {
        Self::PageRequested { page, offset }
    }

    /// Create a page received event
    pub fn received(page: u32, offset: u64, batch_size: usize, total_count: u64) -> Self {
        Self::PageReceived {
            page,
            offset,
            batch_size,
            total_count,
        }
    }

    /// Offset the event refers to
    pub fn offset(&self) -> u64 {
        match self {
            Self::PageRequested { offset, .. } | Self::PageReceived { offset, .. } => *offset,
        }
    }

    /// Check if this is a requested event
    pub fn is_requested(&self) -> bool {
        matches!(self, Self::PageRequested { .. })
    }

    /// Check if this is a received event
    pub fn is_received(&self) -> bool {
        matches!(self, Self::PageReceived { .. })
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageRequested { offset, .. } => write!(f, "Fetching offset {offset}..."),
            Self::PageReceived {
                batch_size,
                total_count,
                ..
            } => write!(f, "Received {batch_size} items. Total so far: {total_count}"),
        }
    }
}

/// Configuration for a fetch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchConfig {
    /// Stop once this many records have been received (None = unlimited)
    pub max_records: Option<u64>,
}

impl FetchConfig {
    /// Create a new fetch config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max records
    #[must_use]
    pub fn with_max_records(mut self, max: u64) -> Self {
        self.max_records = Some(max);
        self
    }
}

/// Statistics from a fetch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Total records received
    pub records_fetched: u64,
    /// Requests issued, including a failed last one
    pub pages_fetched: u32,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl FetchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add records
    pub fn add_records(&mut self, count: u64) {
        self.records_fetched += count;
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// How a fetch run ended
///
/// Every variant carries the records counted up to that point; a failure
/// never discards the pages that did arrive.
#[derive(Debug)]
pub enum FetchResult {
    /// A short page was received: all data was fetched
    Complete {
        /// Records across all pages
        total_count: u64,
        /// Requests issued
        pages: u32,
    },
    /// The record cap was reached before the data ran out
    Truncated {
        /// Records counted, never more than `max_records`
        total_count: u64,
        /// Requests issued
        pages: u32,
        /// The cap that was hit
        max_records: u64,
    },
    /// A request failed; later pages were never requested
    Failed {
        /// Records across the pages before the failure
        total_count: u64,
        /// Requests issued, including the failed one
        pages: u32,
        /// Offset of the failed request
        offset: u64,
        /// What went wrong
        error: Error,
    },
}

impl FetchResult {
    /// Records counted before the run ended
    pub fn total_count(&self) -> u64 {
        match self {
            Self::Complete { total_count, .. }
            | Self::Truncated { total_count, .. }
            | Self::Failed { total_count, .. } => *total_count,
        }
    }

    /// Requests issued
    pub fn pages(&self) -> u32 {
        match self {
            Self::Complete { pages, .. }
            | Self::Truncated { pages, .. }
            | Self::Failed { pages, .. } => *pages,
        }
    }

    /// True when the data ran out normally
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// True when a request failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
