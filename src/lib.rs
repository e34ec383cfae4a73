// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagefetch
//!
//! Fetches every page of an offset-paginated JSON query endpoint and reports
//! how many records came back.
//!
//! ## Features
//!
//! - **Offset Pagination**: `limit`/`offset` requests until a short page
//! - **Bearer Auth**: Static token on every request
//! - **Typed Outcome**: Complete, truncated or failed, always with the partial count
//! - **Config**: JSON/YAML file, flags and environment
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagefetch::{fetch_all, QueryConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let query = QueryConfig {
//!         token: Some("...".to_string()),
//!         ..Default::default()
//!     };
//!
//!     let result = fetch_all(&query).await?;
//!     println!("{} records in {} requests", result.total_count(), result.pages());
//!     if let Some(err) = result.error() {
//!         eprintln!("stopped early: {err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      FetchEngine                         │
//! │  fetch_all(endpoint, filters, paginator) → FetchResult   │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────┬─────────────────┼───────────────┬─────────────┐
//! │   Auth   │      HTTP       │   Paginate    │   Decode    │
//! ├──────────┼─────────────────┼───────────────┼─────────────┤
//! │ Bearer   │ GET, 200 only   │ Offset/limit  │ Root array  │
//! │          │ Ordered query   │ Short page    │ Envelope    │
//! │          │ Timeout         │ stops         │ Dot path    │
//! └──────────┴─────────────────┴───────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Response decoders
pub mod decode;

/// Fetch loop
pub mod engine;

/// Query configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::QueryConfig;
pub use engine::{fetch_all, FetchEngine, FetchResult};
pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
