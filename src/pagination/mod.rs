//! Pagination module
//!
//! Offset/limit pagination: each request skips `offset` records and asks for
//! `limit` more. A page shorter than `limit` ends the sequence.
//!
//! # Overview
//!
//! A [`Paginator`] hands out the query parameters for the first request and,
//! after each page, decides whether another request follows. Cursor progress
//! lives in a [`PaginationState`] owned by the caller's loop.

mod strategies;
mod types;

pub use strategies::OffsetPaginator;
pub use types::{NextPage, PaginationState, Paginator, QueryParams};

#[cfg(test)]
mod tests;
