//! Pagination strategy implementations

use super::types::{NextPage, PaginationState, Paginator, QueryParams};

/// Default query parameter name for the offset
pub const DEFAULT_OFFSET_PARAM: &str = "offset";

/// Default query parameter name for the page size
pub const DEFAULT_LIMIT_PARAM: &str = "limit";

/// Offset-based pagination
///
/// Uses offset and limit parameters to paginate.
/// Common patterns:
/// - `?limit=1000&offset=2000`
/// - `?take=50&skip=100`
///
/// When the total is an exact multiple of the limit, the last full page is
/// followed by one request that comes back empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPaginator {
    /// Query parameter name for offset
    pub offset_param: String,
    /// Query parameter name for limit
    pub limit_param: String,
    /// Number of records per page
    pub limit_value: u32,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        limit_value: u32,
    ) -> Self {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            limit_value,
        }
    }

    /// Offset paginator using the `offset` and `limit` parameter names
    pub fn with_limit(limit_value: u32) -> Self {
        Self::new(DEFAULT_OFFSET_PARAM, DEFAULT_LIMIT_PARAM, limit_value)
    }

    fn params(&self, offset: u64) -> QueryParams {
        vec![
            (self.limit_param.clone(), self.limit_value.to_string()),
            (self.offset_param.clone(), offset.to_string()),
        ]
    }
}

impl Paginator for OffsetPaginator {
    fn initial_params(&self, state: &PaginationState) -> QueryParams {
        self.params(state.offset)
    }

    fn process_page(&self, records_count: usize, state: &mut PaginationState) -> NextPage {
        state.add_fetched(records_count as u64);

        // Short page: nothing left to fetch. A zero limit can never make progress.
        if self.limit_value == 0 || records_count < self.limit_value as usize {
            state.mark_done();
            return NextPage::Done;
        }

        state.add_offset(u64::from(self.limit_value));
        NextPage::with_params(self.params(state.offset))
    }
}
