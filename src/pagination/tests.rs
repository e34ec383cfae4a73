//! Tests for pagination module

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn param<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_with_params() {
    let next = NextPage::with_params(vec![("offset".to_string(), "10".to_string())]);
    assert!(next.is_continue());
    assert!(!next.is_done());

    if let NextPage::Continue { query_params } = next {
        assert_eq!(param(&query_params, "offset"), Some("10"));
    } else {
        panic!("Expected Continue");
    }
}

#[test]
fn test_next_page_done() {
    let next = NextPage::Done;
    assert!(next.is_done());
    assert!(!next.is_continue());
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_default() {
    let state = PaginationState::new();
    assert_eq!(state.offset, 0);
    assert_eq!(state.total_fetched, 0);
    assert!(!state.done);
}

#[test]
fn test_pagination_state_mutations() {
    let mut state = PaginationState::with_offset(500);
    assert_eq!(state.offset, 500);

    state.add_offset(50);
    assert_eq!(state.offset, 550);

    state.add_fetched(100);
    assert_eq!(state.total_fetched, 100);

    state.mark_done();
    assert!(state.done);
}

// ============================================================================
// Offset Paginator Tests
// ============================================================================

#[test]
fn test_offset_paginator_initial_params() {
    let paginator = OffsetPaginator::with_limit(1000);
    let state = PaginationState::new();

    let params = paginator.initial_params(&state);
    assert_eq!(
        params,
        vec![
            ("limit".to_string(), "1000".to_string()),
            ("offset".to_string(), "0".to_string()),
        ]
    );
}

#[test]
fn test_offset_paginator_custom_names() {
    let paginator = OffsetPaginator::new("skip", "take", 50);
    let params = paginator.initial_params(&PaginationState::with_offset(100));
    assert_eq!(param(&params, "skip"), Some("100"));
    assert_eq!(param(&params, "take"), Some("50"));
}

#[test]
fn test_offset_paginator_full_page_continues() {
    let paginator = OffsetPaginator::with_limit(100);
    let mut state = PaginationState::new();

    let next = paginator.process_page(100, &mut state);

    assert!(next.is_continue());
    assert_eq!(state.offset, 100);
    assert_eq!(state.total_fetched, 100);
    assert!(!state.done);

    if let NextPage::Continue { query_params } = next {
        assert_eq!(param(&query_params, "offset"), Some("100"));
        assert_eq!(param(&query_params, "limit"), Some("100"));
    }
}

#[test]
fn test_offset_paginator_short_page_stops() {
    let paginator = OffsetPaginator::with_limit(100);
    let mut state = PaginationState::new();

    let next = paginator.process_page(50, &mut state);

    assert!(next.is_done());
    assert!(state.done);
    assert_eq!(state.total_fetched, 50);
    // Offset does not move on the final page
    assert_eq!(state.offset, 0);
}

#[test]
fn test_offset_paginator_empty_page_stops() {
    let paginator = OffsetPaginator::with_limit(100);
    let mut state = PaginationState::with_offset(300);

    assert!(paginator.process_page(0, &mut state).is_done());
    assert_eq!(state.offset, 300);
    assert_eq!(state.total_fetched, 0);
}

#[test]
fn test_offset_paginator_zero_limit_stops() {
    let paginator = OffsetPaginator::with_limit(0);
    let mut state = PaginationState::new();

    assert!(paginator.process_page(0, &mut state).is_done());
}

/// Drive the paginator over a sequence of page sizes, returning the offsets
/// requested and the final total.
fn drive(limit: u32, pages: &[usize]) -> (Vec<u64>, u64) {
    let paginator = OffsetPaginator::with_limit(limit);
    let mut state = PaginationState::new();
    let mut offsets = Vec::new();

    for &size in pages {
        offsets.push(state.offset);
        if paginator.process_page(size, &mut state).is_done() {
            break;
        }
    }

    (offsets, state.total_fetched)
}

#[test_case(1000, &[1000, 1000, 437], &[0, 1000, 2000], 2437 ; "three pages")]
#[test_case(1000, &[437], &[0], 437 ; "single short page")]
#[test_case(1000, &[0], &[0], 0 ; "empty result")]
#[test_case(10, &[10, 10, 0], &[0, 10, 20], 20 ; "exact multiple needs empty page")]
#[test_case(10, &[10, 3, 10], &[0, 10], 13 ; "stops at first short page")]
fn test_offset_paginator_sequences(limit: u32, pages: &[usize], offsets: &[u64], total: u64) {
    let (seen, fetched) = drive(limit, pages);
    assert_eq!(seen, offsets);
    assert_eq!(fetched, total);
}

#[test]
fn test_offset_is_k_minus_one_times_limit() {
    let limit = 25;
    let pages = vec![25; 8];
    let (offsets, _) = drive(limit, &pages);

    for (k, offset) in offsets.iter().enumerate() {
        assert_eq!(*offset, k as u64 * u64::from(limit));
    }
}
