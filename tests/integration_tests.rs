//! Integration tests using mock HTTP server
//!
//! Tests the full flow: query config → sequential page requests → typed result

use pagefetch::decode::RecordLocator;
use pagefetch::engine::{FetchEngine, FetchResult, ProgressEvent};
use pagefetch::http::{HttpClient, HttpClientConfig};
use pagefetch::pagination::OffsetPaginator;
use pagefetch::{fetch_all, Error, QueryConfig};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/v1/2894/query";

fn page(size: usize) -> Value {
    Value::Array(
        (0..size)
            .map(|i| json!({"prompt_id": i, "prompt": "best crm", "responses": 3}))
            .collect(),
    )
}

fn query(server: &MockServer, limit: u32) -> QueryConfig {
    QueryConfig {
        endpoint: format!("{}{QUERY_PATH}", server.uri()),
        token: Some("test-token".to_string()),
        limit,
        ..Default::default()
    }
}

/// Serve `pages` in order by offset; the request after the last page gets `tail`
async fn serve_pages(server: &MockServer, limit: u32, pages: &[usize], tail: Option<ResponseTemplate>) {
    for (k, size) in pages.iter().enumerate() {
        let offset = k as u64 * u64::from(limit);
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(query_param("offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(*size)))
            .expect(1)
            .mount(server)
            .await;
    }

    if let Some(tail) = tail {
        let offset = pages.len() as u64 * u64::from(limit);
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(query_param("offset", offset.to_string()))
            .respond_with(tail)
            .expect(1)
            .mount(server)
            .await;
    }
}

async fn requested_offsets(server: &MockServer) -> Vec<u64> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|req| {
            req.url
                .query_pairs()
                .find(|(k, _)| k == "offset")
                .and_then(|(_, v)| v.parse().ok())
        })
        .collect()
}

// ============================================================================
// Pagination Scenarios
// ============================================================================

#[tokio::test]
async fn test_three_pages_total_2437() {
    let server = MockServer::start().await;
    serve_pages(&server, 1000, &[1000, 1000, 437], None).await;

    let result = fetch_all(&query(&server, 1000)).await.unwrap();

    assert!(result.is_complete());
    assert_eq!(result.total_count(), 2437);
    assert_eq!(result.pages(), 3);
    assert_eq!(requested_offsets(&server).await, vec![0, 1000, 2000]);
}

#[test_case(10, &[3], 1 ; "first page short")]
#[test_case(10, &[10, 10, 10, 2], 4 ; "several full pages")]
#[test_case(10, &[10, 10, 0], 3 ; "exact multiple issues trailing empty request")]
#[test_case(7, &[0], 1 ; "no data")]
#[tokio::test]
async fn test_total_is_sum_of_pages(limit: u32, pages: &[usize], requests: u32) {
    let server = MockServer::start().await;
    serve_pages(&server, limit, pages, None).await;

    let result = fetch_all(&query(&server, limit)).await.unwrap();

    assert!(result.is_complete());
    assert_eq!(result.total_count(), pages.iter().sum::<usize>() as u64);
    assert_eq!(result.pages(), requests);

    let expected: Vec<u64> = (0..u64::from(requests)).map(|k| k * u64::from(limit)).collect();
    assert_eq!(requested_offsets(&server).await, expected);
}

// ============================================================================
// Failure Handling
// ============================================================================

#[test_case(404 ; "not found")]
#[test_case(429 ; "rate limited")]
#[test_case(500 ; "server error")]
#[test_case(201 ; "success other than 200")]
#[tokio::test]
async fn test_non_200_on_third_page_keeps_partial_total(status: u16) {
    let server = MockServer::start().await;
    serve_pages(
        &server,
        100,
        &[100, 100],
        Some(ResponseTemplate::new(status).set_body_json(page(100))),
    )
    .await;

    let result = fetch_all(&query(&server, 100)).await.unwrap();

    match &result {
        FetchResult::Failed {
            total_count,
            pages,
            offset,
            error,
        } => {
            assert_eq!(*total_count, 200);
            assert_eq!(*pages, 3);
            assert_eq!(*offset, 200);
            assert_eq!(error.status(), Some(status));
        }
        other => panic!("Expected Failed, got {other:?}"),
    }
    assert_eq!(requested_offsets(&server).await, vec![0, 100, 200]);
}

#[tokio::test]
async fn test_unparseable_page_stops_like_status_failure() {
    let server = MockServer::start().await;
    serve_pages(
        &server,
        100,
        &[100],
        Some(ResponseTemplate::new(200).set_body_string("<html>gateway</html>")),
    )
    .await;

    let result = fetch_all(&query(&server, 100)).await.unwrap();

    assert!(result.is_failed());
    assert_eq!(result.total_count(), 100);
    assert_eq!(result.pages(), 2);
    assert!(matches!(result.error(), Some(Error::Decode { .. })));
}

#[tokio::test]
async fn test_object_body_is_rejected_by_default() {
    let server = MockServer::start().await;
    serve_pages(
        &server,
        100,
        &[],
        Some(ResponseTemplate::new(200).set_body_json(json!({"items": page(3)}))),
    )
    .await;

    let result = fetch_all(&query(&server, 100)).await.unwrap();

    assert!(result.is_failed());
    assert_eq!(result.total_count(), 0);
}

#[tokio::test]
async fn test_connection_refused_returns_zero_total() {
    let query = QueryConfig {
        endpoint: "http://127.0.0.1:1/v1/2894/query".to_string(),
        token: Some("test-token".to_string()),
        ..Default::default()
    };

    let result = fetch_all(&query).await.unwrap();

    assert!(result.is_failed());
    assert_eq!(result.total_count(), 0);
    assert_eq!(result.pages(), 1);
    assert!(result.error().is_some_and(Error::is_transport));
}

// ============================================================================
// Request Shape
// ============================================================================

#[tokio::test]
async fn test_request_carries_filters_and_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/json"))
        .and(query_param("start_date", "2025-12-01"))
        .and(query_param("end_date", "2026-01-27"))
        .and(query_param("fields", "responses,prompt,prompt_id"))
        .and(query_param("limit", "1000"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1)))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetch_all(&query(&server, 1000)).await.unwrap();
    assert!(result.is_complete());
    assert_eq!(result.total_count(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("start_date=2025-12-01&end_date=2026-01-27&limit=1000&offset=0&fields=responses%2Cprompt%2Cprompt_id")
    );
}

#[tokio::test]
async fn test_envelope_responses_with_record_cap() {
    let server = MockServer::start().await;
    for offset in [0u64, 50] {
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(query_param("offset", offset.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": page(50), "total": 500})),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let query = QueryConfig {
        records: RecordLocator::Envelope,
        max_records: Some(75),
        ..query(&server, 50)
    };
    let result = fetch_all(&query).await.unwrap();

    assert!(matches!(
        result,
        FetchResult::Truncated {
            total_count: 75,
            pages: 2,
            max_records: 75
        }
    ));
}

#[tokio::test]
async fn test_engine_progress_matches_pages() {
    let server = MockServer::start().await;
    serve_pages(&server, 2, &[2, 2, 1], None).await;

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);

    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    let mut engine = FetchEngine::new(client).on_progress(move |event: &ProgressEvent| {
        sink.lock().unwrap().push(event.to_string());
    });
    let result = engine
        .fetch_all(
            &format!("{}{QUERY_PATH}", server.uri()),
            &Vec::new(),
            &OffsetPaginator::with_limit(2),
        )
        .await;

    assert_eq!(result.total_count(), 5);
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            "Fetching offset 0...",
            "Received 2 items. Total so far: 2",
            "Fetching offset 2...",
            "Received 2 items. Total so far: 4",
            "Fetching offset 4...",
            "Received 1 items. Total so far: 5",
        ]
    );
}
