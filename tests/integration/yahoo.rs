//! Integration tests for the Yahoo chart provider against a mocked API


use chrono::{DateTime, NaiveDate};
use tickerwatch::services::market_data::{MarketDataError, MarketDataProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use test_utils::*;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

#[tokio::test]
async fn history_is_parsed_into_bars() {
    let server = MockServer::start().await;
    mock_history(&server, "VTI", history_body()).await;
    let provider = provider_for(&server);

    let series = provider
        .fetch_series("VTI", date(13), date(19))
        .await
        .expect("history");

    // Rows with a null price or a null volume are dropped.
    assert_eq!(series.closes(), vec![100.5, 103.5]);
    assert_eq!(series.volumes(), vec![1_000_000.0, 1_200_000.0]);
    assert_eq!(series.average_volume(), Some(1_100_000.0));
    assert_eq!(
        series.last().unwrap().timestamp,
        DateTime::from_timestamp(HISTORY_TIMESTAMPS[3], 0).unwrap()
    );
}

#[tokio::test]
async fn history_request_uses_utc_midnight_periods() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/VTI"))
        .and(query_param("period1", "1791849600"))
        .and(query_param("period2", "1792368000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    provider
        .fetch_series("VTI", date(13), date(19))
        .await
        .expect("history");
}

#[tokio::test]
async fn quote_prefers_live_market_fields() {
    let server = MockServer::start().await;
    mock_today(&server, "VTI", today_body()).await;
    let provider = provider_for(&server);

    let quote = provider.fetch_current_quote("VTI").await.expect("quote");
    assert_eq!(quote.open, 104.0);
    assert_eq!(quote.close, 105.0);
    assert_eq!(quote.price, 105.25);
    assert_eq!(quote.volume, 870_000.0);
    assert_eq!(quote.timestamp.timestamp(), TODAY_TIMESTAMP + 3600);
}

#[tokio::test]
async fn unknown_symbol_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GONE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(&server)
        .await;
    mock_history(&server, "DLST", not_found_body()).await;
    let provider = provider_for(&server);

    let err = provider
        .fetch_series("GONE", date(13), date(19))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::NoData { .. }));

    let err = provider
        .fetch_series("DLST", date(13), date(19))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::NoData { .. }));
}

#[tokio::test]
async fn chart_error_is_reported() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "chart": {
            "result": null,
            "error": { "code": "Bad Request", "description": "Invalid input - interval=1d is not supported" }
        }
    });
    mock_today(&server, "VTI", body).await;
    let provider = provider_for(&server);

    match provider.fetch_current_quote("VTI").await {
        Err(MarketDataError::Api { code, .. }) => assert_eq!(code, "Bad Request"),
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/VTI"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/VTI"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_body()))
        .with_priority(2)
        .mount(&server)
        .await;
    let provider = provider_for(&server);

    let series = provider
        .fetch_series("VTI", date(13), date(19))
        .await
        .expect("history after retry");
    assert_eq!(series.len(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/VTI"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
        .expect(1)
        .mount(&server)
        .await;
    let provider = provider_for(&server);

    match provider.fetch_current_quote("VTI").await {
        Err(MarketDataError::Status { status, body }) => {
            assert_eq!(status, 400);
            assert_eq!(body, "bad");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
