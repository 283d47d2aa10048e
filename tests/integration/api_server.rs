//! Integration tests for the health and metrics server

#[path = "api_server/test_utils.rs"]
mod test_utils;

use serde_json::Value;
use tickerwatch::models::signal::Decision;

use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "tickerwatch-scanner");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    app.metrics.ticks_total.inc();
    app.metrics
        .record_decision(&Decision::unavailable("VTI", "timeout"));

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for name in [
        "http_requests_total",
        "http_request_duration_seconds",
        "http_requests_in_flight",
        "scanner_ticks_total 1",
        "signal_evaluations_total{outcome=\"unavailable\"} 1",
    ] {
        assert!(body.contains(name), "Expected {name} in metrics output");
    }
}

#[tokio::test]
async fn requests_are_counted() {
    let app = TestApiServer::new().await;
    app.server.get("/health").await;
    app.server.get("/health").await;

    assert_eq!(app.metrics.http_requests_total.get(), 2);
    assert_eq!(app.metrics.http_requests_in_flight.get(), 0);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/signals").expect_failure().await;
    assert_eq!(response.status_code(), 404);
}
