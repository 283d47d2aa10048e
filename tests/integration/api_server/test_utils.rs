use std::sync::Arc;
use std::time::Instant;

use axum_test::TestServer;
use tickerwatch::core::http::{create_router, AppState, HealthStatus};
use tickerwatch::metrics::Metrics;
use tokio::sync::RwLock;

/// HTTP server under test plus the metrics it exports.
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
        };

        let server = TestServer::new(create_router(state)).expect("test server");
        Self { server, metrics }
    }
}
