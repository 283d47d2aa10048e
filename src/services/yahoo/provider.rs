//! Yahoo-backed market data provider with retry on transient failures.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::client::YahooRestClient;
use crate::models::bar::{Quote, Series};
use crate::services::market_data::{MarketDataError, MarketDataProvider};

pub struct YahooMarketDataProvider {
    client: Arc<YahooRestClient>,
    max_retries: usize,
    min_backoff: Duration,
}

impl YahooMarketDataProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MarketDataError> {
        Ok(Self::with_client(Arc::new(YahooRestClient::new(
            base_url, timeout,
        )?)))
    }

    pub fn with_client(client: Arc<YahooRestClient>) -> Self {
        Self {
            client,
            max_retries: 3,
            min_backoff: Duration::from_millis(250),
        }
    }

    pub fn with_retry(mut self, max_retries: usize, min_backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.min_backoff = min_backoff;
        self
    }

    pub fn client(&self) -> &Arc<YahooRestClient> {
        &self.client
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_backoff)
            .with_max_times(self.max_retries)
    }
}

fn log_retry(symbol: &str, err: &MarketDataError, delay: Duration) {
    warn!(
        symbol = %symbol,
        error = %err,
        delay_ms = delay.as_millis() as u64,
        "retrying market data request for {}",
        symbol
    );
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Series, MarketDataError> {
        let client = &self.client;
        let chart = (move || async move { client.history(symbol, start, end).await })
            .retry(self.backoff())
            .when(MarketDataError::is_transient)
            .notify(|err: &MarketDataError, delay: Duration| log_retry(symbol, err, delay))
            .await?;

        let series = Series::new(chart.bars());
        if series.is_empty() {
            return Err(MarketDataError::no_data(symbol));
        }
        debug!(
            symbol = %symbol,
            bars = series.len(),
            "fetched {} bars for {}",
            series.len(),
            symbol
        );
        Ok(series)
    }

    async fn fetch_current_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let client = &self.client;
        let chart = (move || async move { client.today(symbol).await })
            .retry(self.backoff())
            .when(MarketDataError::is_transient)
            .notify(|err: &MarketDataError, delay: Duration| log_retry(symbol, err, delay))
            .await?;

        let bar = chart
            .bars()
            .pop()
            .ok_or_else(|| MarketDataError::no_data(symbol))?;
        let meta = &chart.meta;
        let timestamp = meta
            .regular_market_time
            .and_then(|t| DateTime::<Utc>::from_timestamp(t, 0))
            .unwrap_or(bar.timestamp);

        Ok(Quote {
            open: bar.open,
            close: bar.close,
            price: meta.regular_market_price.unwrap_or(bar.close),
            volume: meta.regular_market_volume.unwrap_or(bar.volume),
            timestamp,
        })
    }
}
