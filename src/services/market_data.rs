//! Market data provider interface and an in-memory implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::bar::{PriceBar, Quote, Series};

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("no data available for {symbol}")]
    NoData { symbol: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider error {code}: {description}")]
    Api { code: String, description: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl MarketDataError {
    pub fn no_data(symbol: impl Into<String>) -> Self {
        MarketDataError::NoData {
            symbol: symbol.into(),
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            MarketDataError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for `symbol` in `[start, end)`, oldest first.
    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Series, MarketDataError>;

    /// Today's open/close plus the live price and volume.
    async fn fetch_current_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}

/// Provider backed by a map, for tests and dry runs.
#[derive(Default)]
pub struct InMemoryMarketDataProvider {
    bars: RwLock<HashMap<String, Vec<PriceBar>>>,
    quotes: RwLock<HashMap<String, Quote>>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_bars(&self, symbol: &str, bars: Vec<PriceBar>) {
        self.bars.write().await.insert(symbol.to_string(), bars);
    }

    pub async fn set_quote(&self, symbol: &str, quote: Quote) {
        self.quotes.write().await.insert(symbol.to_string(), quote);
    }

    pub async fn remove(&self, symbol: &str) {
        self.bars.write().await.remove(symbol);
        self.quotes.write().await.remove(symbol);
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Series, MarketDataError> {
        let bars = self.bars.read().await;
        let bars = bars
            .get(symbol)
            .ok_or_else(|| MarketDataError::no_data(symbol))?;

        let from = start.and_time(NaiveTime::MIN).and_utc();
        let to = end.and_time(NaiveTime::MIN).and_utc();
        let in_range: Vec<PriceBar> = bars
            .iter()
            .filter(|b| b.timestamp >= from && b.timestamp < to)
            .cloned()
            .collect();

        if in_range.is_empty() {
            return Err(MarketDataError::no_data(symbol));
        }
        Ok(Series::new(in_range))
    }

    async fn fetch_current_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.quotes
            .read()
            .await
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketDataError::no_data(symbol))
    }
}
