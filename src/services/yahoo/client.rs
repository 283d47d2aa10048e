//! Thin REST client for the chart endpoint.

use chrono::{NaiveDate, NaiveTime};
use std::time::Duration;
use tracing::debug;

use super::messages::{ChartResponse, ChartResult};
use crate::services::market_data::MarketDataError;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

pub struct YahooRestClient {
    base_url: String,
    http: reqwest::Client,
}

impl YahooRestClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Daily bars in `[start, end)`.
    pub async fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ChartResult, MarketDataError> {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end.and_time(NaiveTime::MIN).and_utc().timestamp();
        self.chart(
            symbol,
            &[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ],
        )
        .await
    }

    /// Today's single daily bar plus live market metadata.
    pub async fn today(&self, symbol: &str) -> Result<ChartResult, MarketDataError> {
        self.chart(
            symbol,
            &[("range", "1d".to_string()), ("interval", "1d".to_string())],
        )
        .await
    }

    async fn chart(
        &self,
        symbol: &str,
        query: &[(&str, String)],
    ) -> Result<ChartResult, MarketDataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        debug!(symbol = %symbol, url = %url, "requesting chart for {}", symbol);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() == 404 {
            return Err(MarketDataError::no_data(symbol));
        }
        if !status.is_success() {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChartResponse = serde_json::from_str(&body)?;
        if let Some(error) = parsed.chart.error {
            if error.is_not_found() {
                return Err(MarketDataError::no_data(symbol));
            }
            return Err(MarketDataError::Api {
                code: error.code,
                description: error.description,
            });
        }

        parsed
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::no_data(symbol))
    }
}
