//! Per-symbol buy/no-buy evaluation.

use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::indicators::IndicatorCalculator;
use crate::models::bar::Series;
use crate::models::signal::{Decision, DecisionStatus, MarketContext};
use crate::services::market_data::MarketDataProvider;
use crate::signals::decision::{BuyRule, RuleInputs};

pub struct SignalEvaluator {
    config: EngineConfig,
    calculator: IndicatorCalculator,
}

impl SignalEvaluator {
    /// Rejects invalid parameters up front so evaluation itself cannot fail.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let calculator = IndicatorCalculator::new(config.indicator_params());
        Ok(Self { config, calculator })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// History window `[as_of - lookback, as_of)`. The end is exclusive, so the
    /// newest bar is the previous session.
    pub fn history_range(&self, as_of: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = as_of
            .checked_sub_signed(Duration::days(i64::from(self.config.lookback_window_days)))
            .unwrap_or(NaiveDate::MIN);
        (start, as_of)
    }

    /// Pure decision from already-fetched history and the live context.
    pub fn decide(&self, symbol: &str, series: &Series, context: &MarketContext) -> Decision {
        let (Some(last), Some(average_volume)) = (series.last(), series.average_volume()) else {
            return Decision::unavailable(symbol, "no price history");
        };
        if !(context.current_price.is_finite()
            && context.current_open_price.is_finite()
            && context.current_volume.is_finite())
        {
            return Decision::unavailable(symbol, "quote contains non-numeric values");
        }

        let indicators = self.calculator.calculate(series);
        let inputs = RuleInputs {
            current_price: context.current_price,
            current_open_price: context.current_open_price,
            previous_close: last.close,
            current_volume: context.current_volume,
            average_volume,
            rsi: indicators.latest_rsi(),
            macd: indicators.latest_macd(),
            macd_signal: indicators.latest_macd_signal(),
        };

        let conditions = BuyRule::new(&self.config).check(&inputs);
        let recommended = BuyRule::passes(&conditions);

        debug!(
            symbol = %symbol,
            bars = series.len(),
            recommended,
            failed = conditions.iter().filter(|c| !c.passed).count(),
            "evaluated {}",
            symbol
        );

        Decision {
            symbol: symbol.to_string(),
            recommended,
            status: DecisionStatus::Evaluated,
            close_price: Some(last.close),
            open_price: Some(context.current_open_price),
            current_price: Some(context.current_price),
            current_volume: Some(context.current_volume),
            average_volume: Some(average_volume),
            rsi_latest: inputs.rsi.ok(),
            macd_latest: inputs.macd.ok(),
            macd_signal_latest: inputs.macd_signal.ok(),
            conditions,
        }
    }

    /// Fetch history and quote for `symbol`, then decide.
    ///
    /// Provider failures turn into an unavailable decision; this never errors.
    pub async fn evaluate(
        &self,
        provider: &dyn MarketDataProvider,
        symbol: &str,
        as_of: NaiveDate,
    ) -> Decision {
        let (start, end) = self.history_range(as_of);

        let series = match provider.fetch_series(symbol, start, end).await {
            Ok(series) if series.is_empty() => {
                warn!(symbol = %symbol, "no bars returned for {}", symbol);
                return Decision::unavailable(symbol, "no price history");
            }
            Ok(series) => series,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "failed to fetch history for {}", symbol);
                return Decision::unavailable(symbol, e.to_string());
            }
        };

        let quote = match provider.fetch_current_quote(symbol).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "failed to fetch quote for {}", symbol);
                return Decision::unavailable(symbol, e.to_string());
            }
        };

        self.decide(symbol, &series, &MarketContext::from(&quote))
    }
}
