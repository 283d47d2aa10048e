//! Turns a price series into the aligned RSI / MACD indicator set.

use serde::{Deserialize, Serialize};

use crate::indicators::momentum::{macd_min_bars, macd_series, rsi_min_bars, rsi_series};
use crate::models::bar::Series;
use crate::models::indicators::IndicatorSet;

/// Lookback periods for the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub rsi_period: u32,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorCalculator {
    params: IndicatorParams,
}

impl IndicatorCalculator {
    pub fn new(params: IndicatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Compute RSI, MACD and MACD signal over the series closes.
    ///
    /// Never fails: short series simply produce undefined (`NaN`) entries.
    pub fn calculate(&self, series: &Series) -> IndicatorSet {
        let closes = series.closes();
        let p = &self.params;
        let macd = macd_series(&closes, p.macd_fast, p.macd_slow, p.macd_signal);

        IndicatorSet {
            rsi: rsi_series(&closes, p.rsi_period),
            macd: macd.macd,
            macd_signal: macd.signal,
            rsi_required: rsi_min_bars(p.rsi_period),
            macd_required: macd_min_bars(p.macd_slow, p.macd_signal),
        }
    }
}

/// Calculate indicators with the given parameters
pub fn calculate_indicators(series: &Series, params: IndicatorParams) -> IndicatorSet {
    IndicatorCalculator::new(params).calculate(series)
}
