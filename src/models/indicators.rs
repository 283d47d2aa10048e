use serde::Serialize;
use std::fmt;

use crate::common::math;
use crate::indicators::error::IndicatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndicatorKind {
    Rsi,
    Macd,
    MacdSignal,
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Rsi => write!(f, "RSI"),
            IndicatorKind::Macd => write!(f, "MACD"),
            IndicatorKind::MacdSignal => write!(f, "MACD signal"),
        }
    }
}

/// RSI and MACD series aligned index-for-index with the input bars.
///
/// Warm-up entries are `NaN`. When the input is shorter than an indicator's
/// minimum history the whole series for that indicator is `NaN`.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSet {
    pub rsi: Vec<f64>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub(crate) rsi_required: usize,
    pub(crate) macd_required: usize,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }

    pub fn latest_rsi(&self) -> Result<f64, IndicatorError> {
        self.latest(IndicatorKind::Rsi, &self.rsi, self.rsi_required)
    }

    pub fn latest_macd(&self) -> Result<f64, IndicatorError> {
        self.latest(IndicatorKind::Macd, &self.macd, self.macd_required)
    }

    pub fn latest_macd_signal(&self) -> Result<f64, IndicatorError> {
        self.latest(IndicatorKind::MacdSignal, &self.macd_signal, self.macd_required)
    }

    fn latest(
        &self,
        indicator: IndicatorKind,
        series: &[f64],
        required: usize,
    ) -> Result<f64, IndicatorError> {
        math::last_defined(series).ok_or(IndicatorError::InsufficientHistory {
            indicator,
            required,
            available: series.len(),
        })
    }
}
