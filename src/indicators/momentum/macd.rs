//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::bar::Series;

/// MACD line and signal line, both aligned with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

impl MacdSeries {
    fn undefined(len: usize) -> Self {
        Self {
            macd: vec![f64::NAN; len],
            signal: vec![f64::NAN; len],
        }
    }

    /// MACD - Signal, `NaN` wherever either side is undefined.
    pub fn histogram(&self) -> Vec<f64> {
        self.macd
            .iter()
            .zip(&self.signal)
            .map(|(m, s)| m - s)
            .collect()
    }
}

/// Number of bars needed before the MACD signal line is defined.
pub fn macd_min_bars(slow_period: u32, signal_period: u32) -> usize {
    slow_period as usize + signal_period as usize
}

/// MACD over closing prices.
///
/// MACD = EMA(fast) - EMA(slow), defined from index `slow - 1`.
/// Signal = EMA(signal) of the MACD values after the slow seed bar, so it is
/// first defined at index `slow + signal - 1`.
///
/// With fewer than `slow + signal` closes, or when `fast >= slow`, both series
/// are entirely `NaN`.
pub fn macd_series(
    closes: &[f64],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> MacdSeries {
    let len = closes.len();
    if fast_period == 0
        || slow_period == 0
        || signal_period == 0
        || fast_period >= slow_period
        || len < macd_min_bars(slow_period, signal_period)
    {
        return MacdSeries::undefined(len);
    }

    let fast = math::ema_series(closes, fast_period as usize);
    let slow = math::ema_series(closes, slow_period as usize);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();

    // Signal line starts from the first MACD value computed past the seed.
    let start = slow_period as usize;
    let mut signal = vec![f64::NAN; len];
    for (offset, value) in math::ema_series(&macd[start..], signal_period as usize)
        .into_iter()
        .enumerate()
    {
        signal[start + offset] = value;
    }

    MacdSeries { macd, signal }
}

/// Calculate MACD for a set of bars
pub fn calculate_macd(
    series: &Series,
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> MacdSeries {
    macd_series(&series.closes(), fast_period, slow_period, signal_period)
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(series: &Series) -> MacdSeries {
    calculate_macd(series, 12, 26, 9)
}

/// True when the MACD line sits above its signal line on the latest bar.
pub fn is_bullish_crossover(macd: &MacdSeries) -> Option<bool> {
    let m = math::last_defined(&macd.macd)?;
    let s = math::last_defined(&macd.signal)?;
    Some(m > s)
}
