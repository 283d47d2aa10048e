//! RSI (Relative Strength Index) indicator

use crate::models::bar::Series;

/// Number of bars needed before the first RSI value is defined.
pub fn rsi_min_bars(period: u32) -> usize {
    period as usize + 1
}

/// RSI series over closing prices using Wilder's smoothing.
///
/// RSI = 100 - (100 / (1 + RS)), RS = Average Gain / Average Loss
///
/// The averages are seeded with the simple mean of the first `period` deltas
/// and then smoothed as `(prev * (period - 1) + x) / period`. Index `period`
/// holds the first value; everything before it is `NaN`.
pub fn rsi_series(closes: &[f64], period: u32) -> Vec<f64> {
    let period = period as usize;
    let mut out = vec![f64::NAN; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return out;
    }

    let (mut avg_gain, mut avg_loss) = closes[..=period]
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0_f64, 0.0_f64), |(g, l), d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l - d)
            }
        });
    let p = period as f64;
    avg_gain /= p;
    avg_loss /= p;
    out[period] = rsi_from_averages(avg_gain, avg_loss);

    for i in period + 1..closes.len() {
        let change = closes[i] - closes[i - 1];
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };
        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;
        out[i] = rsi_from_averages(avg_gain, avg_loss);
    }

    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Calculate the RSI series for a set of bars
pub fn calculate_rsi(series: &Series, period: u32) -> Vec<f64> {
    rsi_series(&series.closes(), period)
}
