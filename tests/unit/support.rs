//! Bar builders shared by the unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use tickerwatch::models::bar::{PriceBar, Series};
use tickerwatch::models::signal::MarketContext;

pub fn day(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 14, 30, 0).unwrap() + Duration::days(i as i64)
}

pub fn bar(i: usize, close: f64, volume: f64) -> PriceBar {
    PriceBar::new(close, close + 0.5, close - 0.5, close, volume, day(i))
}

pub fn series_from_closes(closes: &[f64], volume: f64) -> Series {
    Series::new(
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| bar(i, c, volume))
            .collect(),
    )
}

pub fn flat_series(count: usize, close: f64, volume: f64) -> Series {
    series_from_closes(&vec![close; count], volume)
}

pub fn context(price: f64, open: f64, volume: f64) -> MarketContext {
    MarketContext {
        current_price: price,
        current_open_price: open,
        current_volume: volume,
    }
}
