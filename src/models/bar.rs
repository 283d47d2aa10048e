use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV sample for a fixed period (one trading day for the scanner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Bars ordered oldest first with unique timestamps.
///
/// Serialized as a plain array; deserializing goes through [`Series::new`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct Series {
    bars: Vec<PriceBar>,
}

impl Series {
    /// Sorts by timestamp; when two bars share a timestamp the one supplied
    /// last wins.
    pub fn new(bars: Vec<PriceBar>) -> Self {
        let mut bars: Vec<(usize, PriceBar)> = bars.into_iter().enumerate().collect();
        bars.sort_by(|(ia, a), (ib, b)| a.timestamp.cmp(&b.timestamp).then(ia.cmp(ib)));

        let mut out: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for (_, bar) in bars {
            match out.last_mut() {
                Some(last) if last.timestamp == bar.timestamp => *last = bar,
                _ => out.push(bar),
            }
        }
        Self { bars: out }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Mean volume over every bar in the series.
    pub fn average_volume(&self) -> Option<f64> {
        crate::common::math::mean(&self.volumes())
    }
}

impl From<Vec<PriceBar>> for Series {
    fn from(bars: Vec<PriceBar>) -> Self {
        Self::new(bars)
    }
}

impl From<Series> for Vec<PriceBar> {
    fn from(series: Series) -> Self {
        series.bars
    }
}

/// Live quote for a symbol as reported by the market data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub open: f64,
    pub close: f64,
    pub price: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}
