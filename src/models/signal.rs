use serde::{Deserialize, Serialize};

use crate::common::math::round_to;
use crate::models::bar::Quote;

/// Price/volume context for "now", taken from the live quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    pub current_price: f64,
    pub current_open_price: f64,
    pub current_volume: f64,
}

impl From<&Quote> for MarketContext {
    fn from(quote: &Quote) -> Self {
        Self {
            current_price: quote.price,
            current_open_price: quote.open,
            current_volume: quote.volume,
        }
    }
}

/// The individual tests that make up the buy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    PriceAboveOpen,
    PriceAbovePreviousClose,
    VolumeConfirmed,
    RsiAboveThreshold,
    MacdAboveSignal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResult {
    pub condition: Condition,
    pub passed: bool,
    pub detail: String,
}

impl ConditionResult {
    pub fn new(condition: Condition, passed: bool, detail: String) -> Self {
        Self {
            condition,
            passed,
            detail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecisionStatus {
    Evaluated,
    DataUnavailable { reason: String },
}

/// Outcome of evaluating one symbol at one point in time.
///
/// Numeric fields are `None` when the value could not be produced. Values
/// are kept at full precision; use [`Decision::rounded`] for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub symbol: String,
    pub recommended: bool,
    pub status: DecisionStatus,
    pub close_price: Option<f64>,
    pub open_price: Option<f64>,
    pub current_price: Option<f64>,
    pub current_volume: Option<f64>,
    pub average_volume: Option<f64>,
    pub rsi_latest: Option<f64>,
    pub macd_latest: Option<f64>,
    pub macd_signal_latest: Option<f64>,
    #[serde(default)]
    pub conditions: Vec<ConditionResult>,
}

impl Decision {
    /// Skip decision for a symbol whose data could not be fetched.
    pub fn unavailable(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            recommended: false,
            status: DecisionStatus::DataUnavailable {
                reason: reason.into(),
            },
            close_price: None,
            open_price: None,
            current_price: None,
            current_volume: None,
            average_volume: None,
            rsi_latest: None,
            macd_latest: None,
            macd_signal_latest: None,
            conditions: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.status, DecisionStatus::Evaluated)
    }

    /// Copy with every numeric field rounded to 2 decimals.
    pub fn rounded(&self) -> Self {
        let r = |v: Option<f64>| v.map(|x| round_to(x, 2));
        Self {
            close_price: r(self.close_price),
            open_price: r(self.open_price),
            current_price: r(self.current_price),
            current_volume: r(self.current_volume),
            average_volume: r(self.average_volume),
            rsi_latest: r(self.rsi_latest),
            macd_latest: r(self.macd_latest),
            macd_signal_latest: r(self.macd_signal_latest),
            ..self.clone()
        }
    }

    pub fn failed_conditions(&self) -> impl Iterator<Item = &ConditionResult> {
        self.conditions.iter().filter(|c| !c.passed)
    }
}
