//! The boolean buy rule.

use crate::config::EngineConfig;
use crate::indicators::IndicatorError;
use crate::models::signal::{Condition, ConditionResult};

/// Everything the rule looks at for one symbol.
#[derive(Debug, Clone)]
pub struct RuleInputs {
    pub current_price: f64,
    pub current_open_price: f64,
    pub previous_close: f64,
    pub current_volume: f64,
    pub average_volume: f64,
    pub rsi: Result<f64, IndicatorError>,
    pub macd: Result<f64, IndicatorError>,
    pub macd_signal: Result<f64, IndicatorError>,
}

pub struct BuyRule<'a> {
    config: &'a EngineConfig,
}

impl<'a> BuyRule<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Run every condition. The MACD check is only included when the
    /// configuration requires a crossover.
    pub fn check(&self, inputs: &RuleInputs) -> Vec<ConditionResult> {
        let mut results = vec![
            ConditionResult::new(
                Condition::PriceAboveOpen,
                inputs.current_price > inputs.current_open_price,
                format!(
                    "price {:.2} vs open {:.2}",
                    inputs.current_price, inputs.current_open_price
                ),
            ),
            ConditionResult::new(
                Condition::PriceAbovePreviousClose,
                inputs.current_price > inputs.previous_close,
                format!(
                    "price {:.2} vs previous close {:.2}",
                    inputs.current_price, inputs.previous_close
                ),
            ),
            self.volume(inputs),
            self.rsi(inputs),
        ];
        if self.config.require_macd_crossover {
            results.push(self.macd(inputs));
        }
        results
    }

    /// True only when every condition passed. An empty result never passes.
    pub fn passes(results: &[ConditionResult]) -> bool {
        !results.is_empty() && results.iter().all(|r| r.passed)
    }

    fn volume(&self, inputs: &RuleInputs) -> ConditionResult {
        let required = self.config.volume_ratio_threshold * inputs.average_volume;
        ConditionResult::new(
            Condition::VolumeConfirmed,
            inputs.current_volume >= required,
            format!(
                "volume {:.0} vs required {:.0} ({} x average {:.0})",
                inputs.current_volume,
                required,
                self.config.volume_ratio_threshold,
                inputs.average_volume
            ),
        )
    }

    fn rsi(&self, inputs: &RuleInputs) -> ConditionResult {
        let threshold = self.config.rsi_threshold;
        match &inputs.rsi {
            Ok(rsi) => ConditionResult::new(
                Condition::RsiAboveThreshold,
                *rsi > threshold,
                format!("RSI {:.2} vs threshold {:.2}", rsi, threshold),
            ),
            Err(e) => ConditionResult::new(Condition::RsiAboveThreshold, false, e.to_string()),
        }
    }

    fn macd(&self, inputs: &RuleInputs) -> ConditionResult {
        match (&inputs.macd, &inputs.macd_signal) {
            (Ok(macd), Ok(signal)) => ConditionResult::new(
                Condition::MacdAboveSignal,
                macd > signal,
                format!("MACD {:.4} vs signal {:.4}", macd, signal),
            ),
            (Err(e), _) | (_, Err(e)) => {
                ConditionResult::new(Condition::MacdAboveSignal, false, e.to_string())
            }
        }
    }
}
