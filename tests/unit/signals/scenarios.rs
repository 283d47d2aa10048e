//! Market shapes run through the full decision path

use tickerwatch::config::{EngineConfig, Profile};
use tickerwatch::models::signal::Condition;
use tickerwatch::signals::SignalEvaluator;

use crate::support::{context, series_from_closes};

fn closes(n: usize, f: impl Fn(f64) -> f64) -> Vec<f64> {
    (0..n).map(|i| f(i as f64)).collect()
}

#[test]
fn test_choppy_uptrend_is_recommended() {
    let closes = closes(60, |i| 100.0 + 0.5 * i + if i as usize % 4 == 0 { -0.6 } else { 0.0 });
    let series = series_from_closes(&closes, 2_000_000.0);
    let last = *closes.last().unwrap();

    let evaluator = SignalEvaluator::new(EngineConfig::default()).unwrap();
    let decision = evaluator.decide("VGT", &series, &context(last + 1.0, last, 1_900_000.0));

    assert!(decision.recommended, "{:?}", decision.conditions);
    assert!(decision.rsi_latest.unwrap() > 55.0);
}

#[test]
fn test_downtrend_fails_on_rsi() {
    let closes = closes(60, |i| 150.0 - 0.5 * i + if i as usize % 4 == 0 { 0.6 } else { 0.0 });
    let series = series_from_closes(&closes, 2_000_000.0);
    let last = *closes.last().unwrap();

    let evaluator = SignalEvaluator::new(EngineConfig::default()).unwrap();
    let decision = evaluator.decide("VOT", &series, &context(last + 1.0, last, 2_000_000.0));

    assert!(!decision.recommended);
    let failed: Vec<_> = decision.failed_conditions().map(|c| c.condition).collect();
    assert_eq!(failed, vec![Condition::RsiAboveThreshold]);
}

#[test]
fn test_accelerating_trend_passes_crossover_profile() {
    let closes = closes(120, |i| 100.0 + 0.01 * i * i);
    let series = series_from_closes(&closes, 1_000_000.0);
    let last = *closes.last().unwrap();

    let evaluator = SignalEvaluator::new(Profile::Crossover.engine_config()).unwrap();
    let decision = evaluator.decide("SPMD", &series, &context(last + 2.0, last, 1_000_000.0));

    assert!(decision.recommended, "{:?}", decision.conditions);
    assert!(decision.macd_latest.unwrap() > decision.macd_signal_latest.unwrap());
}

#[test]
fn test_fading_trend_fails_crossover_profile() {
    let closes = closes(120, |i| 300.0 - 0.01 * i * i);
    let series = series_from_closes(&closes, 1_000_000.0);
    let last = *closes.last().unwrap();

    let evaluator = SignalEvaluator::new(Profile::Crossover.engine_config()).unwrap();
    let decision = evaluator.decide("UMDD", &series, &context(last + 2.0, last, 1_000_000.0));

    assert!(!decision.recommended);
    assert!(decision
        .failed_conditions()
        .any(|c| c.condition == Condition::MacdAboveSignal));
}

#[test]
fn test_short_profile_never_recommends_on_a_week_of_bars() {
    let closes = closes(6, |i| 100.0 + i);
    let series = series_from_closes(&closes, 1_000_000.0);

    let evaluator = SignalEvaluator::new(Profile::Short.engine_config()).unwrap();
    let decision = evaluator.decide("DJT", &series, &context(110.0, 100.0, 5_000_000.0));

    assert!(decision.is_available());
    assert!(!decision.recommended);
}
