//! Unit tests for decisions

use tickerwatch::models::signal::{Decision, DecisionStatus};

#[test]
fn test_unavailable_decision_has_no_numbers() {
    let d = Decision::unavailable("VTI", "no data available for VTI");
    assert!(!d.recommended);
    assert!(!d.is_available());
    assert_eq!(
        d.status,
        DecisionStatus::DataUnavailable {
            reason: "no data available for VTI".to_string()
        }
    );
    for v in [
        d.close_price,
        d.open_price,
        d.current_price,
        d.current_volume,
        d.average_volume,
        d.rsi_latest,
        d.macd_latest,
        d.macd_signal_latest,
    ] {
        assert_eq!(v, None);
    }
}

#[test]
fn test_rounded_keeps_two_decimals() {
    let mut d = Decision::unavailable("VGT", "");
    d.status = DecisionStatus::Evaluated;
    d.current_price = Some(101.23789);
    d.rsi_latest = Some(61.005);
    d.macd_latest = Some(-0.4449);

    let r = d.rounded();
    assert_eq!(r.current_price, Some(101.24));
    assert_eq!(r.macd_latest, Some(-0.44));
    assert_eq!(r.open_price, None);
    assert_eq!(d.current_price, Some(101.23789));
}

#[test]
fn test_decision_serializes_status_tag() {
    let d = Decision::unavailable("SPMD", "timeout");
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["status"]["status"], "data_unavailable");
    assert_eq!(json["status"]["reason"], "timeout");
    assert!(json["current_price"].is_null());
}
