//! Unit tests for the market-hours calendar

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::US::Eastern;
use std::time::Duration;
use tickerwatch::core::scheduler::{next_trading_day, MarketHours};

fn hours() -> MarketHours {
    MarketHours::new(
        Eastern,
        NaiveTime::from_hms_opt(10, 15, 0).unwrap(),
        NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        Duration::from_secs(30),
    )
}

/// Wall-clock time in New York.
fn ny(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Eastern
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_trading_days() {
    assert!(MarketHours::is_trading_day(date(2026, 10, 19)));
    assert!(MarketHours::is_trading_day(date(2026, 10, 23)));
    assert!(!MarketHours::is_trading_day(date(2026, 10, 17)));
    assert!(!MarketHours::is_trading_day(date(2026, 10, 18)));

    assert_eq!(next_trading_day(date(2026, 10, 23)), date(2026, 10, 26));
    assert_eq!(next_trading_day(date(2026, 10, 17)), date(2026, 10, 19));
    assert_eq!(next_trading_day(date(2026, 10, 19)), date(2026, 10, 20));
}

#[test]
fn test_is_open() {
    let hours = hours();
    assert!(!hours.is_open(ny(2026, 10, 19, 10, 14)));
    assert!(hours.is_open(ny(2026, 10, 19, 10, 15)));
    assert!(hours.is_open(ny(2026, 10, 19, 15, 59)));
    assert!(!hours.is_open(ny(2026, 10, 19, 16, 0)));
    assert!(!hours.is_open(ny(2026, 10, 17, 12, 0)));
}

#[test]
fn test_before_open_waits_for_open() {
    let hours = hours();
    assert_eq!(
        hours.next_run_time(ny(2026, 10, 19, 8, 0)),
        ny(2026, 10, 19, 10, 15)
    );
}

#[test]
fn test_during_session_polls() {
    let hours = hours();
    let now = ny(2026, 10, 19, 11, 0);
    assert_eq!(
        hours.next_run_time(now),
        now + chrono::Duration::seconds(30)
    );
}

#[test]
fn test_after_close_waits_for_next_weekday() {
    let hours = hours();
    assert_eq!(
        hours.next_run_time(ny(2026, 10, 19, 16, 30)),
        ny(2026, 10, 20, 10, 15)
    );
    assert_eq!(
        hours.next_run_time(ny(2026, 10, 23, 17, 0)),
        ny(2026, 10, 26, 10, 15)
    );
}

#[test]
fn test_weekend_waits_for_monday() {
    let hours = hours();
    assert_eq!(
        hours.next_run_time(ny(2026, 10, 17, 12, 0)),
        ny(2026, 10, 19, 10, 15)
    );
}

#[test]
fn test_open_follows_daylight_saving_change() {
    let hours = hours();
    let next = hours.next_run_time(ny(2026, 10, 30, 18, 0));
    assert_eq!(next, Utc.with_ymd_and_hms(2026, 11, 2, 15, 15, 0).unwrap());

    let before = hours.next_run_time(ny(2026, 10, 19, 9, 0));
    assert_eq!(before, Utc.with_ymd_and_hms(2026, 10, 19, 14, 15, 0).unwrap());
}

#[test]
fn test_first_tick_runs_immediately_when_requested() {
    let hours = hours();
    let now = ny(2026, 10, 17, 12, 0);
    assert_eq!(hours.next_tick(now, true, true), now);
    assert_eq!(hours.next_tick(now, true, false), ny(2026, 10, 19, 10, 15));
    assert_eq!(hours.next_tick(now, false, true), ny(2026, 10, 19, 10, 15));
}

#[test]
fn test_session_date_uses_market_time_zone() {
    let hours = hours();
    let late_evening = Utc.with_ymd_and_hms(2026, 10, 20, 2, 0, 0).unwrap();
    assert_eq!(hours.session_date(late_evening), date(2026, 10, 19));
}

#[test]
fn test_format_local() {
    let hours = hours();
    assert_eq!(
        hours.format_local(ny(2026, 10, 19, 10, 15)),
        "Monday, October 19, 2026, 10:15:00 AM EDT"
    );
}
