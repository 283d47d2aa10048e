//! Market-hours calendar: when the next scan should happen.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;

use crate::config::ScannerConfig;

/// Weekday trading session in a fixed time zone, polled every
/// `poll_interval` while open.
#[derive(Debug, Clone)]
pub struct MarketHours {
    timezone: Tz,
    open: NaiveTime,
    close: NaiveTime,
    poll_interval: Duration,
}

impl MarketHours {
    pub fn new(
        timezone: Tz,
        open: NaiveTime,
        close: NaiveTime,
        poll_interval: std::time::Duration,
    ) -> Self {
        Self {
            timezone,
            open,
            close,
            poll_interval: Duration::from_std(poll_interval)
                .unwrap_or_else(|_| Duration::seconds(30)),
        }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(
            config.timezone,
            config.market_open,
            config.market_close,
            config.poll_interval,
        )
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn local(&self, now: DateTime<Utc>) -> DateTime<Tz> {
        now.with_timezone(&self.timezone)
    }

    /// Calendar date of `now` in the market's time zone.
    pub fn session_date(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local(now).date_naive()
    }

    pub fn is_trading_day(date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        let local = self.local(now);
        let time = local.time();
        Self::is_trading_day(local.date_naive()) && time >= self.open && time < self.close
    }

    /// Next scheduled scan after `now`.
    ///
    /// - Weekend: next Monday at the open.
    /// - Weekday before the open: today at the open.
    /// - During the session: `now + poll_interval`.
    /// - After the close: the next weekday at the open.
    pub fn next_run_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local = self.local(now);
        let today = local.date_naive();
        let time = local.time();

        if !Self::is_trading_day(today) {
            self.open_on(next_trading_day(today))
        } else if time < self.open {
            self.open_on(today)
        } else if time < self.close {
            now + self.poll_interval
        } else {
            self.open_on(next_trading_day(today))
        }
    }

    /// Like [`next_run_time`](Self::next_run_time), but the first tick runs
    /// immediately when `run_on_startup` is set.
    pub fn next_tick(
        &self,
        now: DateTime<Utc>,
        is_first_tick: bool,
        run_on_startup: bool,
    ) -> DateTime<Utc> {
        if is_first_tick && run_on_startup {
            now
        } else {
            self.next_run_time(now)
        }
    }

    /// Human readable local time, e.g. `Monday, October 19, 2026, 10:15:00 AM EDT`.
    pub fn format_local(&self, at: DateTime<Utc>) -> String {
        self.local(at).format("%A, %B %d, %Y, %I:%M:%S %p %Z").to_string()
    }

    fn open_on(&self, date: NaiveDate) -> DateTime<Utc> {
        let naive = date.and_time(self.open);
        self.timezone
            .from_local_datetime(&naive)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            // Only reachable when the open falls inside a DST gap.
            .unwrap_or_else(|| shift_past_gap(&self.timezone, naive))
    }
}

/// First weekday strictly after `date`.
pub fn next_trading_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while !MarketHours::is_trading_day(next) {
        next += Duration::days(1);
    }
    next
}

fn shift_past_gap(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    let shifted = naive + Duration::hours(1);
    tz.from_local_datetime(&shifted)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| shifted.and_utc())
}
