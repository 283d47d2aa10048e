//! Scan loop: evaluate every symbol on each market-hours tick, announce the
//! results, and restart the loop if it dies.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::{ConfigError, ScannerConfig};
use crate::core::scheduler::MarketHours;
use crate::metrics::Metrics;
use crate::models::signal::Decision;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::Notifier;
use crate::signals::engine::SignalEvaluator;

/// Outcome of one pass over the symbol list.
#[derive(Debug, Clone, Default)]
pub struct TickSummary {
    pub decisions: Vec<Decision>,
}

impl TickSummary {
    pub fn evaluated(&self) -> usize {
        self.decisions.len()
    }

    pub fn recommended(&self) -> Vec<&str> {
        self.decisions
            .iter()
            .filter(|d| d.recommended)
            .map(|d| d.symbol.as_str())
            .collect()
    }

    pub fn unavailable(&self) -> usize {
        self.decisions.iter().filter(|d| !d.is_available()).count()
    }
}

pub struct ScannerRuntime {
    symbols: Vec<String>,
    hours: MarketHours,
    evaluator: SignalEvaluator,
    provider: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn Notifier>,
    metrics: Option<Arc<Metrics>>,
    symbol_pacing: Duration,
    restart_delay: Duration,
    run_on_startup: bool,
}

impl ScannerRuntime {
    pub fn new(
        config: &ScannerConfig,
        provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            symbols: config.symbols.clone(),
            hours: MarketHours::from_config(config),
            evaluator: SignalEvaluator::new(config.engine.clone())?,
            provider,
            notifier,
            metrics: None,
            symbol_pacing: config.symbol_pacing,
            restart_delay: config.restart_delay,
            run_on_startup: config.run_on_startup,
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn hours(&self) -> &MarketHours {
        &self.hours
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Evaluate every symbol once, sequentially, as of `as_of`.
    pub async fn tick(&self, as_of: NaiveDate) -> TickSummary {
        let started = Instant::now();
        self.notifier.message("Recommended Stocks to Buy Today:").await;

        let mut summary = TickSummary::default();
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 && !self.symbol_pacing.is_zero() {
                tokio::time::sleep(self.symbol_pacing).await;
            }

            let decision = self
                .evaluator
                .evaluate(self.provider.as_ref(), symbol, as_of)
                .await;

            let shown = decision.rounded();
            info!(
                symbol = %symbol,
                recommended = shown.recommended,
                available = shown.is_available(),
                current_price = ?shown.current_price,
                rsi = ?shown.rsi_latest,
                macd = ?shown.macd_latest,
                "{} {}",
                symbol,
                if shown.recommended { "recommended" } else { "not recommended" }
            );

            if let Some(metrics) = &self.metrics {
                metrics.record_decision(&decision);
            }
            self.notifier.announce(&decision).await;
            summary.decisions.push(decision);
        }

        if let Some(metrics) = &self.metrics {
            metrics.ticks_total.inc();
            metrics
                .tick_duration_seconds
                .observe(started.elapsed().as_secs_f64());
            metrics.last_tick_timestamp_seconds.set(Utc::now().timestamp());
        }

        info!(
            evaluated = summary.evaluated(),
            recommended = ?summary.recommended(),
            unavailable = summary.unavailable(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tick complete"
        );
        summary
    }

    /// Poll on the market-hours schedule until `shutdown` flips to `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut is_first_tick = true;

        loop {
            if *shutdown.borrow() {
                return;
            }

            let now = Utc::now();
            let next = self.hours.next_tick(now, is_first_tick, self.run_on_startup);
            let wait = (next - now).to_std().unwrap_or_default();
            if !wait.is_zero() {
                info!(
                    next_run = %self.hours.format_local(next),
                    "waiting {}s until next run",
                    wait.as_secs()
                );
                tokio::select! {
                    _ = tokio::time::sleep(wait) => {}
                    _ = shutdown_requested(&mut shutdown) => return,
                }
            }

            let now = Utc::now();
            let forced = is_first_tick && self.run_on_startup;
            is_first_tick = false;
            if !forced && !self.hours.is_open(now) {
                continue;
            }

            self.tick(self.hours.session_date(now)).await;

            let upcoming = self.hours.next_run_time(Utc::now());
            self.notifier
                .message(&format!("\nNext Run Time: {}", self.hours.format_local(upcoming)))
                .await;
        }
    }

    /// Run the scan loop in a task and restart it after `restart_delay`
    /// whenever it panics or exits without a shutdown request.
    pub async fn supervise(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        loop {
            let runtime = self.clone();
            let rx = shutdown.clone();
            let result = tokio::spawn(async move { runtime.run(rx).await }).await;

            if *shutdown.borrow() {
                info!("scanner stopped");
                return;
            }

            match result {
                Ok(()) => warn!("scan loop exited unexpectedly"),
                Err(e) if e.is_panic() => error!(error = %e, "scan loop panicked"),
                Err(e) => error!(error = %e, "scan loop task failed"),
            }
            if let Some(metrics) = &self.metrics {
                metrics.restarts_total.inc();
            }

            warn!(
                delay_secs = self.restart_delay.as_secs(),
                "restarting the scanner in {} seconds",
                self.restart_delay.as_secs()
            );
            tokio::select! {
                _ = tokio::time::sleep(self.restart_delay) => {}
                _ = shutdown_requested(&mut shutdown) => {
                    info!("scanner stopped");
                    return;
                }
            }
        }
    }
}

/// Resolves once `true` is published or the sender is dropped. Other values
/// sent on the channel are ignored.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
