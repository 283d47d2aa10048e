//! Prometheus metrics for the scanner.

use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

use crate::models::signal::Decision;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    /// Labelled by `outcome`: recommended, not_recommended, unavailable.
    pub evaluations_total: IntCounterVec,
    pub ticks_total: IntCounter,
    pub tick_duration_seconds: Histogram,
    pub last_tick_timestamp_seconds: IntGauge,
    pub restarts_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;
        let evaluations_total = IntCounterVec::new(
            Opts::new("signal_evaluations_total", "Symbol evaluations by outcome"),
            &["outcome"],
        )?;
        let ticks_total = IntCounter::new("scanner_ticks_total", "Completed scan ticks")?;
        let tick_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("scanner_tick_duration_seconds", "Time to scan every symbol")
                .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        )?;
        let last_tick_timestamp_seconds = IntGauge::new(
            "scanner_last_tick_timestamp_seconds",
            "Unix time of the last completed tick",
        )?;
        let restarts_total =
            IntCounter::new("scanner_restarts_total", "Run loop restarts after failure")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(evaluations_total.clone()))?;
        registry.register(Box::new(ticks_total.clone()))?;
        registry.register(Box::new(tick_duration_seconds.clone()))?;
        registry.register(Box::new(last_tick_timestamp_seconds.clone()))?;
        registry.register(Box::new(restarts_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            evaluations_total,
            ticks_total,
            tick_duration_seconds,
            last_tick_timestamp_seconds,
            restarts_total,
        })
    }

    pub fn record_decision(&self, decision: &Decision) {
        let outcome = if !decision.is_available() {
            "unavailable"
        } else if decision.recommended {
            "recommended"
        } else {
            "not_recommended"
        };
        self.evaluations_total.with_label_values(&[outcome]).inc();
    }

    /// Text exposition format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}
