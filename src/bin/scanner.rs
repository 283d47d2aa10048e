//! Tickerwatch Scanner
//!
//! Polls the configured symbols during market hours and announces buy
//! recommendations on the console and through text-to-speech.
//!
//! Flags:
//! - `--once`: run a single tick immediately and exit
//! - `--dry-run`: use generated in-memory market data instead of Yahoo

use chrono::{Duration as ChronoDuration, NaiveDate, NaiveTime, Utc};
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tickerwatch::config::{get_environment, ScannerConfig};
use tickerwatch::core::http::start_server;
use tickerwatch::core::runtime::ScannerRuntime;
use tickerwatch::logging;
use tickerwatch::metrics::Metrics;
use tickerwatch::models::bar::{PriceBar, Quote};
use tickerwatch::services::market_data::{InMemoryMarketDataProvider, MarketDataProvider};
use tickerwatch::services::notifier::{ConsoleNotifier, Notifier, NotifierSet, SpeechNotifier};
use tickerwatch::services::yahoo::YahooMarketDataProvider;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let once = args.iter().any(|a| a == "--once");
    let dry_run = args.iter().any(|a| a == "--dry-run");

    let config = ScannerConfig::from_env().map_err(|e| {
        error!(error = %e, "invalid configuration");
        e
    })?;

    info!("Starting Tickerwatch Scanner");
    info!(environment = %get_environment(), "Environment");
    info!(
        symbols = ?config.symbols,
        rsi_threshold = config.engine.rsi_threshold,
        volume_ratio = config.engine.volume_ratio_threshold,
        lookback_days = config.engine.lookback_window_days,
        macd_crossover = config.engine.require_macd_crossover,
        "Engine configuration"
    );

    let metrics = Arc::new(Metrics::new()?);
    if let Some(port) = config.metrics_port {
        let metrics = metrics.clone();
        tokio::spawn(async move {
            if let Err(e) = start_server(port, metrics).await {
                error!(error = %e, "metrics server failed");
            }
        });
    }

    let provider: Arc<dyn MarketDataProvider> = if dry_run {
        info!("Dry run: using generated market data");
        Arc::new(demo_provider(&config.symbols, Utc::now().date_naive()).await)
    } else {
        Arc::new(YahooMarketDataProvider::new(
            &config.yahoo_base_url,
            config.http_timeout,
        )?)
    };

    let mut notifiers = NotifierSet::new().with(Arc::new(ConsoleNotifier));
    if config.speech_enabled && !once {
        notifiers = notifiers.with(Arc::new(SpeechNotifier::new(config.speech_command.clone())));
    }
    let notifier: Arc<dyn Notifier> = Arc::new(notifiers);

    let runtime = Arc::new(
        ScannerRuntime::new(&config, provider, notifier.clone())?.with_metrics(metrics),
    );

    let hours = runtime.hours();
    let open = config.market_open.format("%-I:%M %p");
    let close = config.market_close.format("%-I:%M %p");
    println!();
    println!("Stock Market Buy Signal Scanner");
    println!();
    println!("Date and Time: {}", hours.format_local(Utc::now()));
    println!();
    println!(
        "This program runs from {} until {}, {}, Monday - Friday.",
        open,
        close,
        hours.timezone()
    );
    println!();

    if once {
        runtime.tick(hours.session_date(Utc::now())).await;
        return Ok(());
    }

    notifier
        .message(&format!(
            "Remember to not buy before {} and do not buy before I recommend to buy.",
            open
        ))
        .await;
    notifier
        .message(&format!(
            "This program will begin in {} seconds.",
            config.poll_interval.as_secs()
        ))
        .await;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let supervisor = tokio::spawn(runtime.clone().supervise(shutdown_rx));

    info!("Scanner started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down scanner...");
    let _ = shutdown_tx.send(true);
    supervisor.await?;

    Ok(())
}

/// Ninety days of gently rising bars per symbol and a quote above the last
/// close.
async fn demo_provider(symbols: &[String], today: NaiveDate) -> InMemoryMarketDataProvider {
    let provider = InMemoryMarketDataProvider::new();
    for (n, symbol) in symbols.iter().enumerate() {
        let base = 50.0 + 25.0 * n as f64;
        let bars: Vec<PriceBar> = (1..=90)
            .rev()
            .enumerate()
            .map(|(i, days_ago)| {
                let close = base + i as f64 * 0.2 + if i % 3 == 0 { -0.3 } else { 0.0 };
                let ts = (today - ChronoDuration::days(days_ago))
                    .and_time(NaiveTime::MIN)
                    .and_utc();
                PriceBar::new(close - 0.1, close + 0.4, close - 0.5, close, 1_000_000.0, ts)
            })
            .collect();
        let last = bars.last().map(|b| b.close).unwrap_or(base);
        provider.set_bars(symbol, bars).await;
        provider
            .set_quote(
                symbol,
                Quote {
                    open: last,
                    close: last + 0.5,
                    price: last + 0.5,
                    volume: 950_000.0,
                    timestamp: Utc::now(),
                },
            )
            .await;
    }
    provider
}
