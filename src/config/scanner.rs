//! Runtime settings for the polling scanner.

use chrono::NaiveTime;
use chrono_tz::Tz;
use std::time::Duration;

use super::{parse_flag, parse_var, ConfigError, EngineConfig};

pub const DEFAULT_SYMBOLS: &[&str] = &["DJT", "VGT", "VOOV", "VOT", "SPMD", "UMDD", "VTI"];
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub symbols: Vec<String>,
    pub engine: EngineConfig,
    pub timezone: Tz,
    pub market_open: NaiveTime,
    pub market_close: NaiveTime,
    pub poll_interval: Duration,
    /// Pause between two symbols within a tick.
    pub symbol_pacing: Duration,
    /// Delay before the supervisor restarts a failed run loop.
    pub restart_delay: Duration,
    /// Evaluate once immediately at startup, even outside market hours.
    pub run_on_startup: bool,
    pub speech_enabled: bool,
    pub speech_command: String,
    pub yahoo_base_url: String,
    pub http_timeout: Duration,
    pub metrics_port: Option<u16>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            engine: EngineConfig::default(),
            timezone: chrono_tz::US::Eastern,
            market_open: NaiveTime::from_hms_opt(10, 15, 0).unwrap_or(NaiveTime::MIN),
            market_close: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or(NaiveTime::MIN),
            poll_interval: Duration::from_secs(30),
            symbol_pacing: Duration::from_millis(500),
            restart_delay: Duration::from_secs(5),
            run_on_startup: false,
            speech_enabled: true,
            speech_command: "espeak".to_string(),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            metrics_port: None,
        }
    }
}

impl ScannerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.symbols.is_empty() {
            return Err(ConfigError::invalid("symbols", "must list at least one symbol"));
        }
        if self.market_open >= self.market_close {
            return Err(ConfigError::invalid(
                "market_open",
                format!(
                    "must be before market_close ({} >= {})",
                    self.market_open, self.market_close
                ),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::invalid("poll_interval", "must be greater than zero"));
        }
        Ok(())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            engine: EngineConfig::from_lookup(&lookup)?,
            ..Self::default()
        };

        if let Some(raw) = lookup("SCANNER_SYMBOLS") {
            let symbols = parse_symbols(&raw);
            if !symbols.is_empty() {
                config.symbols = symbols;
            }
        }
        if let Some(name) = lookup("SCANNER_TIMEZONE") {
            config.timezone = name
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::UnknownTimezone(name.clone()))?;
        }
        if let Some(t) = parse_time(&lookup, "SCANNER_MARKET_OPEN")? {
            config.market_open = t;
        }
        if let Some(t) = parse_time(&lookup, "SCANNER_MARKET_CLOSE")? {
            config.market_close = t;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SCANNER_POLL_INTERVAL_SECONDS")? {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "SCANNER_SYMBOL_PACING_MS")? {
            config.symbol_pacing = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SCANNER_RESTART_DELAY_SECONDS")? {
            config.restart_delay = Duration::from_secs(secs);
        }
        if let Some(v) = parse_flag(&lookup, "SCANNER_RUN_ON_STARTUP")? {
            config.run_on_startup = v;
        }
        if let Some(v) = parse_flag(&lookup, "SCANNER_SPEECH")? {
            config.speech_enabled = v;
        }
        if let Some(cmd) = lookup("SCANNER_SPEECH_COMMAND").filter(|c| !c.trim().is_empty()) {
            config.speech_command = cmd.trim().to_string();
        }
        if let Some(url) = lookup("YAHOO_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.yahoo_base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SCANNER_HTTP_TIMEOUT_SECONDS")? {
            config.http_timeout = Duration::from_secs(secs);
        }
        config.metrics_port = parse_var(&lookup, "SCANNER_METRICS_PORT")?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Comma separated, upper-cased, duplicates dropped keeping first occurrence.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in raw.split(',').map(|s| s.trim().to_ascii_uppercase()) {
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

fn parse_time<F>(lookup: &F, name: &str) -> Result<Option<NaiveTime>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .map(Some)
            .map_err(|_| ConfigError::Parse {
                var: name.to_string(),
                value: raw,
            }),
    }
}
