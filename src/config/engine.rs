//! Rule parameters for the signal engine and the named presets that cover
//! the scanner variants seen in deployment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{parse_flag, parse_var, ConfigError};
use crate::indicators::IndicatorParams;

/// Upper bound for `lookback_window_days` (about ten years of calendar days).
pub const MAX_LOOKBACK_DAYS: u32 = 3650;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub rsi_period: u32,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
    /// Latest RSI must be strictly above this.
    pub rsi_threshold: f64,
    /// Current volume must be at least this fraction of the average volume.
    pub volume_ratio_threshold: f64,
    pub require_macd_crossover: bool,
    /// Calendar days of history fetched per evaluation.
    pub lookback_window_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Profile::Standard.engine_config()
    }
}

impl EngineConfig {
    pub fn indicator_params(&self) -> IndicatorParams {
        IndicatorParams {
            rsi_period: self.rsi_period,
            macd_fast: self.macd_fast,
            macd_slow: self.macd_slow,
            macd_signal: self.macd_signal,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("lookback_window_days", self.lookback_window_days),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid(field, "must be at least 1"));
            }
        }
        if self.lookback_window_days > MAX_LOOKBACK_DAYS {
            return Err(ConfigError::invalid(
                "lookback_window_days",
                format!(
                    "must be at most {}, got {}",
                    MAX_LOOKBACK_DAYS, self.lookback_window_days
                ),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::invalid(
                "macd_fast",
                format!(
                    "must be below macd_slow ({} >= {})",
                    self.macd_fast, self.macd_slow
                ),
            ));
        }
        if !(0.0..=100.0).contains(&self.rsi_threshold) {
            return Err(ConfigError::invalid(
                "rsi_threshold",
                format!("must be within 0..=100, got {}", self.rsi_threshold),
            ));
        }
        if !self.volume_ratio_threshold.is_finite() || self.volume_ratio_threshold < 0.0 {
            return Err(ConfigError::invalid(
                "volume_ratio_threshold",
                format!(
                    "must be a non-negative number, got {}",
                    self.volume_ratio_threshold
                ),
            ));
        }
        Ok(())
    }

    /// Start from `SCANNER_PROFILE` and apply individual overrides.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = match lookup("SCANNER_PROFILE") {
            Some(name) if !name.trim().is_empty() => name.parse::<Profile>()?,
            _ => Profile::default(),
        };
        let mut config = profile.engine_config();

        if let Some(v) = parse_var(&lookup, "SCANNER_RSI_PERIOD")? {
            config.rsi_period = v;
        }
        if let Some(v) = parse_var(&lookup, "SCANNER_MACD_FAST")? {
            config.macd_fast = v;
        }
        if let Some(v) = parse_var(&lookup, "SCANNER_MACD_SLOW")? {
            config.macd_slow = v;
        }
        if let Some(v) = parse_var(&lookup, "SCANNER_MACD_SIGNAL")? {
            config.macd_signal = v;
        }
        if let Some(v) = parse_var(&lookup, "SCANNER_RSI_THRESHOLD")? {
            config.rsi_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, "SCANNER_VOLUME_RATIO")? {
            config.volume_ratio_threshold = v;
        }
        if let Some(v) = parse_flag(&lookup, "SCANNER_REQUIRE_MACD_CROSSOVER")? {
            config.require_macd_crossover = v;
        }
        if let Some(v) = parse_var(&lookup, "SCANNER_LOOKBACK_DAYS")? {
            config.lookback_window_days = v;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Named parameter presets.
///
/// `Standard` is the default. The others reproduce scanner variants that
/// were run side by side with different thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Standard,
    Classic,
    Crossover,
    Short,
}

impl Profile {
    pub fn engine_config(self) -> EngineConfig {
        let base = EngineConfig {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_threshold: 55.0,
            volume_ratio_threshold: 0.9,
            require_macd_crossover: false,
            lookback_window_days: 90,
        };
        match self {
            Profile::Standard => base,
            Profile::Classic => EngineConfig {
                rsi_threshold: 58.0,
                volume_ratio_threshold: 0.25,
                ..base
            },
            Profile::Crossover => EngineConfig {
                require_macd_crossover: true,
                lookback_window_days: 180,
                ..base
            },
            // Eight calendar days never yield enough bars for RSI(14), so
            // this profile never recommends.
            Profile::Short => EngineConfig {
                rsi_threshold: 50.0,
                lookback_window_days: 8,
                ..base
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Profile::Standard => "standard",
            Profile::Classic => "classic",
            Profile::Crossover => "crossover",
            Profile::Short => "short",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "default" => Ok(Profile::Standard),
            "classic" => Ok(Profile::Classic),
            "crossover" | "macd" => Ok(Profile::Crossover),
            "short" => Ok(Profile::Short),
            _ => Err(ConfigError::UnknownProfile(s.to_string())),
        }
    }
}
