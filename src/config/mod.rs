//! Configuration: the engine's rule parameters and the scanner runtime
//! settings, both read from the environment (optionally via `.env`).

pub mod engine;
pub mod error;
pub mod scanner;

pub use engine::{EngineConfig, Profile};
pub use error::ConfigError;
pub use scanner::ScannerConfig;

use std::env;
use std::str::FromStr;

/// Deployment environment (`APP_ENV`), defaults to `sandbox`
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Parse an optional variable through `lookup`, rejecting unparsable values.
pub(crate) fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Parse {
                var: name.to_string(),
                value: raw,
            }),
    }
}

/// Boolean flags accept `1/0`, `true/false`, `yes/no`, `on/off`.
pub(crate) fn parse_flag<F>(lookup: &F, name: &str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::Parse {
                var: name.to_string(),
                value: raw,
            }),
        },
    }
}
