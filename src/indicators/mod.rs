//! Technical indicators over daily closes: RSI and MACD.

pub mod calculator;
pub mod error;

pub mod momentum;

pub use calculator::*;
pub use error::IndicatorError;
