//! Momentum buy-signal scanner for a small basket of exchange-traded symbols.
//!
//! The decision core lives in [`indicators`] (RSI / MACD series) and
//! [`signals`] (the buy rule). Everything else is plumbing around it:
//! market data, notifiers, the market-hours scheduler and the runtime loop.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
