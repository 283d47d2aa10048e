//! Announcing decisions: console report and spoken alerts.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::models::signal::Decision;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announce the outcome for one symbol.
    async fn announce(&self, decision: &Decision);

    /// Free-form message (startup banner, schedule updates).
    async fn message(&self, text: &str);
}

/// Multi-line report for a decision, prices rounded to 2 decimals.
pub fn format_report(decision: &Decision) -> String {
    let d = decision.rounded();
    let fmt = |v: Option<f64>| match v {
        Some(x) => format!("{:.2}", x),
        None => "n/a".to_string(),
    };

    if !d.is_available() {
        return format!(
            "\nAnalysis for {}:\nNo data available for {}.",
            d.symbol, d.symbol
        );
    }

    let verdict = if d.recommended {
        format!("{} is recommended to buy today.", d.symbol)
    } else {
        format!("{} is not recommended to buy today.", d.symbol)
    };

    format!(
        "\nAnalysis for {}:\n\
         Yesterday's Close Price: {}\n\
         Open Price for Today: {}\n\
         Current Price: {}\n\
         Current Volume: {}\n\
         Average Volume: {}\n\
         RSI: {}\n\
         MACD: {}\n\
         {}",
        d.symbol,
        fmt(d.close_price),
        fmt(d.open_price),
        fmt(d.current_price),
        fmt(d.current_volume),
        fmt(d.average_volume),
        fmt(d.rsi_latest),
        fmt(d.macd_latest),
        verdict
    )
}

/// Prints reports to stdout.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn announce(&self, decision: &Decision) {
        println!("{}", format_report(decision));
    }

    async fn message(&self, text: &str) {
        println!("{}", text);
    }
}

/// Speaks recommendations through a text-to-speech command (`espeak`).
#[derive(Debug, Clone)]
pub struct SpeechNotifier {
    command: String,
}

impl SpeechNotifier {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    async fn speak(&self, text: &str) {
        match Command::new(&self.command).arg(text).status().await {
            Ok(status) if status.success() => {
                debug!(command = %self.command, "spoke: {}", text);
            }
            Ok(status) => {
                warn!(command = %self.command, status = %status, "speech command exited with failure");
            }
            Err(e) => {
                warn!(command = %self.command, error = %e, "failed to run speech command");
            }
        }
    }
}

#[async_trait]
impl Notifier for SpeechNotifier {
    async fn announce(&self, decision: &Decision) {
        if decision.recommended {
            self.speak(&format!("Buy {} .", decision.symbol)).await;
        }
    }

    async fn message(&self, text: &str) {
        self.speak(text).await;
    }
}

/// Fans every call out to each notifier in order.
#[derive(Clone, Default)]
pub struct NotifierSet {
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl NotifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

#[async_trait]
impl Notifier for NotifierSet {
    async fn announce(&self, decision: &Decision) {
        for notifier in &self.notifiers {
            notifier.announce(decision).await;
        }
    }

    async fn message(&self, text: &str) {
        for notifier in &self.notifiers {
            notifier.message(text).await;
        }
    }
}
