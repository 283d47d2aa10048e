//! Buy-signal evaluation.

pub mod decision;
pub mod engine;

pub use decision::{BuyRule, RuleInputs};
pub use engine::SignalEvaluator;
