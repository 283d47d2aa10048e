//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod signal;

pub use bar::{PriceBar, Quote, Series};
pub use indicators::{IndicatorKind, IndicatorSet};
pub use signal::{Condition, ConditionResult, Decision, DecisionStatus, MarketContext};
