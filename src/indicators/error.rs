use thiserror::Error;

use crate::models::indicators::IndicatorKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient history for {indicator}: need {required} bars, have {available}")]
    InsufficientHistory {
        indicator: IndicatorKind,
        required: usize,
        available: usize,
    },
}
