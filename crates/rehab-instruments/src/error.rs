use thiserror::Error;

use crate::calculator::CalculatorError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown scale: {0}")]
    UnknownScale(String),

    #[error("calculator input rejected: {0}")]
    Calculator(#[from] CalculatorError),

    #[error("required fields missing: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}
