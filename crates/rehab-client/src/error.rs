use std::path::PathBuf;

use rehab_instruments::calculator::CalculatorError;
use rehab_instruments::error::InstrumentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response. `message` is the backend's `detail` when it sent one.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<CalculatorError> for ClientError {
    fn from(err: CalculatorError) -> Self {
        ClientError::Validation(err.to_string())
    }
}

impl From<InstrumentError> for ClientError {
    fn from(err: InstrumentError) -> Self {
        ClientError::Validation(err.to_string())
    }
}

impl ClientError {
    /// Whether the error was raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
