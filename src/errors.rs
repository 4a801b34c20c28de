use thiserror::Error;

use crate::models::SwapMethod;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid swap method specified: {0}")]
    UnknownSwapMethod(String),

    #[error("Invalid input focus element specified: {0}")]
    UnknownInputFocus(String),

    #[error("Preview method mismatch: expected {expected}, got {actual}")]
    PreviewMethodMismatch {
        expected: SwapMethod,
        actual: SwapMethod,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
