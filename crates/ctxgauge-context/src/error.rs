//! Error types for context usage configuration

use thiserror::Error;

/// Context configuration error type
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Invalid usage thresholds: warning {warning} must be finite, non-negative and below critical {critical}")]
    InvalidThresholds { warning: f64, critical: f64 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for context operations
pub type ContextResult<T> = Result<T, ContextError>;
