//! Error types for the wordmaze layout library.

use thiserror::Error;

/// Primary error type for layout reconstruction.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("confidence must be within [0, 1], got {0}")]
    InvalidConfidence(f64),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        LayoutError::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;
