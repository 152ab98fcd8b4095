//! Overlay errors.

use thiserror::Error;

/// Errors surfaced by the overlay and its settings.
///
/// Input events never produce errors; unmet preconditions are ignored.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("Settings error: {0}")]
    Settings(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        OverlayError::Settings(err.to_string())
    }
}

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;
