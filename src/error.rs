//! Error types for the indicator renderer.
//!
//! Drawing onto in-memory canvases cannot fail, so the only errors are
//! surface allocation and the windowing collaborator rejecting a request.
//! Neither is retried: both propagate to whoever called `redraw()`.

use thiserror::Error;

/// Errors raised while producing or publishing a frame.
#[derive(Error, Debug)]
pub enum IndicatorError {
    /// A drawing surface could not be allocated.
    #[error("Failed to allocate a {width}x{height} drawing surface")]
    SurfaceAllocation { width: u32, height: u32 },

    /// The windowing layer failed to install or repaint the background.
    #[error("Windowing operation failed: {message}")]
    Windowing { message: String },
}

/// Standard Result type for indicator operations.
pub type Result<T> = std::result::Result<T, IndicatorError>;

impl IndicatorError {
    /// Create a Windowing error with a descriptive message
    pub fn windowing(message: impl Into<String>) -> Self {
        Self::Windowing {
            message: message.into(),
        }
    }
}
