//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A layer carries geometry the surface cannot draw.
    #[error("Invalid layer {index} ({kind}): {reason}")]
    InvalidLayer {
        /// Paint-order index of the layer.
        index: usize,
        /// Layer kind name.
        kind: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Surface dimensions are unusable.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Export failed.
    #[error("Export failed: {0}")]
    Export(String),
}
