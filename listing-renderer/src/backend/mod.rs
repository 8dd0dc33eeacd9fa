//! Rendering backend implementations.

pub mod svg;
pub mod trace;

use listing_core::{Layer, LayerList};

use crate::{BackendType, RenderError, RenderResult};

/// Trait for rendering surfaces.
pub trait RenderBackend {
    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Paint `layers` in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer cannot be drawn.
    fn render(&mut self, layers: &LayerList) -> RenderResult<()>;

    /// Resize the rendering surface.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;
}

/// Reject zero-sized surfaces.
pub(crate) fn check_size(width: u32, height: u32) -> RenderResult<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::Surface(format!(
            "cannot resize to {width}x{height}"
        )));
    }
    Ok(())
}

/// Reject layers whose geometry is not finite or has negative extent.
///
/// # Errors
///
/// Returns [`RenderError::InvalidLayer`] for the first offending layer.
pub fn validate(layers: &LayerList) -> RenderResult<()> {
    for (index, layer) in layers.iter().enumerate() {
        let (numbers, extents): (Vec<f64>, Vec<f64>) = match layer {
            Layer::Rectangle { x, y, w, h, .. }
            | Layer::Gradient { x, y, w, h, .. }
            | Layer::Image { x, y, w, h, .. } => (vec![*x, *y, *w, *h], vec![*w, *h]),
            Layer::Circle { cx, cy, r, .. } => (vec![*cx, *cy, *r], vec![*r]),
            Layer::TextBlock(block) => (
                vec![block.x, block.y, block.max_width, block.font_size_px],
                vec![block.max_width, block.font_size_px],
            ),
        };

        let reason = if numbers.iter().any(|n| !n.is_finite()) {
            Some("non-finite geometry")
        } else if extents.iter().any(|n| *n < 0.0) {
            Some("negative extent")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(RenderError::InvalidLayer {
                index,
                kind: layer.kind_name(),
                reason: reason.to_string(),
            });
        }
    }
    Ok(())
}
