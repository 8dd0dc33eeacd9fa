//! Backend that logs layers instead of drawing them.
//!
//! Useful on hosts without a drawing surface and for checking paint order in
//! logs.

use listing_core::{Layer, LayerList};

use crate::{BackendType, RenderResult};

use super::{check_size, validate, RenderBackend};

/// Logging backend.
#[derive(Debug)]
pub struct TraceBackend {
    width: u32,
    height: u32,
    frames: u64,
    last_layer_count: usize,
}

impl TraceBackend {
    /// Create a backend with a 1080x1350 surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 1080,
            height: 1350,
            frames: 0,
            last_layer_count: 0,
        }
    }

    /// Number of completed renders.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Layers painted by the last render.
    #[must_use]
    pub fn last_layer_count(&self) -> usize {
        self.last_layer_count
    }

    /// Surface size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn describe(layer: &Layer) -> String {
        match layer {
            Layer::Rectangle {
                x, y, w, h, color, ..
            } => format!("at ({x}, {y}) size {w}x{h} fill={}", color.to_css()),
            Layer::Circle { cx, cy, r, color } => {
                format!("at ({cx}, {cy}) r={r} fill={}", color.to_css())
            }
            Layer::Gradient {
                x, y, w, h, stops, axis, ..
            } => format!("at ({x}, {y}) size {w}x{h} {axis:?} stops={}", stops.len()),
            Layer::Image {
                role, src, x, y, w, h, ..
            } => format!("{role:?} src={src} at ({x}, {y}) size {w}x{h}"),
            Layer::TextBlock(block) => format!(
                "'{}' at ({}, {}) font={} {}px",
                block.text().replace('\n', " / "),
                block.x,
                block.y,
                block.font_family,
                block.font_size_px
            ),
        }
    }
}

impl Default for TraceBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for TraceBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Trace
    }

    fn render(&mut self, layers: &LayerList) -> RenderResult<()> {
        validate(layers)?;
        tracing::trace!(
            "Trace render: {} layers, surface {}x{}",
            layers.len(),
            self.width,
            self.height
        );

        for (index, layer) in layers.iter().enumerate() {
            tracing::trace!("#{index} {} {}", layer.kind_name(), Self::describe(layer));
        }

        self.frames += 1;
        self.last_layer_count = layers.len();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        check_size(width, height)?;
        self.width = width;
        self.height = height;
        tracing::debug!("Trace surface resized to {}x{}", width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_core::color::BLACK;

    #[test]
    fn test_counts_layers_and_frames() {
        let mut layers = LayerList::new();
        layers.push(Layer::Circle {
            cx: 10.0,
            cy: 10.0,
            r: 4.0,
            color: BLACK.into(),
        });

        let mut backend = TraceBackend::new();
        backend.render(&layers).expect("renders");
        backend.render(&LayerList::new()).expect("renders");
        assert_eq!(backend.frames(), 2);
        assert_eq!(backend.last_layer_count(), 0);
    }

    #[test]
    fn test_rejects_nan_geometry() {
        let mut layers = LayerList::new();
        layers.push(Layer::Circle {
            cx: f64::NAN,
            cy: 10.0,
            r: 4.0,
            color: BLACK.into(),
        });

        let mut backend = TraceBackend::new();
        let err = backend.render(&layers).expect_err("invalid");
        assert!(err.to_string().contains("circle"));
        assert_eq!(backend.frames(), 0);
    }

    #[test]
    fn test_resize() {
        let mut backend = TraceBackend::new();
        backend.resize(540, 675).expect("resizes");
        assert_eq!(backend.size(), (540, 675));
        assert!(backend.resize(0, 675).is_err());
    }
}
