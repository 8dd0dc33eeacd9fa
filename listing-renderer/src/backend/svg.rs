//! Backend that keeps the last frame as an SVG document.

use listing_core::LayerList;

use crate::export::{ExportConfig, SvgExporter};
use crate::{BackendType, RenderResult};

use super::{check_size, RenderBackend};

/// SVG surface.
#[derive(Debug)]
pub struct SvgBackend {
    exporter: SvgExporter,
    width: u32,
    height: u32,
    document: Option<String>,
}

impl SvgBackend {
    /// Create a surface of `width` x `height` canvas pixels.
    #[must_use]
    pub fn new(width: u32, height: u32, config: ExportConfig) -> Self {
        Self {
            exporter: SvgExporter::new(config),
            width,
            height,
            document: None,
        }
    }

    /// The most recently rendered document.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Take the most recently rendered document.
    pub fn take_document(&mut self) -> Option<String> {
        self.document.take()
    }
}

impl RenderBackend for SvgBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Svg
    }

    fn render(&mut self, layers: &LayerList) -> RenderResult<()> {
        let svg = self.exporter.render_to_svg(
            layers,
            f64::from(self.width),
            f64::from(self.height),
        )?;
        self.document = Some(svg);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        check_size(width, height)?;
        self.width = width;
        self.height = height;
        self.document = None;
        tracing::debug!("SVG surface resized to {}x{}", width, height);
        Ok(())
    }
}
