//! Layer list export.
//!
//! Writes a [`LayerList`] as an SVG document, preserving paint order, or as
//! the tagged JSON the engine serializes to.

use std::fmt::Write;

use listing_core::{GradientAxis, ImageFit, Layer, LayerList, Rgba, TextAlign, TextBlock};
use serde::{Deserialize, Serialize};

use crate::backend::validate;
use crate::error::{RenderError, RenderResult};

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.2;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// SVG vector graphics.
    Svg,
    /// Tagged layer list JSON.
    Json,
}

/// Configuration for layer export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    /// Output scale factor (e.g. 2.0 for retina); the view box is unchanged.
    pub scale: f64,
    /// Fill painted under every layer; transparent when unset.
    pub background: Option<Rgba>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

/// Exports layer lists to SVG or JSON.
#[derive(Debug, Clone, Default)]
pub struct SvgExporter {
    config: ExportConfig,
}

impl SvgExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Export `layers` in `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer is invalid or serialization fails.
    pub fn export(
        &self,
        layers: &LayerList,
        width: f64,
        height: f64,
        format: ExportFormat,
    ) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Svg => Ok(self.render_to_svg(layers, width, height)?.into_bytes()),
            ExportFormat::Json => serde_json::to_vec_pretty(layers)
                .map_err(|e| RenderError::Export(format!("JSON encoding failed: {e}"))),
        }
    }

    /// Render `layers` to an SVG document of `width` x `height` canvas pixels.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidLayer`] for non-finite geometry and
    /// [`RenderError::Surface`] for a non-positive canvas; [`RenderError::Export`]
    /// for a non-positive or non-finite output scale.
    pub fn render_to_svg(&self, layers: &LayerList, width: f64, height: f64) -> RenderResult<String> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RenderError::Surface(format!(
                "invalid canvas {width}x{height}"
            )));
        }
        let scale = self.config.scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(RenderError::Export(format!("invalid output scale {scale}")));
        }
        validate(layers)?;

        let out_w = width * scale;
        let out_h = height * scale;

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {width} {height}\">",
        );

        if let Some(background) = self.config.background {
            let _ = write!(
                svg,
                "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
                background.to_css()
            );
        }

        let mut ids = 0usize;
        for layer in layers {
            render_layer_svg(&mut svg, layer, &mut ids);
        }

        svg.push_str("</svg>");
        tracing::debug!(layers = layers.len(), bytes = svg.len(), "Exported SVG");
        Ok(svg)
    }
}

/// Render a single layer to SVG.
fn render_layer_svg(svg: &mut String, layer: &Layer, ids: &mut usize) {
    match layer {
        Layer::Rectangle {
            x,
            y,
            w,
            h,
            color,
            opacity,
            corner_radius,
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"{}\"",
                color.to_css()
            );
            if let Some(opacity) = opacity {
                let _ = write!(svg, " opacity=\"{opacity}\"");
            }
            if let Some(r) = corner_radius {
                let _ = write!(svg, " rx=\"{r}\" ry=\"{r}\"");
            }
            svg.push_str("/>");
        }

        Layer::Circle { cx, cy, r, color } => {
            let _ = write!(
                svg,
                "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{}\"/>",
                color.to_css()
            );
        }

        Layer::Gradient {
            x,
            y,
            w,
            h,
            stops,
            axis,
        } => {
            let id = next_id(ids, "grad");
            let (x2, y2) = match axis {
                GradientAxis::Vertical => (0, 1),
                GradientAxis::Horizontal => (1, 0),
            };
            let _ = write!(
                svg,
                "<defs><linearGradient id=\"{id}\" x1=\"0\" y1=\"0\" x2=\"{x2}\" y2=\"{y2}\">"
            );
            for stop in stops {
                let c = stop.color;
                let _ = write!(
                    svg,
                    "<stop offset=\"{}\" stop-color=\"rgb({},{},{})\" stop-opacity=\"{}\"/>",
                    stop.offset, c.r, c.g, c.b, c.a
                );
            }
            let _ = write!(
                svg,
                "</linearGradient></defs><rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"url(#{id})\"/>"
            );
        }

        Layer::Image {
            src,
            x,
            y,
            w,
            h,
            fit,
            clip_to_circle,
            ..
        } => {
            let aspect = match fit {
                ImageFit::Cover => "xMidYMid slice",
                ImageFit::Contain => "xMidYMid meet",
            };
            let clip = if *clip_to_circle {
                let id = next_id(ids, "clip");
                let _ = write!(
                    svg,
                    "<defs><clipPath id=\"{id}\"><circle cx=\"{}\" cy=\"{}\" r=\"{}\"/></clipPath></defs>",
                    x + w / 2.0,
                    y + h / 2.0,
                    w.min(*h) / 2.0
                );
                format!(" clip-path=\"url(#{id})\"")
            } else {
                String::new()
            };
            let _ = write!(
                svg,
                "<image x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" href=\"{}\" preserveAspectRatio=\"{aspect}\"{clip}/>",
                escape_xml(src)
            );
        }

        Layer::TextBlock(block) => render_text_svg(svg, block),
    }
}

/// One `<text>` per block, one `<tspan>` per line.
fn render_text_svg(svg: &mut String, block: &TextBlock) {
    let anchor = match block.align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    };
    let _ = write!(
        svg,
        "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\" dominant-baseline=\"hanging\">",
        block.x,
        block.y,
        escape_xml(&block.font_family),
        block.font_size_px,
        block.color.to_css()
    );
    let line_height = block.font_size_px * LINE_HEIGHT;
    for (i, line) in block.lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { line_height };
        let _ = write!(
            svg,
            "<tspan x=\"{}\" dy=\"{dy}\">{}</tspan>",
            block.x,
            escape_xml(line)
        );
    }
    svg.push_str("</text>");
}

fn next_id(ids: &mut usize, prefix: &str) -> String {
    *ids += 1;
    format!("{prefix}{ids}")
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_core::color::{BLACK, WHITE};
    use listing_core::layer::{GradientStop, SlotRole};

    fn text(lines: &[&str], align: TextAlign) -> Layer {
        Layer::TextBlock(TextBlock {
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
            x: 60.0,
            y: 100.0,
            max_width: 900.0,
            align,
            font_family: "Inter".to_string(),
            font_size_px: 20.0,
            color: WHITE.into(),
            shadow: None,
        })
    }

    #[test]
    fn test_svg_export_empty_list() {
        let exporter = SvgExporter::with_defaults();
        let svg = exporter
            .render_to_svg(&LayerList::new(), 1080.0, 1350.0)
            .expect("svg export");
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"1080\""));
        assert!(svg.contains("height=\"1350\""));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_multiline_text_uses_tspans() {
        let mut layers = LayerList::new();
        layers.push(text(&["123 Main St", "Austin, TX"], TextAlign::Center));

        let svg = SvgExporter::with_defaults()
            .render_to_svg(&layers, 1080.0, 1350.0)
            .expect("svg export");
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("dy=\"24\""));
    }

    #[test]
    fn test_gradient_and_clip_ids_unique() {
        let mut layers = LayerList::new();
        for _ in 0..2 {
            layers.push(Layer::Gradient {
                x: 0.0,
                y: 0.0,
                w: 100.0,
                h: 100.0,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: BLACK.with_alpha(0.0),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: BLACK.with_alpha(0.9),
                    },
                ],
                axis: GradientAxis::Horizontal,
            });
        }
        layers.push(Layer::Image {
            role: SlotRole::Headshot,
            src: "a.jpg".to_string(),
            x: 10.0,
            y: 10.0,
            w: 40.0,
            h: 40.0,
            fit: ImageFit::Cover,
            clip_to_circle: true,
        });

        let svg = SvgExporter::with_defaults()
            .render_to_svg(&layers, 100.0, 125.0)
            .expect("svg export");
        assert!(svg.contains("id=\"grad1\""));
        assert!(svg.contains("id=\"grad2\""));
        assert!(svg.contains("id=\"clip3\""));
        assert!(svg.contains("x2=\"1\" y2=\"0\""));
        assert!(svg.contains("<circle cx=\"30\" cy=\"30\" r=\"20\"/>"));
        assert!(svg.contains("preserveAspectRatio=\"xMidYMid slice\""));
    }

    #[test]
    fn test_xml_escaping() {
        let mut layers = LayerList::new();
        layers.push(text(&["Smith & Sons <Realty>"], TextAlign::Left));

        let svg = SvgExporter::with_defaults()
            .render_to_svg(&layers, 100.0, 125.0)
            .expect("svg export");
        assert!(svg.contains("Smith &amp; Sons &lt;Realty&gt;"));
    }

    #[test]
    fn test_scale_and_background() {
        let exporter = SvgExporter::new(ExportConfig {
            scale: 2.0,
            background: Some(WHITE.into()),
        });
        let svg = exporter
            .render_to_svg(&LayerList::new(), 540.0, 675.0)
            .expect("svg export");
        assert!(svg.contains("width=\"1080\""));
        assert!(svg.contains("viewBox=\"0 0 540 675\""));
        assert!(svg.contains("fill=\"rgba(255,255,255,1)\""));
    }

    #[test]
    fn test_invalid_scale_rejected() {
        for scale in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let exporter = SvgExporter::new(ExportConfig {
                scale,
                background: None,
            });
            let result = exporter.render_to_svg(&LayerList::new(), 1080.0, 1350.0);
            assert!(matches!(result, Err(RenderError::Export(_))), "scale {scale} accepted");
        }
    }

    #[test]
    fn test_invalid_canvas_rejected() {
        let exporter = SvgExporter::with_defaults();
        assert!(matches!(
            exporter.render_to_svg(&LayerList::new(), 0.0, 100.0),
            Err(RenderError::Surface(_))
        ));
    }

    #[test]
    fn test_json_export() {
        let mut layers = LayerList::new();
        layers.push(text(&["Just Sold"], TextAlign::Right));
        let bytes = SvgExporter::with_defaults()
            .export(&layers, 100.0, 125.0, ExportFormat::Json)
            .expect("json export");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");
        assert_eq!(value[0]["type"], "text_block");
        assert_eq!(value[0]["lines"][0], "Just Sold");
    }
}
