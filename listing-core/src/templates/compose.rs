//! Composition helpers shared by every template.
//!
//! Variants describe themselves as geometry constants at a 1080px reference
//! width; [`Scene`] scales them to the configured canvas, resolves style
//! defaults, gates optional layers and records everything in paint order.

use crate::color::{contrast_rgb, Rgb, Rgba};
use crate::error::EngineError;
use crate::layer::{GradientAxis, GradientStop, ImageFit, Layer, LayerList, SlotRole, TextAlign};
use crate::paragraph::{self, ParagraphBuilder, TextSpec};
use crate::placement::{resolve_slot, Slot};

use super::{MissingMetrics, RenderContext};

/// Width every variant's constants are written against.
pub(crate) const REFERENCE_WIDTH: f64 = 1080.0;

/// Reference canvas height (4:5).
pub(crate) const REFERENCE_HEIGHT: f64 = 1350.0;

/// A text placement in reference pixels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextBox {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub max_width: f64,
    pub align: TextAlign,
}

impl TextBox {
    pub(crate) const fn left(x: f64, y: f64, size: f64, max_width: f64) -> Self {
        Self {
            x,
            y,
            size,
            max_width,
            align: TextAlign::Left,
        }
    }

    pub(crate) const fn center(x: f64, y: f64, size: f64, max_width: f64) -> Self {
        Self {
            x,
            y,
            size,
            max_width,
            align: TextAlign::Center,
        }
    }

    pub(crate) const fn right(x: f64, y: f64, size: f64, max_width: f64) -> Self {
        Self {
            x,
            y,
            size,
            max_width,
            align: TextAlign::Right,
        }
    }
}

/// Positions of the beds/baths/area cells.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MetricsRow {
    pub cells: [TextBox; 3],
    pub policy: MissingMetrics,
}

/// Gradient stop in a compact form: offset, color, alpha.
pub(crate) type Stop = (f64, Rgb, f64);

/// One render pass in progress.
pub(crate) struct Scene<'a> {
    ctx: &'a RenderContext<'a>,
    scale: f64,
    primary: Rgb,
    secondary: Rgb,
    paragraphs: ParagraphBuilder,
    layers: LayerList,
}

impl<'a> Scene<'a> {
    /// Start a scene.
    pub(crate) fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self {
            ctx,
            scale: ctx.config.canvas_width / REFERENCE_WIDTH,
            primary: ctx.style.primary_color.rgb(),
            secondary: ctx.style.secondary(),
            paragraphs: ParagraphBuilder::new(ctx.config),
            layers: LayerList::new(),
        }
    }

    pub(crate) const fn primary(&self) -> Rgb {
        self.primary
    }

    pub(crate) const fn secondary(&self) -> Rgb {
        self.secondary
    }

    fn px(&self, reference: f64) -> f64 {
        reference * self.scale
    }

    /// Text fill over the photograph.
    pub(crate) fn photo_text(&self) -> Rgba {
        self.ctx
            .style
            .text_color
            .unwrap_or(self.ctx.config.fallback_text_color)
            .rgb()
            .into()
    }

    /// Text fill over a solid `surface`.
    pub(crate) fn text_on(&self, surface: Rgb) -> Rgba {
        self.ctx
            .style
            .text_color
            .map_or_else(|| contrast_rgb(surface), |c| c.rgb())
            .into()
    }

    /// Custom heading, or the post type's default label.
    pub(crate) fn heading(&self) -> String {
        non_blank(self.ctx.style.custom_heading.as_deref())
            .map_or_else(|| self.ctx.post_type.default_heading().to_string(), str::to_string)
    }

    /// Custom sub-heading, or the price when the style shows it.
    pub(crate) fn subheading(&self) -> Option<String> {
        non_blank(self.ctx.style.custom_subheading.as_deref())
            .or_else(|| {
                self.ctx
                    .style
                    .show_price
                    .then_some(self.ctx.property.price.as_deref())
                    .flatten()
                    .and_then(|price| non_blank(Some(price)))
            })
            .map(str::to_string)
    }

    pub(crate) fn description(&self) -> Option<String> {
        non_blank(self.ctx.style.custom_description.as_deref()).map(str::to_string)
    }

    /// Full-bleed property photo in the given rectangle.
    pub(crate) fn photo(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let Some(src) = self.ctx.property.photo_url.as_deref() else {
            return;
        };
        if self.ctx.assets.lookup(src).is_none() {
            warn_missing(SlotRole::Background, src);
            return;
        }
        let s = self.scale;
        self.layers.push(Layer::Image {
            role: SlotRole::Background,
            src: src.to_string(),
            x: x * s,
            y: y * s,
            w: w * s,
            h: h * s,
            fit: ImageFit::Cover,
            clip_to_circle: false,
        });
    }

    pub(crate) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.rounded_rect(x, y, w, h, color, None, None);
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgba,
        opacity: Option<f64>,
        corner_radius: Option<f64>,
    ) {
        let s = self.scale;
        self.layers.push(Layer::Rectangle {
            x: x * s,
            y: y * s,
            w: w * s,
            h: h * s,
            color,
            opacity,
            corner_radius: corner_radius.map(|r| r * s),
        });
    }

    pub(crate) fn circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgba) {
        let s = self.scale;
        self.layers.push(Layer::Circle {
            cx: cx * s,
            cy: cy * s,
            r: r * s,
            color,
        });
    }

    pub(crate) fn gradient(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        axis: GradientAxis,
        stops: &[Stop],
    ) {
        let s = self.scale;
        self.layers.push(Layer::Gradient {
            x: x * s,
            y: y * s,
            w: w * s,
            h: h * s,
            stops: stops
                .iter()
                .map(|&(offset, rgb, alpha)| GradientStop {
                    offset,
                    color: rgb.with_alpha(alpha),
                })
                .collect(),
            axis,
        });
    }

    /// A paragraph in the style's font.
    pub(crate) fn text<S: Into<String>>(
        &mut self,
        lines: impl IntoIterator<Item = S>,
        at: TextBox,
        color: Rgba,
        shadowed: bool,
    ) {
        let spec = TextSpec {
            font_id: &self.ctx.style.selected_font_id,
            base_size_px: self.px(at.size),
            color,
            align: at.align,
            x: self.px(at.x),
            y: self.px(at.y),
            max_width: self.px(at.max_width),
        };
        let paragraph = self.paragraphs.build_text_block(lines, &spec, shadowed);
        self.layers.extend(paragraph.into_layers());
    }

    /// Street, city/region and postal lines as one block.
    pub(crate) fn address(&mut self, at: TextBox, color: Rgba, shadowed: bool) {
        let lines = paragraph::address_lines(self.ctx.property);
        self.text(lines, at, color, shadowed);
    }

    /// Beds, baths and area, one block per cell.
    ///
    /// Returns whether the row was drawn, so variants can gate row decoration.
    pub(crate) fn metrics(&mut self, row: &MetricsRow, color: Rgba, shadowed: bool) -> bool {
        let property = self.ctx.property;
        if row.policy == MissingMetrics::OmitRowWhenFirstMissing && property.beds.is_none() {
            tracing::debug!("Metrics row omitted: bed count missing");
            return false;
        }

        let values = [
            paragraph::format_beds(property.beds),
            paragraph::format_baths(property.baths),
            paragraph::format_area(property.area),
        ];
        for (value, cell) in values.into_iter().zip(row.cells) {
            self.text([value], cell, color, shadowed);
        }
        true
    }

    /// Brokerage logo, fitted into `slot`, when shown and decodable.
    pub(crate) fn logo(&mut self, slot: Slot) {
        if !self.ctx.style.show_brokerage {
            return;
        }
        let Some(logo) = &self.ctx.prefs.brokerage_logo else {
            return;
        };
        let Some(info) = self.ctx.assets.lookup(&logo.url) else {
            warn_missing(SlotRole::Logo, &logo.url);
            return;
        };

        let placement = resolve_slot(Some(info), self.scaled(slot));
        self.layers.push(Layer::Image {
            role: SlotRole::Logo,
            src: logo.url.clone(),
            x: placement.x,
            y: placement.y,
            w: placement.width,
            h: placement.height,
            fit: ImageFit::Contain,
            clip_to_circle: false,
        });
    }

    /// Circular realtor headshot with an optional ring behind it.
    ///
    /// The ring is decoration for the photo only and is skipped with it.
    pub(crate) fn headshot(&mut self, slot: Slot, ring: Option<(f64, Rgba)>) {
        if !self.ctx.style.show_realtor {
            return;
        }
        let Some(picture) = &self.ctx.prefs.realtor_picture else {
            return;
        };
        if self.ctx.assets.lookup(&picture.url).is_none() {
            warn_missing(SlotRole::Headshot, &picture.url);
            return;
        }

        let slot = self.scaled(slot);
        if let Some((width, color)) = ring {
            let (cx, cy) = slot.center();
            let r = slot.width.min(slot.height) / 2.0 + self.px(width);
            self.layers.push(Layer::Circle { cx, cy, r, color });
        }
        // Headshots are cropped to a circle, so they cover the whole slot.
        self.layers.push(Layer::Image {
            role: SlotRole::Headshot,
            src: picture.url.clone(),
            x: slot.x,
            y: slot.y,
            w: slot.width,
            h: slot.height,
            fit: ImageFit::Cover,
            clip_to_circle: true,
        });
    }

    /// Agent signature, when shown and a name is known.
    pub(crate) fn signature(&mut self, at: TextBox, color: Rgba) {
        if !self.ctx.style.show_signature {
            return;
        }
        let name = non_blank(self.ctx.prefs.agent_name.as_deref())
            .or_else(|| non_blank(self.ctx.config.signature_fallback.as_deref()));
        if let Some(name) = name {
            let name = name.to_string();
            self.text([name], at, color, false);
        }
    }

    fn scaled(&self, slot: Slot) -> Slot {
        Slot::new(
            self.px(slot.x),
            self.px(slot.y),
            self.px(slot.width),
            self.px(slot.height),
        )
    }

    pub(crate) fn finish(self) -> LayerList {
        self.layers
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn warn_missing(role: SlotRole, src: &str) {
    let error = EngineError::MissingAsset(src.to_string());
    tracing::warn!(?role, "Skipping image layer: {error}");
}
