//! Paragraph building: styled text blocks with legibility shadows, plus the
//! formatting of property data into display strings.

use crate::color::{contrast_rgb, Rgba};
use crate::config::EngineConfig;
use crate::fonts;
use crate::layer::{Layer, TextAlign, TextBlock, TextShadow};
use crate::model::{Area, PropertyRecord};

/// Token shown for an absent numeric property field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Where and how to set a paragraph.
#[derive(Debug, Clone, Copy)]
pub struct TextSpec<'a> {
    /// Logical font id, resolved through the font table.
    pub font_id: &'a str,
    /// Nominal size before family compensation.
    pub base_size_px: f64,
    /// Fill color.
    pub color: Rgba,
    /// Alignment relative to `x`.
    pub align: TextAlign,
    /// Anchor x.
    pub x: f64,
    /// Top of the first line.
    pub y: f64,
    /// Wrapping width.
    pub max_width: f64,
}

/// A main text block and the shadow painted under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// Offset duplicate, painted first.
    pub shadow: Option<TextBlock>,
    /// The visible block.
    pub main: TextBlock,
}

impl Paragraph {
    /// Layers in paint order: the shadow (if any) then the main block.
    #[must_use]
    pub fn into_layers(self) -> Vec<Layer> {
        let mut layers = Vec::with_capacity(2);
        if let Some(shadow) = self.shadow {
            layers.push(Layer::TextBlock(shadow));
        }
        layers.push(Layer::TextBlock(self.main));
        layers
    }
}

/// Builds paragraphs for one scene.
///
/// A shadow takes the contrast color of the fill it sits under, so light text
/// always gets a dark shadow and dark text a light one, whatever photo or
/// overlay shape lies behind the pair.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphBuilder {
    shadow_dx: f64,
    shadow_dy: f64,
    shadow_alpha: f64,
}

impl ParagraphBuilder {
    /// Create a builder with the configured shadow offset and opacity.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            shadow_dx: config.shadow_dx,
            shadow_dy: config.shadow_dy,
            shadow_alpha: config.shadow_alpha,
        }
    }

    /// Shadow color for text filled with `fill`.
    #[must_use]
    pub fn shadow_for(&self, fill: Rgba) -> Rgba {
        contrast_rgb(fill.rgb()).with_alpha(self.shadow_alpha)
    }

    /// Build a paragraph from `lines`.
    ///
    /// Lines stay in a single block so the text shaper controls line spacing.
    #[must_use]
    pub fn build_text_block<S: Into<String>>(
        &self,
        lines: impl IntoIterator<Item = S>,
        spec: &TextSpec<'_>,
        shadowed: bool,
    ) -> Paragraph {
        let font = fonts::resolve(spec.font_id);
        let main = TextBlock {
            lines: lines.into_iter().map(Into::into).collect(),
            x: spec.x,
            y: spec.y,
            max_width: spec.max_width,
            align: spec.align,
            font_family: font.family.to_string(),
            font_size_px: spec.base_size_px * font.size_compensation,
            color: spec.color,
            shadow: None,
        };

        let shadow = shadowed.then(|| {
            let offset = TextShadow {
                dx: self.shadow_dx,
                dy: self.shadow_dy,
                color: self.shadow_for(main.color),
            };
            TextBlock {
                x: main.x + offset.dx,
                y: main.y + offset.dy,
                color: offset.color,
                shadow: Some(offset),
                ..main.clone()
            }
        });

        Paragraph { shadow, main }
    }
}

/// Address as display lines: street, `City, ST`, then postal code and country.
#[must_use]
pub fn address_lines(property: &PropertyRecord) -> Vec<String> {
    let mut lines = vec![property.address_line.trim().to_string()];

    let city = property.city.trim();
    let region = property.state_or_region.trim();
    lines.push(if region.is_empty() {
        city.to_string()
    } else {
        format!("{city}, {region}")
    });

    let tail: Vec<&str> = [property.postal_code.trim(), property.country.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    if !tail.is_empty() {
        lines.push(tail.join(", "));
    }

    lines
}

fn format_count(value: f64) -> Option<String> {
    (value.is_finite() && value >= 0.0).then(|| format!("{value}"))
}

fn with_noun(value: f64, singular: &str, plural: &str) -> Option<String> {
    let number = format_count(value)?;
    let noun = if (value - 1.0).abs() < f64::EPSILON {
        singular
    } else {
        plural
    };
    Some(format!("{number} {noun}"))
}

/// `"3 beds"`, `"1 bed"`, or `"N/A"`.
#[must_use]
pub fn format_beds(beds: Option<u32>) -> String {
    beds.and_then(|b| with_noun(f64::from(b), "bed", "beds"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `"2 baths"`, `"2.5 baths"`, `"1 bath"`, or `"N/A"`.
#[must_use]
pub fn format_baths(baths: Option<f64>) -> String {
    baths
        .and_then(|b| with_noun(b, "bath", "baths"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `"1980 sqft"`, `"184 m2"`, or `"N/A"`.
#[must_use]
pub fn format_area(area: Option<Area>) -> String {
    area.and_then(|a| format_count(a.value).map(|n| format!("{n} {}", a.unit.suffix())))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
