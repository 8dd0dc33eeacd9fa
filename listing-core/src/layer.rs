//! Paintable layers - the engine's output.
//!
//! A [`LayerList`] is painted back to front in iteration order: the first
//! layer is at the back. Rendering surfaces must not reorder it.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Role of an image within a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotRole {
    /// Full-bleed property photograph.
    Background,
    /// Brokerage logo.
    Logo,
    /// Realtor headshot.
    Headshot,
}

/// How an image fills its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Scale to cover, cropping overflow.
    Cover,
    /// Scale to fit entirely inside.
    Contain,
}

/// Direction a gradient runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientAxis {
    /// Top to bottom.
    Vertical,
    /// Left to right.
    Horizontal,
}

/// Horizontal text alignment relative to `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// `x` is the left edge.
    Left,
    /// `x` is the center line.
    Center,
    /// `x` is the right edge.
    Right,
}

/// One color stop of a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the axis, 0.0 to 1.0.
    pub offset: f64,
    /// Color at this position.
    pub color: Rgba,
}

/// Offset duplicate painted under a text block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextShadow {
    /// Horizontal offset in pixels.
    pub dx: f64,
    /// Vertical offset in pixels.
    pub dy: f64,
    /// Shadow color.
    pub color: Rgba,
}

/// A styled paragraph with absolute position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Lines of the paragraph; line spacing is left to the text shaper.
    pub lines: Vec<String>,
    /// Anchor x, interpreted through `align`.
    pub x: f64,
    /// Top of the first line.
    pub y: f64,
    /// Wrapping width.
    pub max_width: f64,
    /// Alignment of every line.
    pub align: TextAlign,
    /// Concrete font family.
    pub font_family: String,
    /// Size after family compensation.
    pub font_size_px: f64,
    /// Fill color.
    pub color: Rgba,
    /// Set on a shadow duplicate: the offset and color it was derived with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<TextShadow>,
}

impl TextBlock {
    /// The paragraph as a single `\n`-separated string.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// A paintable primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    /// Filled rectangle.
    Rectangle {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        w: f64,
        /// Height.
        h: f64,
        /// Fill color.
        color: Rgba,
        /// Extra opacity multiplied into the fill.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        opacity: Option<f64>,
        /// Corner radius.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        corner_radius: Option<f64>,
    },
    /// Filled circle.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
        /// Fill color.
        color: Rgba,
    },
    /// Linear gradient filling a rectangle.
    Gradient {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        w: f64,
        /// Height.
        h: f64,
        /// Color stops in ascending offset order.
        stops: Vec<GradientStop>,
        /// Direction of the gradient.
        axis: GradientAxis,
    },
    /// External image.
    Image {
        /// What the image is.
        role: SlotRole,
        /// Source location.
        src: String,
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        w: f64,
        /// Height.
        h: f64,
        /// Fill mode.
        fit: ImageFit,
        /// Clip to the inscribed circle.
        #[serde(default)]
        clip_to_circle: bool,
    },
    /// Styled paragraph.
    TextBlock(TextBlock),
}

impl Layer {
    /// Short kind name for logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rectangle",
            Self::Circle { .. } => "circle",
            Self::Gradient { .. } => "gradient",
            Self::Image { .. } => "image",
            Self::TextBlock(_) => "text",
        }
    }

    /// The text block, if this layer is one.
    #[must_use]
    pub const fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Self::TextBlock(block) => Some(block),
            _ => None,
        }
    }
}

/// Layers in paint order, back to front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerList(Vec<Layer>);

impl LayerList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Paint `layer` above everything pushed so far.
    pub fn push(&mut self, layer: Layer) {
        self.0.push(layer);
    }

    /// Append several layers in order.
    pub fn extend(&mut self, layers: impl IntoIterator<Item = Layer>) {
        self.0.extend(layers);
    }

    /// Iterate back to front.
    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.0.iter()
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there is nothing to paint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All text blocks, back to front.
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.0.iter().filter_map(Layer::as_text)
    }

    /// Paint-order index of the first text block whose text equals `text`.
    #[must_use]
    pub fn position_of_text(&self, text: &str) -> Option<usize> {
        self.0
            .iter()
            .position(|layer| layer.as_text().is_some_and(|block| block.text() == text))
    }

    /// Image layers with the given role.
    pub fn images(&self, role: SlotRole) -> impl Iterator<Item = &Layer> {
        self.0
            .iter()
            .filter(move |layer| matches!(layer, Layer::Image { role: r, .. } if *r == role))
    }

    /// Borrow as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Layer] {
        &self.0
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl IntoIterator for LayerList {
    type Item = Layer;
    type IntoIter = std::vec::IntoIter<Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LayerList {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    fn text(s: &str) -> Layer {
        Layer::TextBlock(TextBlock {
            lines: s.split('\n').map(str::to_string).collect(),
            x: 0.0,
            y: 0.0,
            max_width: 100.0,
            align: TextAlign::Left,
            font_family: "Inter".into(),
            font_size_px: 12.0,
            color: WHITE.into(),
            shadow: None,
        })
    }

    #[test]
    fn test_paint_order_is_push_order() {
        let mut layers = LayerList::new();
        layers.push(Layer::Circle {
            cx: 1.0,
            cy: 1.0,
            r: 1.0,
            color: BLACK.into(),
        });
        layers.push(text("a\nb"));
        assert_eq!(layers.len(), 2);
        assert_eq!(layers.as_slice()[0].kind_name(), "circle");
        assert_eq!(layers.position_of_text("a\nb"), Some(1));
    }

    #[test]
    fn test_tagged_json() {
        let mut layers = LayerList::new();
        layers.push(text("hello"));
        let json = layers.to_json().expect("ser");
        assert!(json.contains("\"type\": \"text_block\""));
        let back: LayerList = serde_json::from_str(&json).expect("de");
        assert_eq!(back, layers);
    }
}
