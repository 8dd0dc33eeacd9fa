//! Engine-wide defaults shared by every template.

use serde::{Deserialize, Serialize};

use crate::color::{HexColor, Rgb};
use crate::fonts::DEFAULT_FONT_ID;

/// Export width used when no configuration is given.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1080.0;

/// Height over width of the exported 4:5 canvas.
pub const CANVAS_ASPECT: f64 = 1.25;

/// Text color used over photographs when the style has no override.
pub const FALLBACK_TEXT: Rgb = Rgb::new(0xfa, 0xfa, 0xfa);

/// Primary color of a freshly initialized style.
pub const DEFAULT_PRIMARY: Rgb = Rgb::new(0, 0, 0);

/// How far the default secondary color moves from primary toward white.
pub const SECONDARY_TINT: f64 = 0.3;

/// Configuration injected into the template registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Canvas width in pixels; height is always `1.25 * width`.
    pub canvas_width: f64,
    /// Text color over photographs when the style has no override.
    pub fallback_text_color: HexColor,
    /// Primary color of new styles.
    pub default_primary_color: HexColor,
    /// Font id of new styles.
    pub default_font_id: String,
    /// Horizontal shadow offset.
    pub shadow_dx: f64,
    /// Vertical shadow offset.
    pub shadow_dy: f64,
    /// Shadow opacity.
    pub shadow_alpha: f64,
    /// Signature text when the user profile has no agent name.
    pub signature_fallback: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            fallback_text_color: HexColor::from_rgb(FALLBACK_TEXT),
            default_primary_color: HexColor::from_rgb(DEFAULT_PRIMARY),
            default_font_id: DEFAULT_FONT_ID.to_string(),
            shadow_dx: 1.0,
            shadow_dy: 2.0,
            shadow_alpha: 0.6,
            signature_fallback: None,
        }
    }
}

impl EngineConfig {
    /// Canvas height for the configured width.
    #[must_use]
    pub fn canvas_height(&self) -> f64 {
        self.canvas_width * CANVAS_ASPECT
    }

    /// Parse a JSON configuration; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a color is invalid.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
