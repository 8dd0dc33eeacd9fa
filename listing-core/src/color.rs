//! # Color Engine
//!
//! Hex parsing, alpha compositing and the black/white contrast rule used for
//! every text and shadow color the templates resolve.
//!
//! The contrast rule compares relative luminance against a fixed `0.5`
//! threshold rather than a WCAG contrast ratio; exported images depend on the
//! exact cut-over, so the threshold is pinned by tests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Hex form of pure black, the light-background contrast color.
pub const BLACK_HEX: &str = "#000000";

/// Hex form of pure white, the dark-background contrast color.
pub const WHITE_HEX: &str = "#ffffff";

/// Luminance at or above which text switches to black.
pub const CONTRAST_THRESHOLD: f64 = 0.5;

/// Pure black.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Pure white.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Encode as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation toward `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| {
            let (a, b) = (f64::from(a), f64::from(b));
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    /// Attach an alpha value.
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        with_alpha(self, alpha)
    }

    /// Relative luminance of this color.
    #[must_use]
    pub fn luminance(self) -> f64 {
        relative_luminance(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An 8-bit sRGB color with a floating point alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity, 0.0 transparent to 1.0 opaque.
    pub a: f64,
}

impl Rgba {
    /// The opaque color underneath.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// CSS `rgba()` notation.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        with_alpha(rgb, 1.0)
    }
}

/// Parse a 6-digit hex color, with or without a leading `#`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidHex`] for wrong length or non-hex characters.
pub fn hex_to_rgb(hex: &str) -> EngineResult<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EngineError::InvalidHex(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| EngineError::InvalidHex(hex.to_string()))
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Attach an alpha value, clamped to `[0, 1]`. NaN becomes fully transparent.
#[must_use]
pub fn with_alpha(rgb: Rgb, alpha: f64) -> Rgba {
    let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    Rgba {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
        a,
    }
}

/// sRGB relative luminance in `[0, 1]`.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let c = f64::from(channel) / 255.0;
        if c <= 0.039_28 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// Contrast color for a known luminance. The threshold itself maps to black.
#[must_use]
pub fn contrast_for_luminance(luminance: f64) -> Rgb {
    if luminance >= CONTRAST_THRESHOLD {
        BLACK
    } else {
        WHITE
    }
}

/// Black or white, whichever reads better on `background`.
#[must_use]
pub fn contrast_rgb(background: Rgb) -> Rgb {
    contrast_for_luminance(relative_luminance(background))
}

/// Returns `"#000000"` for light backgrounds and `"#ffffff"` for dark ones.
///
/// # Errors
///
/// Returns [`EngineError::InvalidHex`] if `background_hex` does not parse.
pub fn contrast_color(background_hex: &str) -> EngineResult<&'static str> {
    let rgb = hex_to_rgb(background_hex)?;
    Ok(if contrast_rgb(rgb) == BLACK {
        BLACK_HEX
    } else {
        WHITE_HEX
    })
}

/// A validated hex color as stored in a canvas style.
///
/// Serializes as a lowercase `#rrggbb` string; deserializing an invalid string
/// fails instead of falling back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(Rgb);

impl HexColor {
    /// Wrap an already-parsed color.
    #[must_use]
    pub const fn from_rgb(rgb: Rgb) -> Self {
        Self(rgb)
    }

    /// Parse a hex string.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHex`] if the string does not parse.
    pub fn parse(hex: &str) -> EngineResult<Self> {
        hex_to_rgb(hex).map(Self)
    }

    /// The parsed channels.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        self.0
    }
}

impl FromStr for HexColor {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0.to_hex()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!(hex_to_rgb("#1a2B3c").expect("parse"), Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(hex_to_rgb("ff8000").expect("parse"), Rgb::new(255, 128, 0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "#", "#fff", "#12345", "#1234567", "#gg0000", "12 456", "#ééé"] {
            assert!(
                matches!(hex_to_rgb(bad), Err(EngineError::InvalidHex(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert!((with_alpha(BLACK, 1.7).a - 1.0).abs() < f64::EPSILON);
        assert!(with_alpha(BLACK, -0.3).a.abs() < f64::EPSILON);
        assert!(with_alpha(BLACK, f64::NAN).a.abs() < f64::EPSILON);
        assert!((with_alpha(BLACK, 0.25).a - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_luminance_extremes() {
        assert!(relative_luminance(BLACK).abs() < 1e-12);
        assert!((relative_luminance(WHITE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_contrast_threshold_boundary_is_black() {
        assert_eq!(contrast_for_luminance(0.5), BLACK);
        assert_eq!(contrast_for_luminance(0.500_000_1), BLACK);
        assert_eq!(contrast_for_luminance(0.499_999_9), WHITE);
    }

    #[test]
    fn test_contrast_color_strings() {
        assert_eq!(contrast_color("#000000").expect("valid"), WHITE_HEX);
        assert_eq!(contrast_color("#ffffff").expect("valid"), BLACK_HEX);
        assert_eq!(contrast_color("fafafa").expect("valid"), BLACK_HEX);
        // Mid grey is dark by luminance (~0.22)
        assert_eq!(contrast_color("#808080").expect("valid"), WHITE_HEX);
        assert!(contrast_color("nope").is_err());
    }

    #[test]
    fn test_mix_toward_white() {
        assert_eq!(BLACK.mix(WHITE, 0.3), Rgb::new(77, 77, 77));
        assert_eq!(BLACK.mix(WHITE, 2.0), WHITE);
    }

    #[test]
    fn test_hex_color_serde() {
        let color: HexColor = serde_json::from_str("\"#AbCdEf\"").expect("valid");
        assert_eq!(serde_json::to_string(&color).expect("ser"), "\"#abcdef\"");
        assert!(serde_json::from_str::<HexColor>("\"#abc\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_hex_round_trip(hex in "#[0-9a-f]{6}") {
            let rgb = hex_to_rgb(&hex).expect("generated hex is valid");
            prop_assert_eq!(rgb.to_hex(), hex);
        }

        #[test]
        fn prop_contrast_matches_threshold(r: u8, g: u8, b: u8) {
            let rgb = Rgb::new(r, g, b);
            let expected = if relative_luminance(rgb) >= 0.5 { BLACK } else { WHITE };
            prop_assert_eq!(contrast_rgb(rgb), expected);
        }

        #[test]
        fn prop_luminance_in_unit_range(r: u8, g: u8, b: u8) {
            let l = relative_luminance(Rgb::new(r, g, b));
            prop_assert!((0.0..=1.0 + 1e-9).contains(&l));
        }
    }
}
