//! Image placement inside reserved slots.
//!
//! Logos and headshots come in arbitrary aspect ratios but every template
//! reserves a fixed slot for them. Wide and tall images are shrunk along their
//! short axis so that all of them sit visually centered in the same slot.

use serde::{Deserialize, Serialize};

/// Width/height ratio band treated as square.
pub const SQUARE_TOLERANCE: f64 = 0.2;

/// Ratio above which an image is a wide rectangle.
pub const WIDE_MIN_RATIO: f64 = 1.5;

/// Ratio below which an image is a tall rectangle.
pub const TALL_MAX_RATIO: f64 = 0.7;

/// Scale applied to the short axis of rectangular images.
pub const RECT_SCALE: f64 = 0.7;

// Absorbs float error so a 0.7-scaled square slot is not re-classified as tall.
const RATIO_EPSILON: f64 = 1e-9;

/// Intrinsic pixel size of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageInfo {
    /// Create from pixel dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Shape class of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectClass {
    /// Square, or a moderate rectangle that uses the slot unmodified.
    Square,
    /// Width more than 1.5x height.
    WideRectangle,
    /// Width less than 0.7x height.
    TallRectangle,
}

/// Classify an image by its aspect ratio.
///
/// Zero or non-finite dimensions classify as [`AspectClass::Square`] so the
/// slot is used unmodified.
#[must_use]
pub fn classify_aspect(width: f64, height: f64) -> AspectClass {
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return AspectClass::Square;
    }

    let ratio = width / height;
    if (ratio - 1.0).abs() < SQUARE_TOLERANCE {
        AspectClass::Square
    } else if ratio > WIDE_MIN_RATIO + RATIO_EPSILON {
        AspectClass::WideRectangle
    } else if ratio < TALL_MAX_RATIO - RATIO_EPSILON {
        AspectClass::TallRectangle
    } else {
        AspectClass::Square
    }
}

/// Fitted `(width, height)` for an image of `class` in a base slot.
#[must_use]
pub fn fit_slot(class: AspectClass, base_width: f64, base_height: f64) -> (f64, f64) {
    match class {
        AspectClass::WideRectangle => (base_width, base_height * RECT_SCALE),
        AspectClass::TallRectangle => (base_width * RECT_SCALE, base_height),
        AspectClass::Square => (base_width, base_height),
    }
}

/// Top edge that puts a slot of `slot_height` flush above `baseline_y`,
/// leaving `spacing` between them.
#[must_use]
pub fn anchor_above_baseline(slot_height: f64, baseline_y: f64, spacing: f64) -> f64 {
    baseline_y - spacing - slot_height
}

/// A reserved rectangle for a variably shaped image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Reserved width.
    pub width: f64,
    /// Reserved height.
    pub height: f64,
}

impl Slot {
    /// Create a slot.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square slot of `size` at `(x, y)`.
    #[must_use]
    pub const fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(x, y, size, size)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Final rectangle of an image within its slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Fitted width.
    pub width: f64,
    /// Fitted height.
    pub height: f64,
}

/// Fit an image into `slot` and center it there.
///
/// Unknown intrinsic size returns the slot unchanged.
#[must_use]
pub fn resolve_slot(info: Option<ImageInfo>, slot: Slot) -> Placement {
    let class = info.map_or(AspectClass::Square, |i| {
        classify_aspect(f64::from(i.width), f64::from(i.height))
    });
    let (width, height) = fit_slot(class, slot.width, slot.height);

    Placement {
        x: slot.x + (slot.width - width) / 2.0,
        y: slot.y + (slot.height - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_bands() {
        assert_eq!(classify_aspect(100.0, 100.0), AspectClass::Square);
        assert_eq!(classify_aspect(119.0, 100.0), AspectClass::Square);
        assert_eq!(classify_aspect(800.0, 200.0), AspectClass::WideRectangle);
        assert_eq!(classify_aspect(200.0, 800.0), AspectClass::TallRectangle);
        // Moderate rectangles keep the base slot
        assert_eq!(classify_aspect(140.0, 100.0), AspectClass::Square);
        assert_eq!(classify_aspect(75.0, 100.0), AspectClass::Square);
    }

    #[test]
    fn test_classify_band_edges() {
        // Exactly at the band limits the image is a moderate rectangle
        assert_eq!(classify_aspect(150.0, 100.0), AspectClass::Square);
        assert_eq!(classify_aspect(70.0, 100.0), AspectClass::Square);
        assert_eq!(classify_aspect(120.0, 100.0), AspectClass::Square);
        assert_eq!(classify_aspect(1.5, 1.0), AspectClass::Square);
        assert_eq!(classify_aspect(0.7, 1.0), AspectClass::Square);
        // Just past them it is not
        assert_eq!(classify_aspect(151.0, 100.0), AspectClass::WideRectangle);
        assert_eq!(classify_aspect(69.0, 100.0), AspectClass::TallRectangle);
    }

    #[test]
    fn test_band_edge_slots_are_stable() {
        for (w, h) in [(150.0, 100.0), (70.0, 100.0), (120.0, 100.0), (140.0, 100.0)] {
            let fitted = fit_slot(classify_aspect(w, h), w, h);
            assert_eq!(fitted, (w, h), "{w}x{h} slot was resized");
            let again = fit_slot(classify_aspect(fitted.0, fitted.1), fitted.0, fitted.1);
            assert_eq!(again, fitted);
        }
    }

    #[test]
    fn test_fitted_square_slot_lands_on_band_edge() {
        // A tall image in a square slot fits to a 0.7 ratio, which must not
        // re-classify as tall and shrink again
        let (w, h) = fit_slot(AspectClass::TallRectangle, 100.0, 100.0);
        assert_eq!(classify_aspect(w, h), AspectClass::Square);
        assert_eq!(fit_slot(classify_aspect(w, h), w, h), (w, h));

        let (w, h) = fit_slot(AspectClass::TallRectangle, 37.0, 37.0);
        assert_eq!(classify_aspect(w, h), AspectClass::Square);
    }

    #[test]
    fn test_classify_degenerate_dimensions() {
        assert_eq!(classify_aspect(0.0, 100.0), AspectClass::Square);
        assert_eq!(classify_aspect(100.0, 0.0), AspectClass::Square);
        assert_eq!(classify_aspect(f64::NAN, 10.0), AspectClass::Square);
    }

    #[test]
    fn test_wide_logo_in_square_slot() {
        let class = classify_aspect(800.0, 200.0);
        let (w, h) = fit_slot(class, 100.0, 100.0);
        assert!((w - 100.0).abs() < 1e-9);
        assert!((h - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_tall_keeps_height() {
        let (w, h) = fit_slot(AspectClass::TallRectangle, 200.0, 200.0);
        assert!((w - 140.0).abs() < 1e-9);
        assert!((h - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_above_baseline() {
        assert!((anchor_above_baseline(120.0, 900.0, 24.0) - 756.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_slot_centers() {
        let placement = resolve_slot(Some(ImageInfo::new(800, 200)), Slot::square(10.0, 20.0, 100.0));
        assert!((placement.x - 10.0).abs() < 1e-9);
        assert!((placement.y - 35.0).abs() < 1e-9);
        assert!((placement.height - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_slot_unknown_size_is_unmodified() {
        let slot = Slot::new(5.0, 6.0, 160.0, 120.0);
        let placement = resolve_slot(None, slot);
        assert_eq!(
            (placement.x, placement.y, placement.width, placement.height),
            (5.0, 6.0, 160.0, 120.0)
        );
        let zero = resolve_slot(Some(ImageInfo::new(0, 0)), slot);
        assert!((zero.width - 160.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_fit_slot_idempotent_for_square_slots(
            w in 1u32..5000,
            h in 1u32..5000,
            size in 1.0f64..2000.0,
        ) {
            let class = classify_aspect(f64::from(w), f64::from(h));
            let (fw, fh) = fit_slot(class, size, size);
            let again = fit_slot(classify_aspect(fw, fh), fw, fh);
            prop_assert!((again.0 - fw).abs() < 1e-9);
            prop_assert!((again.1 - fh).abs() < 1e-9);
        }
    }
}
