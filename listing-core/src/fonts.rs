//! Font resolution table and the font readiness seam.

use serde::Serialize;

/// A concrete font family and its size compensation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    /// Logical id used in canvas styles.
    pub id: &'static str,
    /// Family name handed to the text-shaping primitive.
    pub family: &'static str,
    /// Multiplier applied to nominal sizes so families read at a similar weight.
    pub size_compensation: f64,
}

/// Id of the entry unknown ids resolve to.
pub const DEFAULT_FONT_ID: &str = "playfair";

const FONT_TABLE: [FontSpec; 6] = [
    FontSpec {
        id: "playfair",
        family: "Playfair Display",
        size_compensation: 1.0,
    },
    FontSpec {
        id: "inter",
        family: "Inter",
        size_compensation: 0.9,
    },
    FontSpec {
        id: "poppins",
        family: "Poppins",
        size_compensation: 0.85,
    },
    FontSpec {
        id: "cormorant",
        family: "Cormorant Garamond",
        size_compensation: 1.2,
    },
    FontSpec {
        id: "montserrat",
        family: "Montserrat",
        size_compensation: 0.85,
    },
    FontSpec {
        id: "spacemono",
        family: "Space Mono",
        size_compensation: 0.85,
    },
];

/// All known fonts, in picker order.
#[must_use]
pub fn all() -> &'static [FontSpec] {
    &FONT_TABLE
}

/// The entry unknown ids fall back to.
#[must_use]
pub fn default_font() -> &'static FontSpec {
    &FONT_TABLE[0]
}

/// Resolve a logical font id. Never fails: unknown ids get the default entry.
#[must_use]
pub fn resolve(font_id: &str) -> &'static FontSpec {
    FONT_TABLE
        .iter()
        .find(|spec| spec.id.eq_ignore_ascii_case(font_id.trim()))
        .unwrap_or_else(|| {
            tracing::debug!("Unknown font id {font_id:?}, using {DEFAULT_FONT_ID}");
            default_font()
        })
}

/// Whether `font_id` names an entry in the table.
#[must_use]
pub fn is_known(font_id: &str) -> bool {
    FONT_TABLE
        .iter()
        .any(|spec| spec.id.eq_ignore_ascii_case(font_id.trim()))
}

/// `base_size_px` scaled by the family's compensation.
#[must_use]
pub fn adjusted_size(base_size_px: f64, font_id: &str) -> f64 {
    base_size_px * resolve(font_id).size_compensation
}

/// Readiness of the fonts a render will reference.
///
/// Font files load asynchronously on most platforms; the engine refuses to
/// compose until the provider reports ready, so layouts are never measured
/// against fallback glyphs.
pub trait FontProvider {
    /// Whether every family in the table can be drawn.
    fn ready(&self) -> bool;
}

/// A provider whose fonts are bundled and always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFonts;

impl FontProvider for StaticFonts {
    fn ready(&self) -> bool {
        true
    }
}

impl FontProvider for std::sync::atomic::AtomicBool {
    fn ready(&self) -> bool {
        self.load(std::sync::atomic::Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_six_entries() {
        assert_eq!(all().len(), 6);
    }

    #[test]
    fn test_resolve_known() {
        assert_eq!(resolve("cormorant").family, "Cormorant Garamond");
        assert!((resolve("inter").size_compensation - 0.9).abs() < f64::EPSILON);
        assert_eq!(resolve("SpaceMono").family, "Space Mono");
    }

    #[test]
    fn test_unknown_falls_back_to_default() {
        assert_eq!(resolve("comic-sans").id, DEFAULT_FONT_ID);
        assert_eq!(resolve("").id, DEFAULT_FONT_ID);
        assert!(!is_known("comic-sans"));
    }

    #[test]
    fn test_adjusted_size() {
        assert!((adjusted_size(100.0, "montserrat") - 85.0).abs() < 1e-9);
        assert!((adjusted_size(100.0, "cormorant") - 120.0).abs() < 1e-9);
        assert!((adjusted_size(40.0, "unknown") - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_font_table_json() {
        let json = serde_json::to_value(resolve("cormorant")).expect("ser");
        assert_eq!(
            json,
            serde_json::json!({
                "id": "cormorant",
                "family": "Cormorant Garamond",
                "sizeCompensation": 1.2
            })
        );
    }

    #[test]
    fn test_atomic_provider() {
        use std::sync::atomic::{AtomicBool, Ordering};
        let flag = AtomicBool::new(false);
        assert!(!flag.ready());
        flag.store(true, Ordering::Release);
        assert!(flag.ready());
        assert!(StaticFonts.ready());
    }
}
