//! Classic: full-bleed photo darkened toward the bottom, left-aligned copy.

use crate::color::Rgba;
use crate::layer::{GradientAxis, LayerList};
use crate::placement::Slot;

use super::compose::{MetricsRow, Scene, TextBox, REFERENCE_HEIGHT, REFERENCE_WIDTH};
use super::{MissingMetrics, RenderContext, TemplateVariant};

const MARGIN: f64 = 60.0;
const TEXT_WIDTH: f64 = 960.0;

const FADE_TOP: f64 = 600.0;
const RULE: (f64, f64, f64, f64) = (MARGIN, 868.0, 120.0, 6.0);

const LOGO_SLOT: Slot = Slot::square(MARGIN, MARGIN, 160.0);
const HEADSHOT_SLOT: Slot = Slot::square(820.0, 1010.0, 200.0);
const HEADSHOT_RING: f64 = 6.0;

const HEADING: TextBox = TextBox::left(MARGIN, 890.0, 96.0, TEXT_WIDTH);
const SUBHEADING: TextBox = TextBox::left(MARGIN, 1000.0, 44.0, TEXT_WIDTH);
const ADDRESS: TextBox = TextBox::left(MARGIN, 1060.0, 32.0, 700.0);
const SIGNATURE: TextBox = TextBox::right(REFERENCE_WIDTH - MARGIN, 1280.0, 26.0, 400.0);

const METRICS: MetricsRow = MetricsRow {
    cells: [
        TextBox::left(MARGIN, 1250.0, 30.0, 220.0),
        TextBox::left(300.0, 1250.0, 30.0, 220.0),
        TextBox::left(540.0, 1250.0, 30.0, 220.0),
    ],
    policy: MissingMetrics::Placeholder,
};

/// Full-bleed photo with a primary-colored fade and shadowed white copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

impl TemplateVariant for Classic {
    fn id(&self) -> &'static str {
        "classic"
    }

    fn label(&self) -> &'static str {
        "Classic"
    }

    fn missing_metrics(&self) -> MissingMetrics {
        METRICS.policy
    }

    fn render(&self, ctx: &RenderContext<'_>) -> LayerList {
        let mut scene = Scene::new(ctx);
        let primary = scene.primary();
        let secondary = scene.secondary();
        let text = scene.photo_text();

        scene.photo(0.0, 0.0, REFERENCE_WIDTH, REFERENCE_HEIGHT);
        scene.gradient(
            0.0,
            FADE_TOP,
            REFERENCE_WIDTH,
            REFERENCE_HEIGHT - FADE_TOP,
            GradientAxis::Vertical,
            &[(0.0, primary, 0.0), (0.6, primary, 0.55), (1.0, primary, 0.9)],
        );
        scene.logo(LOGO_SLOT);

        let (x, y, w, h) = RULE;
        scene.rect(x, y, w, h, Rgba::from(secondary));

        let heading = scene.heading();
        scene.text([heading], HEADING, text, true);
        if let Some(subheading) = scene.subheading() {
            scene.text([subheading], SUBHEADING, text, true);
        }
        scene.address(ADDRESS, text, true);
        scene.metrics(&METRICS, text, true);

        scene.headshot(HEADSHOT_SLOT, Some((HEADSHOT_RING, Rgba::from(secondary))));
        scene.signature(SIGNATURE, text);

        scene.finish()
    }
}
