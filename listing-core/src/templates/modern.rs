//! Modern: photo on top, a solid color band below with a horizontal blend.

use crate::layer::{GradientAxis, LayerList};
use crate::placement::{anchor_above_baseline, Slot};

use super::compose::{MetricsRow, Scene, TextBox, REFERENCE_HEIGHT, REFERENCE_WIDTH};
use super::{MissingMetrics, RenderContext, TemplateVariant};

const MARGIN: f64 = 60.0;
const BAND_TOP: f64 = 864.0;
const ACCENT_RADIUS: f64 = 90.0;

const LOGO_SIZE: f64 = 120.0;
const LOGO_SPACING: f64 = 24.0;
const HEADSHOT_SLOT: Slot = Slot::square(840.0, 1000.0, 180.0);
const HEADSHOT_RING: f64 = 5.0;

const HEADING: TextBox = TextBox::left(MARGIN, 900.0, 84.0, 740.0);
const SUBHEADING: TextBox = TextBox::left(MARGIN, 1000.0, 40.0, 740.0);
const ADDRESS: TextBox = TextBox::left(MARGIN, 1060.0, 30.0, 740.0);
const SIGNATURE: TextBox = TextBox::right(REFERENCE_WIDTH - MARGIN, 1290.0, 24.0, 400.0);

const METRICS: MetricsRow = MetricsRow {
    cells: [
        TextBox::left(MARGIN, 1250.0, 28.0, 220.0),
        TextBox::left(300.0, 1250.0, 28.0, 220.0),
        TextBox::left(540.0, 1250.0, 28.0, 220.0),
    ],
    policy: MissingMetrics::Placeholder,
};

/// Split layout: photo above a primary-to-secondary band carrying the copy.
///
/// The logo sits on the photo, flush above the heading regardless of its own
/// height.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modern;

impl TemplateVariant for Modern {
    fn id(&self) -> &'static str {
        "modern"
    }

    fn label(&self) -> &'static str {
        "Modern"
    }

    fn missing_metrics(&self) -> MissingMetrics {
        METRICS.policy
    }

    fn render(&self, ctx: &RenderContext<'_>) -> LayerList {
        let mut scene = Scene::new(ctx);
        let primary = scene.primary();
        let secondary = scene.secondary();
        let band_height = REFERENCE_HEIGHT - BAND_TOP;
        let text = scene.text_on(primary);

        scene.photo(0.0, 0.0, REFERENCE_WIDTH, BAND_TOP);
        scene.rect(0.0, BAND_TOP, REFERENCE_WIDTH, band_height, primary.into());
        scene.gradient(
            0.0,
            BAND_TOP,
            REFERENCE_WIDTH,
            band_height,
            GradientAxis::Horizontal,
            &[(0.0, primary, 1.0), (0.55, primary, 1.0), (1.0, secondary, 1.0)],
        );
        scene.circle(
            REFERENCE_WIDTH - 140.0,
            BAND_TOP,
            ACCENT_RADIUS,
            secondary.into(),
        );

        let logo_top = anchor_above_baseline(LOGO_SIZE, HEADING.y, LOGO_SPACING);
        scene.logo(Slot::square(MARGIN, logo_top, LOGO_SIZE));

        let heading = scene.heading();
        scene.text([heading], HEADING, text, false);
        if let Some(subheading) = scene.subheading() {
            scene.text([subheading], SUBHEADING, text, false);
        }
        scene.address(ADDRESS, text, false);
        scene.metrics(&METRICS, text, false);

        scene.headshot(HEADSHOT_SLOT, Some((HEADSHOT_RING, secondary.into())));
        scene.signature(SIGNATURE, text);

        scene.finish()
    }
}
