//! Detailed: photo over a solid information panel with a full fact sheet.

use crate::color::Rgba;
use crate::layer::{GradientAxis, LayerList};
use crate::placement::Slot;

use super::compose::{MetricsRow, Scene, TextBox, REFERENCE_HEIGHT, REFERENCE_WIDTH};
use super::{MissingMetrics, RenderContext, TemplateVariant};

const MARGIN: f64 = 60.0;
const TEXT_LEFT: f64 = 88.0;
const PANEL_TOP: f64 = 675.0;
const BLEND_HEIGHT: f64 = 120.0;
const ACCENT: (f64, f64, f64, f64) = (MARGIN, 700.0, 8.0, 200.0);
const DIVIDER: (f64, f64, f64, f64) = (MARGIN, 970.0, 960.0, 2.0);

const LOGO_SLOT: Slot = Slot::square(MARGIN, 1190.0, 120.0);
const HEADSHOT_SLOT: Slot = Slot::square(900.0, 1190.0, 120.0);
const HEADSHOT_RING: f64 = 4.0;

const HEADING: TextBox = TextBox::left(TEXT_LEFT, 700.0, 72.0, 930.0);
const SUBHEADING: TextBox = TextBox::left(TEXT_LEFT, 790.0, 40.0, 930.0);
const ADDRESS: TextBox = TextBox::left(TEXT_LEFT, 850.0, 28.0, 930.0);
const DESCRIPTION: TextBox = TextBox::left(MARGIN, 1050.0, 24.0, 960.0);
const SIGNATURE: TextBox = TextBox::center(REFERENCE_WIDTH / 2.0, 1250.0, 24.0, 600.0);

const METRICS: MetricsRow = MetricsRow {
    cells: [
        TextBox::left(MARGIN, 990.0, 28.0, 220.0),
        TextBox::left(300.0, 990.0, 28.0, 220.0),
        TextBox::left(540.0, 990.0, 28.0, 220.0),
    ],
    policy: MissingMetrics::OmitRowWhenFirstMissing,
};

/// Information-dense layout; the metrics row is dropped without a bed count.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detailed;

impl TemplateVariant for Detailed {
    fn id(&self) -> &'static str {
        "detailed"
    }

    fn label(&self) -> &'static str {
        "Detailed"
    }

    fn missing_metrics(&self) -> MissingMetrics {
        METRICS.policy
    }

    fn render(&self, ctx: &RenderContext<'_>) -> LayerList {
        let mut scene = Scene::new(ctx);
        let primary = scene.primary();
        let secondary = scene.secondary();
        let text = scene.text_on(primary);

        scene.photo(0.0, 0.0, REFERENCE_WIDTH, PANEL_TOP);
        scene.rect(
            0.0,
            PANEL_TOP,
            REFERENCE_WIDTH,
            REFERENCE_HEIGHT - PANEL_TOP,
            Rgba::from(primary),
        );
        scene.gradient(
            0.0,
            PANEL_TOP - BLEND_HEIGHT,
            REFERENCE_WIDTH,
            BLEND_HEIGHT,
            GradientAxis::Vertical,
            &[(0.0, primary, 0.0), (1.0, primary, 1.0)],
        );
        let (x, y, w, h) = ACCENT;
        scene.rect(x, y, w, h, Rgba::from(secondary));

        let heading = scene.heading();
        scene.text([heading], HEADING, text, false);
        if let Some(subheading) = scene.subheading() {
            scene.text([subheading], SUBHEADING, text, false);
        }
        scene.address(ADDRESS, text, false);

        if scene.metrics(&METRICS, text, false) {
            let (x, y, w, h) = DIVIDER;
            scene.rect(x, y, w, h, secondary.with_alpha(0.6));
        }
        if let Some(description) = scene.description() {
            scene.text([description], DESCRIPTION, text, false);
        }

        scene.logo(LOGO_SLOT);
        scene.headshot(HEADSHOT_SLOT, Some((HEADSHOT_RING, Rgba::from(secondary))));
        scene.signature(SIGNATURE, text);

        scene.finish()
    }
}
