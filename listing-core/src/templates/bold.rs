//! Bold: full-bleed photo under a large rounded color panel.

use crate::color::{Rgba, BLACK};
use crate::layer::{GradientAxis, LayerList};
use crate::placement::Slot;

use super::compose::{MetricsRow, Scene, TextBox, REFERENCE_HEIGHT, REFERENCE_WIDTH};
use super::{MissingMetrics, RenderContext, TemplateVariant};

const CENTER: f64 = REFERENCE_WIDTH / 2.0;
const PANEL: (f64, f64, f64, f64) = (60.0, 760.0, 960.0, 530.0);
const PANEL_OPACITY: f64 = 0.88;
const PANEL_RADIUS: f64 = 28.0;
const STRIPE_HEIGHT: f64 = 12.0;

const LOGO_SLOT: Slot = Slot::square(60.0, 60.0, 150.0);
const HEADSHOT_SLOT: Slot = Slot::square(870.0, 60.0, 150.0);
const HEADSHOT_RING: f64 = 6.0;

const HEADING: TextBox = TextBox::center(CENTER, 800.0, 110.0, 900.0);
const SUBHEADING: TextBox = TextBox::center(CENTER, 930.0, 46.0, 900.0);
const ADDRESS: TextBox = TextBox::center(CENTER, 1000.0, 30.0, 860.0);
const SIGNATURE: TextBox = TextBox::center(CENTER, 1305.0, 24.0, 600.0);

const METRICS: MetricsRow = MetricsRow {
    cells: [
        TextBox::center(240.0, 1200.0, 32.0, 260.0),
        TextBox::center(CENTER, 1200.0, 32.0, 260.0),
        TextBox::center(840.0, 1200.0, 32.0, 260.0),
    ],
    policy: MissingMetrics::Placeholder,
};

/// Centered, upper-case headline on a translucent panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bold;

impl TemplateVariant for Bold {
    fn id(&self) -> &'static str {
        "bold"
    }

    fn label(&self) -> &'static str {
        "Bold"
    }

    fn missing_metrics(&self) -> MissingMetrics {
        METRICS.policy
    }

    fn render(&self, ctx: &RenderContext<'_>) -> LayerList {
        let mut scene = Scene::new(ctx);
        let primary = scene.primary();
        let secondary = scene.secondary();
        let on_panel = scene.text_on(primary);
        let on_photo = scene.photo_text();

        scene.photo(0.0, 0.0, REFERENCE_WIDTH, REFERENCE_HEIGHT);
        scene.gradient(
            0.0,
            0.0,
            REFERENCE_WIDTH,
            REFERENCE_HEIGHT,
            GradientAxis::Vertical,
            &[(0.0, BLACK, 0.1), (1.0, BLACK, 0.6)],
        );

        let (x, y, w, h) = PANEL;
        scene.rounded_rect(
            x,
            y,
            w,
            h,
            Rgba::from(primary),
            Some(PANEL_OPACITY),
            Some(PANEL_RADIUS),
        );
        scene.rect(x, y, w, STRIPE_HEIGHT, Rgba::from(secondary));

        let heading = scene.heading().to_uppercase();
        scene.text([heading], HEADING, on_panel, true);
        if let Some(subheading) = scene.subheading() {
            scene.text([subheading], SUBHEADING, on_panel, true);
        }
        scene.address(ADDRESS, on_panel, false);
        scene.metrics(&METRICS, on_panel, false);

        scene.logo(LOGO_SLOT);
        scene.headshot(HEADSHOT_SLOT, Some((HEADSHOT_RING, Rgba::from(secondary))));
        scene.signature(SIGNATURE, on_photo);

        scene.finish()
    }
}
