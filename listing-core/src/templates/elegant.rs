//! Elegant: framed photo on a secondary-colored mat, centered serif copy.

use crate::color::{Rgba, WHITE};
use crate::layer::{GradientAxis, LayerList};
use crate::placement::Slot;

use super::compose::{MetricsRow, Scene, TextBox, REFERENCE_HEIGHT, REFERENCE_WIDTH};
use super::{MissingMetrics, RenderContext, TemplateVariant};

const CENTER: f64 = REFERENCE_WIDTH / 2.0;
const PHOTO: (f64, f64, f64, f64) = (48.0, 48.0, 984.0, 900.0);
const FRAME_INSET: f64 = 24.0;
const FRAME_ALPHA: f64 = 0.8;
const FADE_TOP: f64 = 600.0;
const DIVIDER_RADIUS: f64 = 6.0;

const LOGO_SLOT: Slot = Slot::square(60.0, 1210.0, 100.0);
const HEADSHOT_SLOT: Slot = Slot::square(920.0, 1210.0, 100.0);

const HEADING: TextBox = TextBox::center(CENTER, 800.0, 88.0, 880.0);
const SUBHEADING: TextBox = TextBox::center(CENTER, 1000.0, 40.0, 880.0);
const ADDRESS: TextBox = TextBox::center(CENTER, 1060.0, 28.0, 800.0);
const DESCRIPTION: TextBox = TextBox::center(CENTER, 1170.0, 24.0, 800.0);
const SIGNATURE: TextBox = TextBox::center(CENTER, 1310.0, 22.0, 600.0);

const METRICS: MetricsRow = MetricsRow {
    cells: [
        TextBox::center(300.0, 1250.0, 26.0, 220.0),
        TextBox::center(CENTER, 1250.0, 26.0, 220.0),
        TextBox::center(780.0, 1250.0, 26.0, 220.0),
    ],
    policy: MissingMetrics::Placeholder,
};

/// Inset photo with hairline frame rules and a quiet text column below.
#[derive(Debug, Clone, Copy, Default)]
pub struct Elegant;

impl TemplateVariant for Elegant {
    fn id(&self) -> &'static str {
        "elegant"
    }

    fn label(&self) -> &'static str {
        "Elegant"
    }

    fn render(&self, ctx: &RenderContext<'_>) -> LayerList {
        let mut scene = Scene::new(ctx);
        let primary = scene.primary();
        let secondary = scene.secondary();
        let on_photo = scene.photo_text();
        let on_mat = scene.text_on(secondary);

        scene.rect(0.0, 0.0, REFERENCE_WIDTH, REFERENCE_HEIGHT, Rgba::from(secondary));

        let (x, y, w, h) = PHOTO;
        scene.photo(x, y, w, h);

        let rule = WHITE.with_alpha(FRAME_ALPHA);
        let rule_width = w - 2.0 * FRAME_INSET;
        scene.rect(x + FRAME_INSET, y + FRAME_INSET, rule_width, 2.0, rule);
        scene.rect(x + FRAME_INSET, y + h - FRAME_INSET - 2.0, rule_width, 2.0, rule);

        scene.gradient(
            x,
            FADE_TOP,
            w,
            y + h - FADE_TOP,
            GradientAxis::Vertical,
            &[(0.0, primary, 0.0), (1.0, primary, 0.85)],
        );

        let heading = scene.heading();
        scene.text([heading], HEADING, on_photo, true);
        scene.circle(CENTER, 980.0, DIVIDER_RADIUS, Rgba::from(primary));

        if let Some(subheading) = scene.subheading() {
            scene.text([subheading], SUBHEADING, on_mat, false);
        }
        scene.address(ADDRESS, on_mat, false);
        if let Some(description) = scene.description() {
            scene.text([description], DESCRIPTION, on_mat, false);
        }
        scene.metrics(&METRICS, on_mat, false);

        scene.logo(LOGO_SLOT);
        scene.headshot(HEADSHOT_SLOT, None);
        scene.signature(SIGNATURE, on_mat);

        scene.finish()
    }
}
