//! End-to-end render tests.
//!
//! Covers the full path from property record and canvas style to layer list:
//! - Metrics and address text of the classic template
//! - Missing-metrics policies per variant
//! - Degraded renders when assets are missing
//! - Canvas scaling from configuration

use std::collections::HashMap;

use listing_core::{
    Area, AreaUnit, CanvasStyle, Engine, EngineConfig, HexColor, ImageInfo, ImageRef, Layer,
    LayerList, NoAssets, PostType, PropertyRecord, SlotRole, TextBlock, UserPreferences,
};

const PHOTO: &str = "https://cdn.example.com/photos/123-main.jpg";
const LOGO: &str = "https://cdn.example.com/brand/logo.png";
const HEADSHOT: &str = "https://cdn.example.com/agents/jane.jpg";

/// The Austin listing used throughout.
fn austin() -> PropertyRecord {
    PropertyRecord {
        address_line: "123 Main St".to_string(),
        city: "Austin".to_string(),
        state_or_region: "TX".to_string(),
        postal_code: "78701".to_string(),
        country: "USA".to_string(),
        beds: Some(3),
        baths: Some(2.0),
        area: Some(Area {
            value: 1980.0,
            unit: AreaUnit::Sqft,
        }),
        price: Some("$450,000".to_string()),
        photo_url: Some(PHOTO.to_string()),
    }
}

fn branded() -> UserPreferences {
    UserPreferences {
        brokerage_logo: Some(ImageRef::new(LOGO)),
        realtor_picture: Some(ImageRef::new(HEADSHOT)),
        agent_name: Some("Jane Doe".to_string()),
    }
}

fn all_assets() -> HashMap<String, ImageInfo> {
    HashMap::from([
        (PHOTO.to_string(), ImageInfo::new(2400, 1600)),
        (LOGO.to_string(), ImageInfo::new(800, 200)),
        (HEADSHOT.to_string(), ImageInfo::new(600, 600)),
    ])
}

fn style_for(engine: &Engine, post_type: PostType, template: &str) -> CanvasStyle {
    let mut style = CanvasStyle::initial(post_type, engine.registry(), engine.config())
        .expect("default variant");
    style.template_id = template.to_string();
    style
}

fn texts(layers: &LayerList) -> Vec<String> {
    layers.text_blocks().map(TextBlock::text).collect()
}

/// Main (non-shadow) blocks whose text equals `text`, with their paint index.
fn main_blocks<'a>(layers: &'a LayerList, text: &str) -> Vec<(usize, &'a TextBlock)> {
    layers
        .iter()
        .enumerate()
        .filter_map(|(i, layer)| layer.as_text().map(|block| (i, block)))
        .filter(|(_, block)| block.shadow.is_none() && block.text() == text)
        .collect()
}

// ============================================================================
// Classic template
// ============================================================================

#[test]
fn test_classic_contains_metrics_and_address() {
    let engine = Engine::default();
    let style = style_for(&engine, PostType::JustListed, "classic");
    let layers = engine
        .render(&austin(), &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");

    let texts = texts(&layers);
    for expected in ["3 beds", "2 baths", "1980 sqft", "Just Listed", "$450,000"] {
        assert!(texts.iter().any(|t| t == expected), "missing {expected}");
    }

    let address = "123 Main St\nAustin, TX\n78701, USA";
    let mains = main_blocks(&layers, address);
    assert_eq!(mains.len(), 1);
    let (index, main) = mains[0];
    assert!(index > 0);

    let shadow = layers.as_slice()[index - 1]
        .as_text()
        .expect("shadow precedes the address");
    assert_eq!(shadow.text(), address);
    let offset = shadow.shadow.as_ref().expect("shadow block");
    assert!((shadow.x - main.x - offset.dx).abs() < 1e-9);
    assert!((shadow.y - main.y - offset.dy).abs() < 1e-9);
}

#[test]
fn test_classic_paints_photo_first() {
    let engine = Engine::default();
    let style = style_for(&engine, PostType::JustListed, "classic");
    let layers = engine
        .render(&austin(), &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");

    assert!(matches!(
        layers.as_slice().first(),
        Some(Layer::Image {
            role: SlotRole::Background,
            ..
        })
    ));
}

#[test]
fn test_classic_wide_logo_fits_slot() {
    let engine = Engine::default();
    let style = style_for(&engine, PostType::JustListed, "classic");
    let layers = engine
        .render(&austin(), &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");

    let logo = layers.images(SlotRole::Logo).next().expect("logo drawn");
    let Layer::Image { x, y, w, h, .. } = logo else {
        panic!("logo is an image layer");
    };
    // 800x200 is a wide rectangle: full slot width, 70% height, centered
    assert!((w - 160.0).abs() < 1e-9);
    assert!((h - 112.0).abs() < 1e-9);
    assert!((x - 60.0).abs() < 1e-9);
    assert!((y - 84.0).abs() < 1e-9);
}

// ============================================================================
// Every variant, every post type
// ============================================================================

#[test]
fn test_every_listed_variant_renders() {
    let engine = Engine::default();
    for post_type in PostType::ALL {
        let variants = engine.list_variants(post_type);
        assert!(!variants.is_empty());
        for descriptor in variants {
            let style = style_for(&engine, post_type, &descriptor.id);
            let layers = engine
                .render(&austin(), &branded(), &style, post_type, &all_assets())
                .expect("listed variant renders");
            assert!(
                layers.position_of_text(post_type.default_heading()).is_some()
                    || layers
                        .position_of_text(&post_type.default_heading().to_uppercase())
                        .is_some(),
                "{} has no heading for {post_type}",
                descriptor.id
            );
        }
    }
}

#[test]
fn test_custom_heading_replaces_default() {
    let engine = Engine::default();
    let mut style = style_for(&engine, PostType::OpenHouse, "modern");
    style.custom_heading = Some("Open Sunday 1-4pm".to_string());
    let layers = engine
        .render(&austin(), &branded(), &style, PostType::OpenHouse, &all_assets())
        .expect("renders");

    assert!(layers.position_of_text("Open Sunday 1-4pm").is_some());
    assert!(layers.position_of_text("Open House").is_none());
}

// ============================================================================
// Missing metrics
// ============================================================================

#[test]
fn test_missing_area_renders_placeholder() {
    let engine = Engine::default();
    let property = PropertyRecord {
        area: None,
        ..austin()
    };
    for template in ["classic", "modern", "bold", "elegant", "detailed"] {
        let style = style_for(&engine, PostType::JustListed, template);
        let layers = engine
            .render(&property, &branded(), &style, PostType::JustListed, &all_assets())
            .expect("renders");
        assert!(
            !main_blocks(&layers, "N/A").is_empty(),
            "{template} dropped the area cell"
        );
        assert!(!main_blocks(&layers, "3 beds").is_empty());
    }
}

#[test]
fn test_detailed_omits_row_without_beds() {
    let engine = Engine::default();
    let property = PropertyRecord {
        beds: None,
        ..austin()
    };

    let style = style_for(&engine, PostType::JustListed, "detailed");
    let layers = engine
        .render(&property, &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");
    assert!(main_blocks(&layers, "2 baths").is_empty());
    assert!(main_blocks(&layers, "N/A").is_empty());

    let style = style_for(&engine, PostType::JustListed, "classic");
    let layers = engine
        .render(&property, &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");
    assert_eq!(main_blocks(&layers, "N/A").len(), 1);
    assert_eq!(main_blocks(&layers, "2 baths").len(), 1);
}

// ============================================================================
// Assets and toggles
// ============================================================================

#[test]
fn test_missing_assets_drop_image_layers_only() {
    let engine = Engine::default();
    for template in ["classic", "modern", "bold", "elegant", "detailed"] {
        let style = style_for(&engine, PostType::JustSold, template);
        let full = engine
            .render(&austin(), &branded(), &style, PostType::JustSold, &all_assets())
            .expect("renders");
        let bare = engine
            .render(&austin(), &branded(), &style, PostType::JustSold, &NoAssets)
            .expect("renders without assets");

        assert_eq!(full.images(SlotRole::Background).count(), 1);
        assert_eq!(full.images(SlotRole::Logo).count(), 1);
        assert_eq!(full.images(SlotRole::Headshot).count(), 1);
        assert_eq!(bare.images(SlotRole::Background).count(), 0);
        assert_eq!(bare.images(SlotRole::Logo).count(), 0);
        assert_eq!(bare.images(SlotRole::Headshot).count(), 0);
        assert_eq!(texts(&full), texts(&bare), "{template} text changed");
    }
}

#[test]
fn test_headshot_ring_skipped_with_headshot() {
    let engine = Engine::default();
    let style = style_for(&engine, PostType::JustListed, "classic");
    let circles = |layers: &LayerList| {
        layers
            .iter()
            .filter(|layer| matches!(layer, Layer::Circle { .. }))
            .count()
    };

    let full = engine
        .render(&austin(), &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");
    let bare = engine
        .render(&austin(), &branded(), &style, PostType::JustListed, &NoAssets)
        .expect("renders");
    assert_eq!(circles(&full), 1);
    assert_eq!(circles(&bare), 0);
}

#[test]
fn test_visibility_toggles() {
    let engine = Engine::default();
    let mut style = style_for(&engine, PostType::JustListed, "bold");
    style.show_brokerage = false;
    style.show_realtor = false;
    style.show_signature = false;
    style.show_price = false;

    let layers = engine
        .render(&austin(), &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");
    assert_eq!(layers.images(SlotRole::Logo).count(), 0);
    assert_eq!(layers.images(SlotRole::Headshot).count(), 0);
    assert!(layers.position_of_text("Jane Doe").is_none());
    assert!(layers.position_of_text("$450,000").is_none());
}

// ============================================================================
// Colors and scale
// ============================================================================

#[test]
fn test_text_color_contrasts_with_light_panel() {
    let engine = Engine::default();
    let mut style = style_for(&engine, PostType::JustListed, "detailed");
    style.primary_color = HexColor::parse("#f5f5f5").expect("valid");

    let layers = engine
        .render(&austin(), &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");
    let (_, heading) = main_blocks(&layers, "Just Listed")[0];
    assert_eq!(heading.color.rgb().to_hex(), "#000000");
}

#[test]
fn test_shadows_readable_with_white_primary() {
    let engine = Engine::default();
    for template in ["classic", "bold", "elegant"] {
        let mut style = style_for(&engine, PostType::JustListed, template);
        style.primary_color = HexColor::parse("#ffffff").expect("valid");

        let layers = engine
            .render(&austin(), &branded(), &style, PostType::JustListed, &all_assets())
            .expect("renders");
        let heading = if template == "bold" { "JUST LISTED" } else { "Just Listed" };
        let (index, main) = main_blocks(&layers, heading)[0];
        let shadow = layers.as_slice()[index - 1]
            .as_text()
            .expect("shadow precedes the heading");
        assert!(shadow.shadow.is_some(), "{template} heading is shadowed");
        assert_ne!(shadow.color.rgb(), main.color.rgb(), "{template} shadow matches its text");
    }
}

#[test]
fn test_text_color_override_wins() {
    let engine = Engine::default();
    let mut style = style_for(&engine, PostType::JustListed, "classic");
    style.text_color = Some(HexColor::parse("#ffcc00").expect("valid"));

    let layers = engine
        .render(&austin(), &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");
    let (_, heading) = main_blocks(&layers, "Just Listed")[0];
    assert_eq!(heading.color.rgb().to_hex(), "#ffcc00");
}

#[test]
fn test_canvas_width_scales_geometry() {
    let config = EngineConfig {
        canvas_width: 540.0,
        ..EngineConfig::default()
    };
    let engine = Engine::new(config);
    let style = style_for(&engine, PostType::JustListed, "classic");
    let layers = engine
        .render(&austin(), &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");

    let (_, heading) = main_blocks(&layers, "Just Listed")[0];
    assert!((heading.x - 30.0).abs() < 1e-9);
    assert!((heading.font_size_px - 48.0).abs() < 1e-9);

    let Some(Layer::Image { w, h, .. }) = layers.images(SlotRole::Background).next() else {
        panic!("photo drawn");
    };
    assert!((w - 540.0).abs() < 1e-9);
    assert!((h - 675.0).abs() < 1e-9);
}

#[test]
fn test_layer_list_serializes_tagged() {
    let engine = Engine::default();
    let style = style_for(&engine, PostType::JustListed, "elegant");
    let layers = engine
        .render(&austin(), &branded(), &style, PostType::JustListed, &all_assets())
        .expect("renders");

    let json: serde_json::Value =
        serde_json::from_str(&layers.to_json().expect("serializes")).expect("valid json");
    let kinds: Vec<&str> = json
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|layer| layer["type"].as_str())
        .collect();
    assert_eq!(kinds.len(), layers.len());
    assert_eq!(kinds[0], "rectangle");
    assert!(kinds.contains(&"text_block"));
}
