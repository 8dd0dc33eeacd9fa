//! # Canvas Style
//!
//! The per-post visual customization record, the field-level mutations users
//! make to it, and the state machine that only accepts a mutation once it has
//! been persisted.
//!
//! ```text
//! Uninitialized ──initialize/restore──► Default
//!                                          │ mutate
//!                                          ▼
//!             ┌──────── persist ok ──── Pending ──── persist failed ────┐
//!             ▼                            ▲                            ▼
//!         Confirmed ───────── mutate ──────┴─────────── mutate ──── Rejected
//! ```

mod machine;
mod persistence;

pub use machine::{MutationTicket, PendingMutation, StyleMachine, StylePhase};
pub use persistence::{MemoryPersistence, PersistError, StylePersistence};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::{HexColor, Rgb, WHITE};
use crate::config::{EngineConfig, SECONDARY_TINT};
use crate::error::{EngineError, EngineResult};
use crate::model::PostType;
use crate::templates::TemplateRegistry;

/// Visual customization of one post.
///
/// Serializes to the flat key/value form the persistence collaborator stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasStyle {
    /// Selected template variant; always offered for the post's type.
    pub template_id: String,
    /// Brand color.
    pub primary_color: HexColor,
    /// Accent color; derived from primary when unset.
    pub secondary_color: Option<HexColor>,
    /// Text color override; per-surface defaults apply when unset.
    pub text_color: Option<HexColor>,
    /// Draw the brokerage logo.
    pub show_brokerage: bool,
    /// Draw the realtor headshot.
    pub show_realtor: bool,
    /// Draw the agent signature.
    pub show_signature: bool,
    /// Use the price as sub-heading when no custom one is set.
    pub show_price: bool,
    /// Replaces the post type's heading.
    pub custom_heading: Option<String>,
    /// Replaces the price sub-heading.
    pub custom_subheading: Option<String>,
    /// Free text shown by variants that have room for it.
    pub custom_description: Option<String>,
    /// Logical font id.
    pub selected_font_id: String,
}

impl CanvasStyle {
    /// Defaults for a post with no stored style.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownTemplate`] if the registry offers no
    /// variant for `post_type`.
    pub fn initial(
        post_type: PostType,
        registry: &TemplateRegistry,
        config: &EngineConfig,
    ) -> EngineResult<Self> {
        let template_id =
            registry
                .default_variant(post_type)
                .ok_or_else(|| EngineError::UnknownTemplate {
                    id: String::new(),
                    post_type,
                })?;
        Ok(Self {
            template_id: template_id.to_string(),
            primary_color: config.default_primary_color,
            secondary_color: None,
            text_color: None,
            show_brokerage: true,
            show_realtor: true,
            show_signature: true,
            show_price: true,
            custom_heading: None,
            custom_subheading: None,
            custom_description: None,
            selected_font_id: config.default_font_id.clone(),
        })
    }

    /// Effective accent color.
    #[must_use]
    pub fn secondary(&self) -> Rgb {
        self.secondary_color.map_or_else(
            || self.primary_color.rgb().mix(WHITE, SECONDARY_TINT),
            HexColor::rgb,
        )
    }

    /// Flat key/value form.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialization`] if serialization fails.
    pub fn to_persisted_json(&self) -> EngineResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// One field-level edit of a [`CanvasStyle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum StyleMutation {
    /// Switch template.
    TemplateId(String),
    /// Set the brand color.
    PrimaryColor(HexColor),
    /// Set or clear the accent color.
    SecondaryColor(Option<HexColor>),
    /// Set or clear the text color override.
    TextColor(Option<HexColor>),
    /// Toggle the brokerage logo.
    ShowBrokerage(bool),
    /// Toggle the realtor headshot.
    ShowRealtor(bool),
    /// Toggle the signature.
    ShowSignature(bool),
    /// Toggle the price sub-heading.
    ShowPrice(bool),
    /// Set or clear the custom heading.
    CustomHeading(Option<String>),
    /// Set or clear the custom sub-heading.
    CustomSubheading(Option<String>),
    /// Set or clear the custom description.
    CustomDescription(Option<String>),
    /// Select a font.
    SelectedFontId(String),
}

impl StyleMutation {
    /// Persisted key of the edited field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::TemplateId(_) => "templateId",
            Self::PrimaryColor(_) => "primaryColor",
            Self::SecondaryColor(_) => "secondaryColor",
            Self::TextColor(_) => "textColor",
            Self::ShowBrokerage(_) => "showBrokerage",
            Self::ShowRealtor(_) => "showRealtor",
            Self::ShowSignature(_) => "showSignature",
            Self::ShowPrice(_) => "showPrice",
            Self::CustomHeading(_) => "customHeading",
            Self::CustomSubheading(_) => "customSubheading",
            Self::CustomDescription(_) => "customDescription",
            Self::SelectedFontId(_) => "selectedFontId",
        }
    }

    /// Apply the edit to `style`.
    pub fn apply(&self, style: &mut CanvasStyle) {
        match self {
            Self::TemplateId(id) => style.template_id.clone_from(id),
            Self::PrimaryColor(color) => style.primary_color = *color,
            Self::SecondaryColor(color) => style.secondary_color = *color,
            Self::TextColor(color) => style.text_color = *color,
            Self::ShowBrokerage(on) => style.show_brokerage = *on,
            Self::ShowRealtor(on) => style.show_realtor = *on,
            Self::ShowSignature(on) => style.show_signature = *on,
            Self::ShowPrice(on) => style.show_price = *on,
            Self::CustomHeading(text) => style.custom_heading.clone_from(text),
            Self::CustomSubheading(text) => style.custom_subheading.clone_from(text),
            Self::CustomDescription(text) => style.custom_description.clone_from(text),
            Self::SelectedFontId(id) => style.selected_font_id.clone_from(id),
        }
    }

    /// Single-key JSON object submitted to persistence.
    #[must_use]
    pub fn patch(&self) -> Value {
        let color = |c: &Option<HexColor>| c.map_or(Value::Null, |c| Value::String(c.to_string()));
        let text = |t: &Option<String>| t.clone().map_or(Value::Null, Value::String);
        let value = match self {
            Self::TemplateId(s) | Self::SelectedFontId(s) => Value::String(s.clone()),
            Self::PrimaryColor(c) => Value::String(c.to_string()),
            Self::SecondaryColor(c) | Self::TextColor(c) => color(c),
            Self::ShowBrokerage(on)
            | Self::ShowRealtor(on)
            | Self::ShowSignature(on)
            | Self::ShowPrice(on) => Value::Bool(*on),
            Self::CustomHeading(t) | Self::CustomSubheading(t) | Self::CustomDescription(t) => {
                text(t)
            }
        };
        let mut patch = Map::new();
        patch.insert(self.field().to_string(), value);
        Value::Object(patch)
    }
}

/// Merge a stored flat record onto `base`.
///
/// Unknown keys are ignored and absent or `null` keys keep `base`'s value;
/// present colors must parse.
pub(crate) fn merge_persisted(base: CanvasStyle, stored: &Value) -> EngineResult<CanvasStyle> {
    let Some(record) = stored.as_object() else {
        return Ok(base);
    };
    let mut style = base;

    let string = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);
    let flag = |key: &str| record.get(key).and_then(Value::as_bool);
    let color = |key: &str| -> EngineResult<Option<HexColor>> {
        match record.get(key) {
            Some(Value::String(hex)) => HexColor::parse(hex).map(Some),
            Some(Value::Null) | None => Ok(None),
            Some(other) => Err(EngineError::InvalidHex(other.to_string())),
        }
    };

    if let Some(id) = string("templateId") {
        style.template_id = id;
    }
    if let Some(primary) = color("primaryColor")? {
        style.primary_color = primary;
    }
    if let Some(secondary) = color("secondaryColor")? {
        style.secondary_color = Some(secondary);
    }
    if let Some(text) = color("textColor")? {
        style.text_color = Some(text);
    }
    if let Some(on) = flag("showBrokerage") {
        style.show_brokerage = on;
    }
    if let Some(on) = flag("showRealtor") {
        style.show_realtor = on;
    }
    if let Some(on) = flag("showSignature") {
        style.show_signature = on;
    }
    if let Some(on) = flag("showPrice") {
        style.show_price = on;
    }
    if let Some(heading) = string("customHeading") {
        style.custom_heading = Some(heading);
    }
    if let Some(subheading) = string("customSubheading") {
        style.custom_subheading = Some(subheading);
    }
    if let Some(description) = string("customDescription") {
        style.custom_description = Some(description);
    }
    if let Some(font) = string("selectedFontId") {
        style.selected_font_id = font;
    }
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn initial() -> CanvasStyle {
        CanvasStyle::initial(
            PostType::JustListed,
            &TemplateRegistry::new(),
            &EngineConfig::default(),
        )
        .expect("default variant")
    }

    #[test]
    fn test_initial_defaults() {
        let style = initial();
        assert_eq!(style.template_id, "classic");
        assert_eq!(style.primary_color.to_string(), "#000000");
        assert!(style.show_brokerage && style.show_realtor && style.show_signature);
        assert!(style.show_price);
        assert_eq!(style.selected_font_id, "playfair");
        assert!(style.secondary_color.is_none());
    }

    #[test]
    fn test_secondary_derived_from_primary() {
        let mut style = initial();
        assert_eq!(style.secondary().to_hex(), "#4d4d4d");

        style.secondary_color = Some(HexColor::parse("#c0ffee").expect("valid"));
        assert_eq!(style.secondary().to_hex(), "#c0ffee");
    }

    #[test]
    fn test_persisted_form_is_flat() {
        let value = initial().to_persisted_json().expect("serializes");
        let record = value.as_object().expect("object");
        assert_eq!(record["templateId"], "classic");
        assert_eq!(record["primaryColor"], "#000000");
        assert_eq!(record["secondaryColor"], Value::Null);
        assert!(record.values().all(|v| !v.is_object() && !v.is_array()));
    }

    #[test]
    fn test_mutation_patch() {
        let patch = StyleMutation::PrimaryColor(HexColor::parse("1A2B3C").expect("valid")).patch();
        assert_eq!(patch, json!({ "primaryColor": "#1a2b3c" }));

        let patch = StyleMutation::CustomHeading(None).patch();
        assert_eq!(patch, json!({ "customHeading": null }));

        let patch = StyleMutation::ShowPrice(false).patch();
        assert_eq!(patch, json!({ "showPrice": false }));
    }

    #[test]
    fn test_mutation_apply() {
        let mut style = initial();
        StyleMutation::CustomSubheading(Some("$1,250,000".into())).apply(&mut style);
        StyleMutation::ShowRealtor(false).apply(&mut style);
        assert_eq!(style.custom_subheading.as_deref(), Some("$1,250,000"));
        assert!(!style.show_realtor);
    }

    #[test]
    fn test_merge_ignores_unknown_keys() {
        let stored = json!({
            "primaryColor": "#FF0000",
            "showSignature": false,
            "legacyBannerStyle": "ribbon",
        });
        let style = merge_persisted(initial(), &stored).expect("merges");
        assert_eq!(style.primary_color.to_string(), "#ff0000");
        assert!(!style.show_signature);
        assert_eq!(style.template_id, "classic");
    }

    #[test]
    fn test_merge_rejects_bad_color() {
        let stored = json!({ "textColor": "#12345" });
        assert!(matches!(
            merge_persisted(initial(), &stored),
            Err(EngineError::InvalidHex(_))
        ));
    }
}
