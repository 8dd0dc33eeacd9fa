//! # Template Variant Registry
//!
//! A closed set of named layout strategies. Each variant is a pure function
//! from a [`RenderContext`] to a [`LayerList`]; the registry owns the set,
//! offers it to pickers per post type and dispatches renders by id.
//!
//! ```text
//! ┌──────────────┐   list_variants(post_type)   ┌────────────┐
//! │  picker UI   │ ◄─────────────────────────── │            │
//! └──────────────┘                              │  Template  │
//! ┌──────────────┐   render(id, ctx)            │  Registry  │
//! │ style state  │ ───────────────────────────► │            │
//! └──────────────┘                              └─────┬──────┘
//!                                                     │ Scene (compose)
//!                         color · fonts · placement · paragraph
//! ```

mod bold;
mod classic;
pub(crate) mod compose;
mod detailed;
mod elegant;
mod modern;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::layer::LayerList;
use crate::model::{AssetCatalog, PostType, PropertyRecord, UserPreferences};
use crate::style::CanvasStyle;

pub use bold::Bold;
pub use classic::Classic;
pub use detailed::Detailed;
pub use elegant::Elegant;
pub use modern::Modern;

/// How a variant treats absent beds/baths/area values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingMetrics {
    /// Each absent value is drawn as `"N/A"`.
    Placeholder,
    /// The whole row is dropped when the bed count is absent; other absent
    /// values are drawn as `"N/A"`.
    OmitRowWhenFirstMissing,
}

/// Picker entry for a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDescriptor {
    /// Stable id stored in canvas styles.
    pub id: String,
    /// Human-readable label.
    pub label: String,
}

/// Everything one render pass reads.
///
/// The style is an owned snapshot so that a pass is reproducible regardless of
/// later edits.
pub struct RenderContext<'a> {
    /// Property being announced.
    pub property: &'a PropertyRecord,
    /// User branding.
    pub prefs: &'a UserPreferences,
    /// Snapshot of the post's canvas style.
    pub style: CanvasStyle,
    /// Kind of announcement.
    pub post_type: PostType,
    /// Decoded images available to the pass.
    pub assets: &'a dyn AssetCatalog,
    /// Engine defaults.
    pub config: &'a EngineConfig,
}

/// A named layout strategy.
pub trait TemplateVariant: Send + Sync {
    /// Stable id.
    fn id(&self) -> &'static str;

    /// Human-readable label.
    fn label(&self) -> &'static str;

    /// Missing-metrics policy this variant follows.
    fn missing_metrics(&self) -> MissingMetrics {
        MissingMetrics::Placeholder
    }

    /// Whether the variant is offered for `post_type`.
    fn supports(&self, _post_type: PostType) -> bool {
        true
    }

    /// Compose the layers for one post, back to front.
    fn render(&self, ctx: &RenderContext<'_>) -> LayerList;
}

/// The set of known variants.
pub struct TemplateRegistry {
    variants: Vec<Box<dyn TemplateVariant>>,
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.variants.iter().map(|v| v.id()))
            .finish()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// Registry with the built-in variants, in picker order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            variants: vec![
                Box::new(Classic),
                Box::new(Modern),
                Box::new(Bold),
                Box::new(Elegant),
                Box::new(Detailed),
            ],
        }
    }

    /// Registry with an explicit variant set.
    #[must_use]
    pub fn with_variants(variants: Vec<Box<dyn TemplateVariant>>) -> Self {
        Self { variants }
    }

    /// Variants offered for `post_type`, in picker order.
    #[must_use]
    pub fn list_variants(&self, post_type: PostType) -> Vec<VariantDescriptor> {
        self.offered(post_type)
            .map(|v| VariantDescriptor {
                id: v.id().to_string(),
                label: v.label().to_string(),
            })
            .collect()
    }

    /// First variant offered for `post_type`.
    #[must_use]
    pub fn default_variant(&self, post_type: PostType) -> Option<&'static str> {
        self.offered(post_type).next().map(|v| v.id())
    }

    /// Whether `id` is offered for `post_type`.
    #[must_use]
    pub fn contains(&self, post_type: PostType, id: &str) -> bool {
        self.find(post_type, id).is_some()
    }

    /// Look up a variant offered for `post_type`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownTemplate`] if no such variant is offered.
    pub fn variant(&self, post_type: PostType, id: &str) -> EngineResult<&dyn TemplateVariant> {
        self.find(post_type, id)
            .ok_or_else(|| EngineError::UnknownTemplate {
                id: id.to_string(),
                post_type,
            })
    }

    /// Render `variant_id` for one post.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownTemplate`] if the id is not offered for
    /// `post_type`.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        variant_id: &str,
        property: &PropertyRecord,
        prefs: &UserPreferences,
        style: &CanvasStyle,
        post_type: PostType,
        assets: &dyn AssetCatalog,
        config: &EngineConfig,
    ) -> EngineResult<LayerList> {
        let variant = self.variant(post_type, variant_id)?;
        let ctx = RenderContext {
            property,
            prefs,
            style: style.clone(),
            post_type,
            assets,
            config,
        };
        let layers = variant.render(&ctx);
        tracing::debug!(
            variant = variant_id,
            %post_type,
            layers = layers.len(),
            "Rendered template"
        );
        Ok(layers)
    }

    fn offered(
        &self,
        post_type: PostType,
    ) -> impl Iterator<Item = &(dyn TemplateVariant + 'static)> + '_ {
        self.variants
            .iter()
            .map(|v| &**v)
            .filter(move |v| v.supports(post_type))
    }

    fn find(&self, post_type: PostType, id: &str) -> Option<&dyn TemplateVariant> {
        self.offered(post_type).find(|v| v.id() == id)
    }
}
