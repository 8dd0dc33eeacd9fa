//! Engine facade: registry plus configuration, with a font readiness gate.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::fonts::FontProvider;
use crate::layer::LayerList;
use crate::model::{AssetCatalog, PostType, PropertyRecord, UserPreferences};
use crate::style::{CanvasStyle, StyleMachine};
use crate::templates::{TemplateRegistry, VariantDescriptor};

/// Entry point for pickers and render surfaces.
///
/// # Example
///
/// ```
/// use listing_core::{Engine, NoAssets, PostType, PropertyRecord, UserPreferences};
///
/// let engine = Engine::default();
/// let mut styles = engine.style_machine();
/// let style = styles.initialize("post-1", PostType::JustListed).unwrap().clone();
///
/// let property = PropertyRecord {
///     address_line: "123 Main St".into(),
///     city: "Austin".into(),
///     state_or_region: "TX".into(),
///     beds: Some(3),
///     ..PropertyRecord::default()
/// };
/// let layers = engine
///     .render(&property, &UserPreferences::default(), &style, PostType::JustListed, &NoAssets)
///     .unwrap();
/// assert!(layers.position_of_text("3 beds").is_some());
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    registry: TemplateRegistry,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the built-in variants.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_registry(TemplateRegistry::new(), config)
    }

    /// Create an engine over an explicit registry.
    #[must_use]
    pub fn with_registry(registry: TemplateRegistry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// The variant registry.
    #[must_use]
    pub const fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// The injected configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Variants offered for `post_type`.
    #[must_use]
    pub fn list_variants(&self, post_type: PostType) -> Vec<VariantDescriptor> {
        self.registry.list_variants(post_type)
    }

    /// A style state machine bound to this engine's registry.
    #[must_use]
    pub fn style_machine(&self) -> StyleMachine<'_> {
        StyleMachine::new(&self.registry, &self.config)
    }

    /// Render the style's template.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownTemplate`] if the style's template is not
    /// offered for `post_type`.
    pub fn render(
        &self,
        property: &PropertyRecord,
        prefs: &UserPreferences,
        style: &CanvasStyle,
        post_type: PostType,
        assets: &dyn AssetCatalog,
    ) -> EngineResult<LayerList> {
        self.registry.render(
            &style.template_id,
            property,
            prefs,
            style,
            post_type,
            assets,
            &self.config,
        )
    }

    /// Render once `fonts` reports ready.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::FontsNotReady`] while fonts are loading, otherwise
    /// the errors of [`render`](Self::render).
    pub fn render_when_ready(
        &self,
        fonts: &dyn FontProvider,
        property: &PropertyRecord,
        prefs: &UserPreferences,
        style: &CanvasStyle,
        post_type: PostType,
        assets: &dyn AssetCatalog,
    ) -> EngineResult<LayerList> {
        if !fonts.ready() {
            tracing::debug!("Render deferred until fonts load");
            return Err(EngineError::FontsNotReady);
        }
        self.render(property, prefs, style, post_type, assets)
    }
}
