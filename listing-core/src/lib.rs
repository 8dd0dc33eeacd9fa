//! # Listing Canvas Core
//!
//! Composition engine for branded real-estate announcement images.
//! Turns a property record, the user's branding and a per-post canvas style
//! into an ordered list of paintable layers for any rendering surface.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                listing-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Canvas Style    │  Template Registry       │
//! │  - Defaults      │  - classic · modern      │
//! │  - Mutations     │  - bold · elegant        │
//! │  - Persist queue │  - detailed              │
//! ├─────────────────────────────────────────────┤
//! │  Color · Fonts · Placement · Paragraphs     │
//! ├─────────────────────────────────────────────┤
//! │  LayerList (paint order, back to front)     │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod fonts;
pub mod layer;
pub mod model;
pub mod paragraph;
pub mod placement;
pub mod style;
pub mod templates;

pub use color::{contrast_color, hex_to_rgb, relative_luminance, HexColor, Rgb, Rgba};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use fonts::{FontProvider, FontSpec, StaticFonts};
pub use layer::{GradientAxis, ImageFit, Layer, LayerList, SlotRole, TextAlign, TextBlock};
pub use model::{
    Area, AreaUnit, AssetCatalog, ImageRef, NoAssets, PostType, PropertyRecord, UserPreferences,
};
pub use placement::{ImageInfo, Placement, Slot};
pub use style::{
    CanvasStyle, MemoryPersistence, MutationTicket, PendingMutation, PersistError, StyleMachine,
    StyleMutation, StylePersistence, StylePhase,
};
pub use templates::{
    MissingMetrics, RenderContext, TemplateRegistry, TemplateVariant, VariantDescriptor,
};

/// Listing core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
