//! # Listing Canvas Renderer
//!
//! Rendering surfaces for the layer lists produced by `listing-core`.
//! Every surface paints layers strictly in list order, back to front.
//!
//! ## Surfaces
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            RenderBackend trait              │
//! ├──────────────────────┬──────────────────────┤
//! │ TraceBackend         │ SvgBackend           │
//! │ (logs paint order)   │ (SVG document)       │
//! └──────────────────────┴──────────────────────┘
//!                SvgExporter · ExportFormat
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod error;
pub mod export;

pub use backend::svg::SvgBackend;
pub use backend::trace::TraceBackend;
pub use backend::RenderBackend;
pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat, SvgExporter};

/// Available rendering surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Logs each layer; draws nothing.
    Trace,
    /// Produces an SVG document.
    Svg,
}
