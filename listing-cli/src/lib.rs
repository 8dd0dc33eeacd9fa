//! # Listing Canvas CLI
//!
//! Renders announcement posts from JSON inputs.
//!
//! ## Usage
//!
//! ```bash
//! listing-canvas render --property house.json --prefs me.json \
//!     --post-type just-listed --template bold --format svg --out post.svg
//! listing-canvas variants --post-type open-house
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Optional JSON file overriding engine and export defaults
//! - `RenderInputs` - Property, branding, stored style and asset manifest,
//!   loaded concurrently

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use listing_core::{
    Engine, EngineConfig, ImageInfo, PostType, PropertyRecord, StaticFonts, UserPreferences,
};
use listing_renderer::{ExportConfig, ExportFormat, SvgExporter};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Command-line arguments for listing-canvas.
#[derive(Debug, Clone, Parser)]
#[command(name = "listing-canvas")]
#[command(about = "Render branded real-estate announcement images")]
#[command(version)]
pub struct CliArgs {
    /// JSON file overriding engine and export defaults
    #[arg(long, global = true, env = "LISTING_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render one post
    Render(RenderArgs),
    /// List the template variants offered for a post type
    Variants {
        /// Post type, e.g. `just-sold`
        #[arg(long, value_parser = parse_post_type)]
        post_type: PostType,
    },
}

/// Arguments of `render`.
#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Property record JSON
    #[arg(long)]
    pub property: PathBuf,

    /// User preferences JSON
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Stored canvas style JSON (flat key/value form)
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Asset manifest JSON mapping image URLs to `{ "width", "height" }`
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Post type, e.g. `just-listed`
    #[arg(long, value_parser = parse_post_type)]
    pub post_type: PostType,

    /// Template id overriding the stored style
    #[arg(long)]
    pub template: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json", env = "LISTING_FORMAT")]
    pub format: OutputFormat,

    /// Output file; stdout when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Output formats of `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Layer list JSON.
    Json,
    /// SVG document.
    Svg,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Svg => Self::Svg,
        }
    }
}

fn parse_post_type(value: &str) -> Result<PostType, String> {
    value.parse()
}

/// Contents of the `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Engine defaults.
    pub engine: EngineConfig,
    /// Export settings.
    pub export: ExportConfig,
}

impl CliConfig {
    /// Load from `path`, or defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => load_json(path).await,
            None => Ok(Self::default()),
        }
    }
}

/// Everything a render reads from disk.
#[derive(Debug, Clone, Default)]
pub struct RenderInputs {
    /// The announced property.
    pub property: PropertyRecord,
    /// User branding.
    pub prefs: UserPreferences,
    /// Stored flat style, if any.
    pub style: Option<serde_json::Value>,
    /// Decoded image sizes by URL.
    pub assets: HashMap<String, ImageInfo>,
}

impl RenderInputs {
    /// Read and parse every input file concurrently.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file that could not be read or parsed, or
    /// if the property record is invalid.
    pub async fn load(args: &RenderArgs) -> anyhow::Result<Self> {
        let (property, prefs, style, assets) = tokio::try_join!(
            load_json::<PropertyRecord>(&args.property),
            load_optional::<UserPreferences>(args.prefs.as_deref()),
            load_optional::<serde_json::Value>(args.style.as_deref()),
            load_optional::<HashMap<String, ImageInfo>>(args.assets.as_deref()),
        )?;
        property
            .validate()
            .with_context(|| format!("Invalid property in {}", args.property.display()))?;

        Ok(Self {
            property,
            prefs: prefs.unwrap_or_default(),
            style,
            assets: assets.unwrap_or_default(),
        })
    }
}

/// Render a post and encode it.
///
/// # Errors
///
/// Returns an error if the stored style or template is invalid for the post
/// type, or if export fails.
pub fn render(
    engine: &Engine,
    exporter: &SvgExporter,
    inputs: &RenderInputs,
    args: &RenderArgs,
) -> anyhow::Result<Vec<u8>> {
    let mut machine = engine.style_machine();
    let mut style = match &inputs.style {
        Some(stored) => machine.restore("cli", args.post_type, stored),
        None => machine.initialize("cli", args.post_type),
    }
    .context("Failed to load canvas style")?
    .clone();
    if let Some(template) = &args.template {
        style.template_id.clone_from(template);
    }

    let layers = engine
        .render_when_ready(
            &StaticFonts,
            &inputs.property,
            &inputs.prefs,
            &style,
            args.post_type,
            &inputs.assets,
        )
        .with_context(|| format!("Failed to render template {:?}", style.template_id))?;
    tracing::info!(
        template = %style.template_id,
        post_type = %args.post_type,
        layers = layers.len(),
        "Post rendered"
    );

    let config = engine.config();
    let bytes = exporter.export(
        &layers,
        config.canvas_width,
        config.canvas_height(),
        args.format.into(),
    )?;
    Ok(bytes)
}

/// Variant listing, one `id<TAB>label` line each.
#[must_use]
pub fn variants(engine: &Engine, post_type: PostType) -> String {
    engine
        .list_variants(post_type)
        .into_iter()
        .map(|v| format!("{}\t{}\n", v.id, v.label))
        .collect()
}

/// Read and parse a JSON file.
///
/// # Errors
///
/// Returns an error naming `path` if it cannot be read or parsed.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

async fn load_optional<T: DeserializeOwned>(path: Option<&Path>) -> anyhow::Result<Option<T>> {
    match path {
        Some(path) => load_json(path).await.map(Some),
        None => Ok(None),
    }
}
