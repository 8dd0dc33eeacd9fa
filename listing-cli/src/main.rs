//! # Listing Canvas CLI
//!
//! Renders announcement posts to layer-list JSON or SVG.

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use listing_cli::{CliArgs, CliConfig, Command, RenderInputs};
use listing_core::Engine;
use listing_renderer::SvgExporter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,listing_core=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,listing_core=debug"));

    // Logs go to stderr so rendered output can be piped
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = CliConfig::load(args.config.as_deref()).await?;
    let engine = Engine::new(config.engine);

    match args.command {
        Command::Variants { post_type } => {
            print!("{}", listing_cli::variants(&engine, post_type));
        }
        Command::Render(render) => {
            let inputs = RenderInputs::load(&render).await?;
            let exporter = SvgExporter::new(config.export);
            let bytes = listing_cli::render(&engine, &exporter, &inputs, &render)?;

            match &render.out {
                Some(path) => {
                    tokio::fs::write(path, &bytes)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    stdout.flush()?;
                }
            }
        }
    }

    Ok(())
}
