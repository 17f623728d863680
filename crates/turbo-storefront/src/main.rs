//! TurboCommerce storefront server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use turbo_storefront::prelude::*;

/// Serve the TurboCommerce catalog views
#[derive(Parser)]
#[command(name = "turbo-storefront")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path (TOML, or JSON by extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog fixtures (JSON)
    #[arg(short, long)]
    fixtures: Option<PathBuf>,

    /// Override the configured port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => StorefrontConfig::load(path)?,
        None => StorefrontConfig::default(),
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    init_tracing(&config.logging);

    let fixtures = match &cli.fixtures {
        Some(path) => Fixtures::load(path)?,
        None => {
            warn!("No fixtures given, serving an empty catalog");
            Fixtures::default()
        }
    };
    info!(
        products = fixtures.products.len(),
        categories = fixtures.categories.len(),
        "catalog loaded"
    );

    let state = AppState::new(
        Arc::new(InMemoryCatalog::new(fixtures)),
        Arc::new(InMemoryCartStore::new()),
        config.settings()?,
        config.cookie_key()?,
    )?;

    serve(router(state), config.server.address()?).await?;
    Ok(())
}
