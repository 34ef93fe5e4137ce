use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use shopgrid::sink::ImageSink;
use shopgrid::{
    pipeline, source, DirAssetProvider, FileSink, RenderOptions, ShopAssets, ShopCatalog, ShopDate,
};

/// Render a shop catalog into a single composite grid image.
#[derive(Parser)]
#[command(name = "shopgrid", version, about)]
struct Cli {
    /// Path to an already-fetched catalog JSON file
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Shop endpoint to fetch the catalog from
    #[cfg(feature = "http")]
    #[arg(long)]
    url: Option<String>,

    /// Authorization token sent with the catalog fetch
    /// (falls back to the SHOP_API_TOKEN environment variable)
    #[cfg(feature = "http")]
    #[arg(long)]
    token: Option<String>,

    /// Asset directory (backgrounds, overlays, fonts)
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Output directory for the rendered image
    #[arg(long, default_value = "rendered")]
    out: PathBuf,

    /// Banner title
    #[arg(long, default_value = "ITEM SHOP")]
    title: String,

    /// Watermark drawn in the bottom-left corner
    #[arg(long, default_value = "")]
    left_watermark: String,

    /// Watermark drawn in the bottom-right corner
    #[arg(long, default_value = "")]
    right_watermark: String,
}

fn load_catalog(cli: &Cli) -> anyhow::Result<ShopCatalog> {
    if let Some(path) = &cli.catalog {
        return source::read_catalog_file(path)
            .with_context(|| format!("reading catalog {}", path.display()));
    }
    #[cfg(feature = "http")]
    if let Some(url) = &cli.url {
        let token = cli
            .token
            .clone()
            .or_else(|| std::env::var("SHOP_API_TOKEN").ok());
        return source::fetch_catalog(url, token.as_deref()).context("fetching catalog");
    }
    bail!("no catalog given: pass --catalog FILE or --url ENDPOINT");
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    info!("checking shop items");
    let catalog = load_catalog(&cli)?;
    let date = ShopDate::parse(&catalog.last_update.date)?;
    info!("catalog for {} with {} entries", date.file_stem(), catalog.shop.len());

    let assets = Arc::new(ShopAssets::load(&cli.assets).context("loading shared assets")?);
    let provider = Arc::new(DirAssetProvider::new(&cli.assets)?);

    let options = RenderOptions {
        title: cli.title.clone(),
        left_watermark: cli.left_watermark.clone(),
        right_watermark: cli.right_watermark.clone(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let png = runtime.block_on(pipeline::render_shop(
        catalog.shop,
        &date,
        provider,
        assets,
        &options,
    ))?;

    let path = FileSink::new(&cli.out).store(&png, &date.file_stem())?;
    println!("{}", path.display());
    Ok(())
}
