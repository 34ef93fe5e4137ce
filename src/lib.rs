//! Shopgrid
//!
//! Composites a periodic item-shop catalog into a single grid image: one
//! 256x256 card per item under a title/date banner, with the column count
//! and canvas size derived from the item count.
//!
//! # Design
//!
//! - **Parallel fan-out**: every card renders on its own blocking task;
//!   a single join barrier precedes sorting and layout.
//! - **Pure layout**: canvas dimensions and card coordinates are a
//!   deterministic function of the card count, nothing else.
//! - **Graceful degradation**: a background or icon that fails to load is
//!   substituted (default background, placeholder icon), never retried and
//!   never fatal to the batch.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use shopgrid::{DirAssetProvider, RenderOptions, ShopAssets, ShopDate};
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = shopgrid::source::read_catalog_file("shop.json".as_ref())?;
//! let date = ShopDate::parse(&catalog.last_update.date)?;
//! let assets = Arc::new(ShopAssets::load("assets".as_ref())?);
//! let provider = Arc::new(DirAssetProvider::new("assets")?);
//!
//! let runtime = tokio::runtime::Runtime::new()?;
//! let png = runtime.block_on(shopgrid::pipeline::render_shop(
//!     catalog.shop,
//!     &date,
//!     provider,
//!     assets,
//!     &RenderOptions::default(),
//! ))?;
//! shopgrid::sink::store_png("rendered".as_ref(), &png, &date.file_stem())?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod assets;
pub mod card;
pub mod catalog;
pub mod compose;
pub mod date;
pub mod layout;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod text;

#[cfg(test)]
pub(crate) mod testutil;

pub use assets::{AssetProvider, BackgroundKey, DirAssetProvider, ShopAssets};
pub use card::RenderedCard;
pub use catalog::{ShopCatalog, ShopItem};
pub use date::ShopDate;
pub use layout::CanvasLayout;
pub use sink::{FileSink, ImageSink};

/// Caller-tunable banner text. Card rendering and layout are not
/// configurable by design.
///
/// # Examples
///
/// ```
/// let opts = shopgrid::RenderOptions::default();
/// assert_eq!(opts.title, "ITEM SHOP");
/// assert!(opts.left_watermark.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Banner title drawn at the top of the canvas.
    pub title: String,
    /// Optional watermark in the bottom-left corner.
    pub left_watermark: String,
    /// Optional watermark in the bottom-right corner.
    pub right_watermark: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "ITEM SHOP".to_string(),
            left_watermark: String::new(),
            right_watermark: String::new(),
        }
    }
}
