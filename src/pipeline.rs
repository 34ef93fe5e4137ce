//! Fan-out/fan-in render pipeline.
//!
//! Phase 1 renders every card concurrently on blocking tasks; the single
//! `join_all` barrier guarantees all cards exist before Phase 2 (sort,
//! layout, composite) runs, because the column count and canvas size
//! depend on the total rendered count.

use std::sync::Arc;

use futures::future;
use log::{debug, info};

use crate::assets::{AssetProvider, ShopAssets};
use crate::card::{render_card, sort_cards};
use crate::catalog::{filter_items, ShopItem};
use crate::compose::{compose_canvas, encode_png, Banner};
use crate::date::ShopDate;
use crate::error::{Error, Result};
use crate::layout::CanvasLayout;
use crate::RenderOptions;

/// Render the full shop image and return it as PNG bytes.
///
/// Fails with [`Error::CatalogData`] when the catalog is empty or no item
/// survives category filtering; per-asset faults never fail the batch.
pub async fn render_shop(
    items: Vec<ShopItem>,
    date: &ShopDate,
    provider: Arc<dyn AssetProvider>,
    assets: Arc<ShopAssets>,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    if items.is_empty() {
        return Err(Error::CatalogData("catalog contains no items".into()));
    }
    let items = filter_items(items);
    if items.is_empty() {
        return Err(Error::CatalogData(
            "no renderable items after category filtering".into(),
        ));
    }
    info!("rendering {} shop items", items.len());

    let mut tasks = Vec::with_capacity(items.len());
    for item in items {
        let provider = Arc::clone(&provider);
        let assets = Arc::clone(&assets);
        tasks.push(tokio::task::spawn_blocking(move || {
            let card = render_card(&item, provider.as_ref(), &assets);
            debug!("card ready: {:?}", card.label);
            card
        }));
    }

    // Join barrier: every card must exist before sorting and layout.
    let mut cards = Vec::with_capacity(tasks.len());
    for joined in future::join_all(tasks).await {
        cards.push(joined.map_err(|e| Error::Task(e.to_string()))?);
    }

    sort_cards(&mut cards);
    let layout = CanvasLayout::for_count(cards.len())?;
    info!(
        "composing {}x{} canvas ({} columns, {} rows)",
        layout.width, layout.height, layout.columns, layout.rows
    );

    let banner = Banner {
        title: options.title.clone(),
        date_line: date.banner_line(),
        left_watermark: options.left_watermark.clone(),
        right_watermark: options.right_watermark.clone(),
    };
    let canvas = compose_canvas(&cards, &layout, &assets, &banner)?;
    encode_png(&canvas)
}
