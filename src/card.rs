//! Per-item card rendering and the total order over rendered cards.
//!
//! Each card is built independently with no shared mutable state, so the
//! pipeline can fan the items out across blocking tasks. Asset failures
//! never escape this module; the only recovery strategy is substitution
//! (default background, placeholder icon) so one broken asset cannot stall
//! the batch.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{debug, warn};

use crate::assets::{AssetProvider, BackgroundKey, ShopAssets, DEFAULT_RARITY};
use crate::catalog::ShopItem;
use crate::layout::CARD_SIZE;

/// Width the label is measured against when deciding the overlay variant.
const LABEL_MEASURE_WIDTH: u32 = 245;
/// Band the label is centered in when drawn.
const LABEL_BAND_X: i32 = 8;
const LABEL_BAND_WIDTH: u32 = 240;
/// Label anchor for the small overlay variant.
const LABEL_Y_SMALL: i32 = 198;
/// Label anchor for the large overlay variant.
const LABEL_Y_LARGE: i32 = 178;
/// Measured label heights up to this use the small overlay.
const SMALL_LABEL_MAX_HEIGHT: u32 = 22;
/// Fill used when even the default background cannot be loaded.
const FALLBACK_FILL: Rgba<u8> = Rgba([30, 30, 30, 255]);

/// A finished card plus its sort metadata. Created once per item,
/// never mutated afterwards.
pub struct RenderedCard {
    /// Uppercased display name.
    pub label: String,
    pub is_bundle: bool,
    pub series_id: Option<String>,
    pub rarity_id: Option<String>,
    /// Externally supplied ordering weight; primary sort key.
    pub sort_rank: i64,
    /// Always exactly 256x256.
    pub image: RgbaImage,
}

/// Render one item into a finished card. Infallible: every asset failure
/// is absorbed by substituting a fallback.
pub fn render_card(
    item: &ShopItem,
    provider: &dyn AssetProvider,
    assets: &ShopAssets,
) -> RenderedCard {
    let mut card = fit_card(load_background(item, provider));
    let icon = fit_card(load_icon(item, provider, assets));
    imageops::overlay(&mut card, &icon, 0, 0);

    let label = item.display_name.to_uppercase();
    let label_height = assets.label_font.wrapped_height(&label, LABEL_MEASURE_WIDTH);
    let label_y = if label_height <= SMALL_LABEL_MAX_HEIGHT {
        imageops::overlay(&mut card, &assets.overlay_small, 0, 0);
        LABEL_Y_SMALL
    } else {
        imageops::overlay(&mut card, &assets.overlay_large, 0, 0);
        LABEL_Y_LARGE
    };
    assets
        .label_font
        .draw_centered(&mut card, LABEL_BAND_X, LABEL_BAND_WIDTH, label_y, &label);

    if let Some(text) = badge_text(item) {
        let text_w = assets.badge_font.width(&text);
        let mut tag = RgbaImage::new(text_w + 4, 20);
        assets.badge_font.draw(&mut tag, 2, 4, &text);
        imageops::overlay(&mut card, &tag, 243 - i64::from(text_w), 226);
    }

    let price = item.price.final_price.to_string();
    let tag_w = 26 + 5 + assets.label_font.width(&price);
    let mut tag = RgbaImage::new(tag_w, 26);
    let coin = fit(&assets.currency_icon, 26, 26);
    imageops::overlay(&mut tag, &coin, 1, 0);
    assets.label_font.draw(&mut tag, 31, 5, &price);
    imageops::overlay(&mut card, &tag, 128 - i64::from(tag_w) / 2, 220);

    RenderedCard {
        label,
        is_bundle: item.is_bundle(),
        series_id: item.series_id().map(str::to_owned),
        rarity_id: item.rarity_id().map(str::to_owned),
        sort_rank: item.sort_priority,
        image: card,
    }
}

/// Badge shown in the bottom-right corner for multi-item entries:
/// the sub-item count for bundles, `+N` extras otherwise.
pub fn badge_text(item: &ShopItem) -> Option<String> {
    if item.is_bundle() {
        Some(item.granted.len().to_string())
    } else if item.granted.len() >= 2 {
        Some(format!("+{}", item.granted.len() - 1))
    } else {
        None
    }
}

/// Stable total order: `sort_rank` descending, label ascending on ties.
pub fn sort_cards(cards: &mut [RenderedCard]) {
    cards.sort_by(|a, b| {
        b.sort_rank
            .cmp(&a.sort_rank)
            .then_with(|| a.label.cmp(&b.label))
    });
}

fn load_background(item: &ShopItem, provider: &dyn AssetProvider) -> RgbaImage {
    let key = match item.series_id() {
        Some(series) => BackgroundKey::Series(series),
        None => BackgroundKey::Rarity(item.rarity_id().unwrap_or(DEFAULT_RARITY)),
    };
    provider
        .load_background(key)
        .or_else(|err| {
            debug!("background {key:?} unavailable, falling back to default: {err}");
            provider.load_background(BackgroundKey::Rarity(DEFAULT_RARITY))
        })
        .unwrap_or_else(|err| {
            warn!("default background unavailable, using flat fill: {err}");
            RgbaImage::from_pixel(CARD_SIZE, CARD_SIZE, FALLBACK_FILL)
        })
}

fn load_icon(item: &ShopItem, provider: &dyn AssetProvider, assets: &ShopAssets) -> RgbaImage {
    match item.icon_url() {
        Some(url) => provider.load_icon(url).unwrap_or_else(|err| {
            debug!("icon unavailable, using placeholder: {err}");
            assets.placeholder.clone()
        }),
        None => assets.placeholder.clone(),
    }
}

fn fit_card(img: RgbaImage) -> RgbaImage {
    if img.width() == CARD_SIZE && img.height() == CARD_SIZE {
        img
    } else {
        fit(&img, CARD_SIZE, CARD_SIZE)
    }
}

fn fit(img: &RgbaImage, w: u32, h: u32) -> RgbaImage {
    if img.width() == w && img.height() == h {
        img.clone()
    } else {
        imageops::resize(img, w, h, FilterType::Lanczos3)
    }
}
