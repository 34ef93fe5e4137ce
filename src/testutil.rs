//! Shared fixtures for unit tests: a fixed-advance typeface, a mock asset
//! provider, and synthetic batch assets with distinguishable colors.

use std::collections::HashSet;
use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::assets::{AssetProvider, BackgroundKey, ShopAssets, DEFAULT_RARITY};
use crate::catalog::ShopItem;
use crate::error::{Error, Result};
use crate::text::Typeface;

/// Deterministic typeface: every glyph advances by a fixed amount and
/// drawing stamps an opaque white rectangle.
pub struct FixedTypeface {
    advance: u32,
    line_height: u32,
}

impl FixedTypeface {
    pub fn new(advance: u32, line_height: u32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Typeface for FixedTypeface {
    fn width(&self, text: &str) -> u32 {
        self.advance * text.chars().count() as u32
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn draw(&self, img: &mut RgbaImage, x: i32, y: i32, text: &str) {
        let w = self.width(text);
        for dy in 0..self.line_height {
            for dx in 0..w {
                let px = x + dx as i32;
                let py = y + dy as i32;
                if px < 0 || py < 0 {
                    continue;
                }
                let (px, py) = (px as u32, py as u32);
                if px < img.width() && py < img.height() {
                    img.put_pixel(px, py, Rgba([255, 255, 255, 255]));
                }
            }
        }
    }
}

pub const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([255, 0, 255, 255]);
pub const SERIES_COLOR: Rgba<u8> = Rgba([200, 0, 0, 255]);
pub const RARITY_COLOR: Rgba<u8> = Rgba([0, 120, 200, 255]);
pub const COMMON_COLOR: Rgba<u8> = Rgba([40, 40, 40, 255]);
pub const CANVAS_COLOR: Rgba<u8> = Rgba([10, 10, 30, 255]);
pub const SMALL_OVERLAY_MARK: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const LARGE_OVERLAY_MARK: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// Batch assets with colors chosen so a test can tell which branch
/// produced a pixel. The overlays are transparent apart from a single
/// marker pixel at (0, 0).
pub fn test_assets() -> ShopAssets {
    let mut overlay_small = RgbaImage::new(256, 256);
    overlay_small.put_pixel(0, 0, SMALL_OVERLAY_MARK);
    let mut overlay_large = RgbaImage::new(256, 256);
    overlay_large.put_pixel(0, 0, LARGE_OVERLAY_MARK);

    ShopAssets {
        placeholder: RgbaImage::from_pixel(256, 256, PLACEHOLDER_COLOR),
        overlay_small,
        overlay_large,
        background: RgbaImage::from_pixel(64, 64, CANVAS_COLOR),
        currency_icon: RgbaImage::from_pixel(26, 26, Rgba([255, 220, 0, 255])),
        title_font: Arc::new(FixedTypeface::new(12, 40)),
        date_font: Arc::new(FixedTypeface::new(8, 24)),
        label_font: Arc::new(FixedTypeface::new(5, 20)),
        badge_font: Arc::new(FixedTypeface::new(4, 12)),
    }
}

/// In-memory provider. Failure modes are opt-in so fault-isolation tests
/// can break exactly one item's assets.
#[derive(Default)]
pub struct MockProvider {
    pub fail_all_backgrounds: bool,
    pub fail_series_backgrounds: bool,
    pub fail_icon_urls: HashSet<String>,
    pub fail_all_icons: bool,
}

impl AssetProvider for MockProvider {
    fn load_background(&self, key: BackgroundKey<'_>) -> Result<RgbaImage> {
        if self.fail_all_backgrounds {
            return Err(Error::AssetLoad("mock background failure".into()));
        }
        let color = match key {
            BackgroundKey::Series(_) if self.fail_series_backgrounds => {
                return Err(Error::AssetLoad("mock series failure".into()));
            }
            BackgroundKey::Series(_) => SERIES_COLOR,
            BackgroundKey::Rarity(DEFAULT_RARITY) => COMMON_COLOR,
            BackgroundKey::Rarity(_) => RARITY_COLOR,
        };
        Ok(RgbaImage::from_pixel(256, 256, color))
    }

    fn load_icon(&self, url: &str) -> Result<RgbaImage> {
        if self.fail_all_icons || self.fail_icon_urls.contains(url) {
            return Err(Error::AssetLoad(format!("mock icon failure: {url}")));
        }
        // fully transparent so the background stays visible to assertions
        Ok(RgbaImage::new(64, 64))
    }
}

/// Build a `ShopItem` from inline JSON.
pub fn shop_item(value: serde_json::Value) -> ShopItem {
    serde_json::from_value(value).expect("test item JSON")
}
