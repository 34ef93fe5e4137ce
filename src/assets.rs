//! Asset loading: per-item backgrounds and icons plus the shared
//! read-only batch assets (overlays, placeholder, currency icon, fonts).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use log::debug;

use crate::error::{Error, Result};
use crate::text::{Typeface, VectorTypeface};

/// Selects which background art a card gets. Series art wins over rarity
/// art when an item carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundKey<'a> {
    Series(&'a str),
    Rarity(&'a str),
}

/// Rarity background used when the requested one cannot be loaded.
pub const DEFAULT_RARITY: &str = "Common";

/// Loads per-item assets. Implementations may block (disk, HTTP) but must
/// never retry; every failure is recovered at the call site by substituting
/// a fallback asset.
pub trait AssetProvider: Send + Sync {
    /// Load the background art for a series or rarity key.
    fn load_background(&self, key: BackgroundKey<'_>) -> Result<RgbaImage>;

    /// Load an item icon from its URL.
    fn load_icon(&self, url: &str) -> Result<RgbaImage>;
}

/// Relative path of a background key inside an asset directory.
pub fn background_path(key: BackgroundKey<'_>) -> PathBuf {
    match key {
        BackgroundKey::Series(id) => Path::new("series").join(format!("{id}.png")),
        BackgroundKey::Rarity(id) => Path::new("rarities").join(format!("{id}.png")),
    }
}

/// Production provider: backgrounds from a local asset directory, icons
/// fetched over HTTP (with the `http` feature; otherwise icon loads always
/// fail and the renderer substitutes the placeholder).
pub struct DirAssetProvider {
    dir: PathBuf,
    #[cfg(feature = "http")]
    client: reqwest::blocking::Client,
}

impl DirAssetProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            dir: dir.into(),
            #[cfg(feature = "http")]
            client: reqwest::blocking::Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .build()
                .map_err(|e| Error::Network(e.to_string()))?,
        })
    }
}

impl AssetProvider for DirAssetProvider {
    fn load_background(&self, key: BackgroundKey<'_>) -> Result<RgbaImage> {
        let path = self.dir.join(background_path(key));
        let img = image::open(&path)
            .map_err(|e| Error::AssetLoad(format!("{}: {e}", path.display())))?;
        Ok(img.to_rgba8())
    }

    #[cfg(feature = "http")]
    fn load_icon(&self, url: &str) -> Result<RgbaImage> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::AssetLoad(format!("{url}: {e}")))?;
        if !resp.status().is_success() {
            return Err(Error::AssetLoad(format!("{url}: status {}", resp.status())));
        }
        let bytes = resp
            .bytes()
            .map_err(|e| Error::AssetLoad(format!("{url}: {e}")))?;
        let img = image::load_from_memory(&bytes)
            .map_err(|e| Error::AssetLoad(format!("{url}: {e}")))?;
        Ok(img.to_rgba8())
    }

    #[cfg(not(feature = "http"))]
    fn load_icon(&self, url: &str) -> Result<RgbaImage> {
        Err(Error::AssetLoad(format!(
            "{url}: remote icons need the `http` feature"
        )))
    }
}

/// Assets shared by every card in a batch. Loaded once up front and
/// treated as immutable for the duration of the render.
pub struct ShopAssets {
    /// Icon substituted when an item icon cannot be loaded.
    pub placeholder: RgbaImage,
    /// Frame used when the label fits a single short line.
    pub overlay_small: RgbaImage,
    /// Frame used for taller labels.
    pub overlay_large: RgbaImage,
    /// Canvas backdrop, resized to the computed canvas dimensions.
    pub background: RgbaImage,
    /// 26x26 currency icon drawn inside the price tag.
    pub currency_icon: RgbaImage,
    pub title_font: Arc<dyn Typeface>,
    pub date_font: Arc<dyn Typeface>,
    pub label_font: Arc<dyn Typeface>,
    pub badge_font: Arc<dyn Typeface>,
}

impl ShopAssets {
    /// Load the batch assets from an asset directory laid out as
    /// `<dir>/{QuestionMark,SmallOverlay,LargeOverlay,Background,VBucks}.png`
    /// plus `<dir>/fonts/burbank.ttf`.
    ///
    /// Unlike per-item assets these are not substitutable; a missing file
    /// here fails the whole batch before any rendering starts.
    pub fn load(dir: &Path) -> Result<Self> {
        let open = |name: &str| -> Result<RgbaImage> {
            let path = dir.join(name);
            debug!("loading shared asset {}", path.display());
            let img = image::open(&path)
                .map_err(|e| Error::AssetLoad(format!("{}: {e}", path.display())))?;
            Ok(img.to_rgba8())
        };

        let font_path = dir.join("fonts").join("burbank.ttf");
        let font_data = std::fs::read(&font_path)
            .map_err(|e| Error::AssetLoad(format!("{}: {e}", font_path.display())))?;

        Ok(Self {
            placeholder: open("QuestionMark.png")?,
            overlay_small: open("SmallOverlay.png")?,
            overlay_large: open("LargeOverlay.png")?,
            background: open("Background.png")?,
            currency_icon: open("VBucks.png")?,
            title_font: Arc::new(VectorTypeface::from_bytes(font_data.clone(), 200.0)?),
            date_font: Arc::new(VectorTypeface::from_bytes(font_data.clone(), 64.0)?),
            label_font: Arc::new(VectorTypeface::from_bytes(font_data.clone(), 20.0)?),
            badge_font: Arc::new(VectorTypeface::from_bytes(font_data, 16.0)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_keys_map_to_their_subdirectories() {
        assert_eq!(
            background_path(BackgroundKey::Series("MarvelSeries")),
            Path::new("series").join("MarvelSeries.png")
        );
        assert_eq!(
            background_path(BackgroundKey::Rarity("Common")),
            Path::new("rarities").join("Common.png")
        );
    }
}
