//! Text measurement and drawing.
//!
//! Card rendering never talks to a font library directly; it goes through
//! the [`Typeface`] trait so tests can swap in a fixed-advance mock and the
//! production path can swap font files without touching render code.

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::error::{Error, Result};

/// A font at a fixed pixel size. Shared read-only across render tasks.
pub trait Typeface: Send + Sync {
    /// Rendered width of `text` in pixels.
    fn width(&self, text: &str) -> u32;

    /// Height of a single line in pixels.
    fn line_height(&self) -> u32;

    /// Draw `text` with its top-left corner at `(x, y)`, alpha-blended
    /// onto `img`. Pixels outside the image are clipped.
    fn draw(&self, img: &mut RgbaImage, x: i32, y: i32, text: &str);

    /// Total height of `text` greedily word-wrapped at `max_width`.
    fn wrapped_height(&self, text: &str, max_width: u32) -> u32 {
        if text.trim().is_empty() {
            return 0;
        }
        let mut lines = 1u32;
        let mut current = String::new();
        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if current.is_empty() || self.width(&candidate) <= max_width {
                current = candidate;
            } else {
                lines += 1;
                current = word.to_string();
            }
        }
        lines * self.line_height()
    }

    /// Draw `text` horizontally centered inside the band starting at
    /// `band_x` and spanning `band_width` pixels.
    fn draw_centered(&self, img: &mut RgbaImage, band_x: i32, band_width: u32, y: i32, text: &str) {
        let w = self.width(text) as i32;
        let x = band_x + (band_width as i32 - w) / 2;
        self.draw(img, x, y, text);
    }
}

/// Production [`Typeface`]: a TTF/OTF rendered through `rusttype`.
pub struct VectorTypeface {
    font: Font<'static>,
    px: f32,
    color: Rgba<u8>,
}

impl VectorTypeface {
    /// Build a typeface from raw font bytes at a fixed pixel size.
    /// Text is drawn white; use [`with_color`](Self::with_color) to change it.
    pub fn from_bytes(data: Vec<u8>, px: f32) -> Result<Self> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| Error::AssetLoad("font data is not a valid TTF/OTF".into()))?;
        Ok(Self {
            font,
            px,
            color: Rgba([255, 255, 255, 255]),
        })
    }

    pub fn with_color(mut self, color: Rgba<u8>) -> Self {
        self.color = color;
        self
    }
}

impl Typeface for VectorTypeface {
    fn width(&self, text: &str) -> u32 {
        if text.is_empty() {
            return 0;
        }
        let scale = Scale::uniform(self.px);
        let v_metrics = self.font.v_metrics(scale);
        self.font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .filter_map(|g| g.pixel_bounding_box())
            .map(|bb| bb.max.x.max(0) as u32)
            .max()
            .unwrap_or(0)
    }

    fn line_height(&self) -> u32 {
        let vm = self.font.v_metrics(Scale::uniform(self.px));
        (vm.ascent - vm.descent + vm.line_gap).ceil().max(1.0) as u32
    }

    fn draw(&self, img: &mut RgbaImage, x: i32, y: i32, text: &str) {
        let scale = Scale::uniform(self.px);
        let v_metrics = self.font.v_metrics(scale);
        let baseline_y = y as f32 + v_metrics.ascent;
        let mut caret_x = x as f32;

        for ch in text.chars() {
            let glyph = self
                .font
                .glyph(ch)
                .scaled(scale)
                .positioned(point(caret_x, baseline_y));
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;
                    if px < 0 || py < 0 {
                        return;
                    }
                    let (px, py) = (px as u32, py as u32);
                    if px >= img.width() || py >= img.height() {
                        return;
                    }
                    if coverage <= 0.0 {
                        return;
                    }
                    let a = coverage.min(1.0);
                    let inv = 1.0 - a;
                    let dst = img.get_pixel_mut(px, py);
                    for c in 0..3 {
                        dst.0[c] = (self.color.0[c] as f32 * a + dst.0[c] as f32 * inv) as u8;
                    }
                    dst.0[3] = dst.0[3].max((a * 255.0) as u8);
                });
            }
            caret_x += glyph.unpositioned().h_metrics().advance_width;
        }
    }
}
