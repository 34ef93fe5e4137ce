//! Final canvas assembly: banner text, watermarks, and card placement.

use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ColorType, ImageEncoder, RgbaImage};

use crate::assets::ShopAssets;
use crate::card::RenderedCard;
use crate::error::{Error, Result};
use crate::layout::CanvasLayout;

/// Vertical position of the title text.
const TITLE_Y: i32 = 35;
/// Vertical position of the date line.
const DATE_Y: i32 = 215;
/// Watermark distance from the bottom edge.
const WATERMARK_BOTTOM: u32 = 30;
/// Watermark distance from the side edges.
const WATERMARK_SIDE: u32 = 10;

/// Text drawn in the banner area and page corners.
#[derive(Debug, Clone)]
pub struct Banner {
    pub title: String,
    pub date_line: String,
    pub left_watermark: String,
    pub right_watermark: String,
}

/// Place every card onto a resized backdrop and draw the banner.
/// Cards must already be in their final sorted order.
pub fn compose_canvas(
    cards: &[RenderedCard],
    layout: &CanvasLayout,
    assets: &ShopAssets,
    banner: &Banner,
) -> Result<RgbaImage> {
    if cards.len() != layout.count {
        return Err(Error::LayoutInvariant(format!(
            "layout sized for {} cards but {} were rendered",
            layout.count,
            cards.len()
        )));
    }

    let mut canvas = imageops::resize(
        &assets.background,
        layout.width,
        layout.height,
        FilterType::Lanczos3,
    );

    draw_centered_line(&mut canvas, assets, &banner.title, TITLE_Y, true);
    draw_centered_line(&mut canvas, assets, &banner.date_line, DATE_Y, false);

    let watermark_y = (layout.height - WATERMARK_BOTTOM) as i32;
    if !banner.left_watermark.is_empty() {
        assets.label_font.draw(
            &mut canvas,
            WATERMARK_SIDE as i32,
            watermark_y,
            &banner.left_watermark,
        );
    }
    if !banner.right_watermark.is_empty() {
        let w = assets.label_font.width(&banner.right_watermark);
        let x = layout.width.saturating_sub(w + WATERMARK_SIDE) as i32;
        assets
            .label_font
            .draw(&mut canvas, x, watermark_y, &banner.right_watermark);
    }

    for (i, card) in cards.iter().enumerate() {
        let (x, y) = layout.card_origin(i);
        imageops::overlay(&mut canvas, &card.image, i64::from(x), i64::from(y));
    }

    Ok(canvas)
}

fn draw_centered_line(
    canvas: &mut RgbaImage,
    assets: &ShopAssets,
    text: &str,
    y: i32,
    title: bool,
) {
    if text.is_empty() {
        return;
    }
    let font = if title {
        &assets.title_font
    } else {
        &assets.date_font
    };
    let w = font.width(text);
    let x = (canvas.width().saturating_sub(w) / 2) as i32;
    font.draw(canvas, x, y, text);
}

/// Encode the finished canvas as PNG bytes for the image sink.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ColorType::Rgba8,
    )?;
    Ok(buf)
}
