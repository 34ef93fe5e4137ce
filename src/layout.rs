//! Pure grid layout: item count in, canvas size and card coordinates out.
//!
//! Nothing here touches pixels. The whole layout is a deterministic
//! function of the number of cards, so it can only be computed after the
//! render fan-out has joined.

use crate::error::{Error, Result};

/// Every card is a fixed square by design.
pub const CARD_SIZE: u32 = 256;
/// Gap between adjacent cards, both axes.
pub const GUTTER: u32 = 15;
/// Total horizontal margin (50px on each side of the grid).
pub const H_MARGIN: u32 = 100;
/// Total vertical margin (300px banner above the grid, 50px below).
pub const V_MARGIN: u32 = 350;
/// Left edge of the first column.
pub const GRID_LEFT: u32 = 50;
/// Top edge of the first row.
pub const GRID_TOP: u32 = 300;

/// Column count as a step function of the item count.
pub fn columns_for(count: usize) -> u32 {
    if count > 21 {
        8
    } else if count > 18 {
        7
    } else {
        6
    }
}

/// Zero-based grid coordinates of a card, from its post-sort index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: u32,
    pub col: u32,
}

impl GridPosition {
    pub fn for_index(index: usize, columns: u32) -> Self {
        let index = index as u32;
        Self {
            row: index / columns,
            col: index % columns,
        }
    }
}

/// Canvas dimensions and placement data, fully determined by the item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    pub count: usize,
    pub columns: u32,
    pub rows: u32,
    pub width: u32,
    pub height: u32,
    /// Horizontal shift applied to every card on a partial final row so
    /// the row appears centered. Zero when the last row is full.
    pub last_row_offset: u32,
}

impl CanvasLayout {
    /// Compute the layout for `count` cards.
    ///
    /// `count == 0` is rejected: the pipeline filters out empty catalogs
    /// long before layout, so hitting it here is a bug upstream.
    pub fn for_count(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::LayoutInvariant(
                "cannot lay out an empty card set".into(),
            ));
        }
        let columns = columns_for(count);
        let rows = (count as u32).div_ceil(columns);
        let width = CARD_SIZE * columns + GUTTER * (columns - 1) + H_MARGIN;
        let height = CARD_SIZE * rows + GUTTER * (rows - 1) + V_MARGIN;

        let remainder = count as u32 % columns;
        let last_row_offset = if remainder == 0 {
            0
        } else {
            let missing = columns - remainder;
            (CARD_SIZE * missing + GUTTER * missing) / 2
        };

        Ok(Self {
            count,
            columns,
            rows,
            width,
            height,
            last_row_offset,
        })
    }

    /// Pixel origin of the card at post-sort index `i`.
    pub fn card_origin(&self, index: usize) -> (u32, u32) {
        let pos = GridPosition::for_index(index, self.columns);
        let mut x = GRID_LEFT + pos.col * (CARD_SIZE + GUTTER);
        let y = GRID_TOP + pos.row * (CARD_SIZE + GUTTER);
        if self.last_row_offset > 0 && pos.row == self.rows - 1 {
            x += self.last_row_offset;
        }
        (x, y)
    }
}
