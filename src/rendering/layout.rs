//! Anchor placement: default positions and alignment offsets

use crate::model::{Alignment, BlockId, Point, TextBlock};
use crate::rendering::font;

/// Vertical offsets used when a block has no anchor override.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Baseline distance from the top edge for the top block
    pub top: f32,
    /// Baseline distance from the bottom edge for the bottom block
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            bottom: 20.0,
        }
    }
}

/// Default anchor for a block on a `width` x `height` surface.
pub fn default_anchor(block: BlockId, width: u32, height: u32, margins: Margins) -> Point {
    let x = width as f32 / 2.0;
    match block {
        BlockId::Top => Point::new(x, margins.top),
        BlockId::Bottom => Point::new(x, height as f32 - margins.bottom),
    }
}

/// The anchor actually used for drawing and hit-testing.
pub fn effective_anchor(
    block: BlockId,
    text: &TextBlock,
    width: u32,
    height: u32,
    margins: Margins,
) -> Point {
    text.anchor
        .unwrap_or_else(|| default_anchor(block, width, height, margins))
}

/// Top-left corner of a run whose baseline anchor is `anchor`.
pub fn run_origin(text: &str, size_px: u32, alignment: Alignment, anchor: Point) -> (i32, i32) {
    let w = font::measure(text, size_px) as f32;
    let left = match alignment {
        Alignment::Left => anchor.x,
        Alignment::Center => anchor.x - w / 2.0,
        Alignment::Right => anchor.x - w,
    };
    let top = anchor.y - font::ascent(size_px) as f32;
    (left.round() as i32, top.round() as i32)
}
