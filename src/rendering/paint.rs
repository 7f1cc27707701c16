//! Paint command set emitted by the compositor and consumed by the rasterizer

use crate::model::{Alignment, BlockId, Point, Rgb};
use image::RgbaImage;
use std::sync::Arc;

/// Canvas-style text state in effect for subsequent text commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextState {
    pub font_size_px: u32,
    pub fill: Rgb,
    pub alignment: Alignment,
    pub stroke: Rgb,
    pub stroke_width: f32,
}

#[derive(Debug, Clone)]
pub enum PaintCommand {
    /// Draw the bitmap at the origin, scaled to the surface size
    DrawImage { image: Arc<RgbaImage> },
    SetTextState(TextState),
    FillText {
        block: BlockId,
        text: String,
        at: Point,
    },
    StrokeText {
        block: BlockId,
        text: String,
        at: Point,
    },
}

impl PaintCommand {
    /// Short name used in logs and ordering assertions
    pub fn kind(&self) -> &'static str {
        match self {
            PaintCommand::DrawImage { .. } => "draw_image",
            PaintCommand::SetTextState(_) => "set_text_state",
            PaintCommand::FillText { .. } => "fill_text",
            PaintCommand::StrokeText { .. } => "stroke_text",
        }
    }
}
