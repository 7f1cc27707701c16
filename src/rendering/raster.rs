//! Rasterizer: executes paint commands on an RGBA surface

use crate::model::Rgb;
use crate::rendering::font::{self, GlyphMask};
use crate::rendering::layout;
use crate::rendering::paint::{PaintCommand, TextState};
use crate::{Error, Result};
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use std::ops::Range;

/// Run `commands` in order against `surface`.
///
/// Text commands issued before any `SetTextState` are ignored.
pub fn execute(surface: &mut RgbaImage, commands: &[PaintCommand]) {
    let mut state: Option<TextState> = None;
    for cmd in commands {
        match cmd {
            PaintCommand::DrawImage { image } => draw_image(surface, image),
            PaintCommand::SetTextState(s) => state = Some(*s),
            PaintCommand::FillText { text, at, .. } => {
                if let Some(s) = &state {
                    let (x, y) = layout::run_origin(text, s.font_size_px, s.alignment, *at);
                    let run_w = font::measure(text, s.font_size_px);
                    let Some(cols) = visible_cols(surface, x, y, run_w, s.font_size_px, 0) else {
                        continue;
                    };
                    let left = x as i64 + cols.start as i64;
                    let mask = font::rasterize_span(text, s.font_size_px, cols);
                    blit_mask(surface, &mask, left, y as i64, s.fill);
                }
            }
            PaintCommand::StrokeText { text, at, .. } => {
                if let Some(s) = &state {
                    if s.stroke_width <= 0.0 {
                        continue;
                    }
                    let (x, y) = layout::run_origin(text, s.font_size_px, s.alignment, *at);
                    let pad = (s.stroke_width / 2.0).ceil() as u32 + 1;
                    let run_w = font::measure(text, s.font_size_px);
                    // Twice the pad so the cut edges of the span stay off the surface.
                    let Some(cols) = visible_cols(surface, x, y, run_w, s.font_size_px, pad.saturating_mul(2)) else {
                        continue;
                    };
                    let left = x as i64 + cols.start as i64 - pad as i64;
                    let band = font::rasterize_span(text, s.font_size_px, cols).outline(s.stroke_width, pad);
                    blit_mask(surface, &band, left, y as i64 - pad as i64, s.stroke);
                }
            }
        }
    }
}

/// Run columns that can touch `surface` for a run whose top-left corner is
/// `(x, y)`, widened by `margin` on both sides. `None` when nothing shows.
fn visible_cols(surface: &RgbaImage, x: i32, y: i32, run_w: u64, size_px: u32, margin: u32) -> Option<Range<u64>> {
    let (sw, sh) = (surface.width() as i64, surface.height() as i64);
    let (x, y, margin) = (x as i64, y as i64, margin as i64);
    if y + size_px as i64 + margin <= 0 || y - margin >= sh {
        return None;
    }
    let start = (-x - margin).max(0);
    let end = (sw - x + margin).min(run_w.min(i64::MAX as u64) as i64);
    (start < end).then(|| start as u64..end as u64)
}

fn draw_image(surface: &mut RgbaImage, image: &RgbaImage) {
    if image.dimensions() == surface.dimensions() {
        surface.copy_from_slice(image.as_raw());
    } else {
        let scaled = imageops::resize(image, surface.width(), surface.height(), FilterType::Triangle);
        surface.copy_from_slice(scaled.as_raw());
    }
}

fn blit_mask(surface: &mut RgbaImage, mask: &GlyphMask, x0: i64, y0: i64, color: Rgb) {
    let px = color.to_rgba();
    let (sw, sh) = (surface.width() as i64, surface.height() as i64);
    for my in 0..mask.height as i32 {
        let ty = y0 + my as i64;
        if ty < 0 || ty >= sh {
            continue;
        }
        for mx in 0..mask.width as i32 {
            let tx = x0 + mx as i64;
            if tx < 0 || tx >= sw || !mask.get(mx, my) {
                continue;
            }
            surface.put_pixel(tx as u32, ty as u32, px);
        }
    }
}

/// Encode a surface as PNG bytes.
pub fn encode_png(surface: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(surface.as_raw(), surface.width(), surface.height(), ColorType::Rgba8)
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(buf)
}

/// A fresh transparent surface, as a canvas is after being resized.
pub fn blank_surface(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
}
