//! Bitmap glyph source: 8x8 cell font scaled to an arbitrary pixel size.
//!
//! One em equals the requested pixel size and every character advances one
//! em. Cell rows 0-6 sit above the baseline, row 7 below it.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use std::ops::Range;

const CELLS: u32 = 8;
const ASCENT_ROWS: u32 = 7;

fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Pixels above the baseline for a given size
pub fn ascent(size_px: u32) -> u32 {
    ((size_px as u64 * ASCENT_ROWS as u64 + CELLS as u64 / 2) / CELLS as u64) as u32
}

/// Width of a single-line run in pixels
pub fn measure(text: &str, size_px: u32) -> u64 {
    (text.chars().count() as u64).saturating_mul(size_px as u64)
}

/// Coverage mask of a rendered run (or a column span of it), `size_px` rows tall.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    bits: Vec<bool>,
}

impl GlyphMask {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width as usize).saturating_mul(height as usize)],
        }
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[y as usize * self.width as usize + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32) {
        let idx = y as usize * self.width as usize + x as usize;
        self.bits[idx] = true;
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Band of `width` pixels centered on the mask contour, on a canvas grown
    /// by `pad` pixels on every side.
    pub fn outline(&self, width: f32, pad: u32) -> GlyphMask {
        let radius = (width / 2.0).max(0.5);
        let reach = radius.ceil() as i32;
        let mut disk = Vec::new();
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if (dx * dx + dy * dy) as f32 <= radius * radius {
                    disk.push((dx, dy));
                }
            }
        }

        let mut out = GlyphMask::empty(self.width + pad * 2, self.height + pad * 2);
        for oy in 0..out.height {
            for ox in 0..out.width {
                let x = ox as i32 - pad as i32;
                let y = oy as i32 - pad as i32;
                let mut any = false;
                let mut all = true;
                for (dx, dy) in &disk {
                    if self.get(x + dx, y + dy) {
                        any = true;
                    } else {
                        all = false;
                    }
                    if any && !all {
                        break;
                    }
                }
                if any && !all {
                    out.set(ox, oy);
                }
            }
        }
        out
    }
}

/// Rasterize `text` at `size_px` with nearest-neighbour sampling.
pub fn rasterize(text: &str, size_px: u32) -> GlyphMask {
    rasterize_span(text, size_px, 0..measure(text, size_px))
}

/// Rasterize only run columns `cols`; mask column 0 is run column
/// `cols.start`. Columns past the end of the run are dropped, so the mask
/// is never wider than the span asked for.
pub fn rasterize_span(text: &str, size_px: u32, cols: Range<u64>) -> GlyphMask {
    let end = cols.end.min(measure(text, size_px));
    let start = cols.start.min(end);
    let width = u32::try_from(end - start).unwrap_or(u32::MAX);
    let mut mask = GlyphMask::empty(width, size_px);
    if size_px == 0 || width == 0 {
        return mask;
    }
    let size = size_px as u64;
    let first = start / size;
    let last = (end + size - 1) / size;
    for (i, ch) in text.chars().enumerate().skip(first as usize).take((last - first) as usize) {
        let rows = glyph(ch);
        let x0 = i as u64 * size;
        let lo = start.max(x0) - x0;
        let hi = end.min(x0 + size) - x0;
        for py in 0..size_px {
            let row = rows[(py as u64 * CELLS as u64 / size) as usize];
            if row == 0 {
                continue;
            }
            for px in lo..hi {
                let col = (px * CELLS as u64 / size) as u32;
                if (row >> col) & 1 == 1 {
                    mask.set((x0 + px - start) as u32, py);
                }
            }
        }
    }
    mask
}
