//! Rendering: the compositor and its supporting stages.
//!
//! `compose` turns a [`Scene`] into an ordered list of paint commands,
//! `raster::execute` runs them on the surface.

pub mod font;
pub mod layout;
pub mod paint;
pub mod raster;

use crate::model::{BlockId, Outline, Style, TextBlock};
use image::RgbaImage;
use layout::Margins;
use paint::{PaintCommand, TextState};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Everything the compositor reads
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub image: &'a Arc<RgbaImage>,
    pub top: &'a TextBlock,
    pub bottom: &'a TextBlock,
    pub top_style: Style,
    pub bottom_style: Style,
    pub outline: Outline,
    pub margins: Margins,
}

impl<'a> Scene<'a> {
    fn block(&self, id: BlockId) -> (&'a TextBlock, Style) {
        match id {
            BlockId::Top => (self.top, self.top_style),
            BlockId::Bottom => (self.bottom, self.bottom_style),
        }
    }
}

/// Paint commands for one frame, in draw order.
pub fn compose(scene: &Scene<'_>) -> Vec<PaintCommand> {
    let (w, h) = scene.image.dimensions();
    let mut cmds = vec![PaintCommand::DrawImage {
        image: Arc::clone(scene.image),
    }];
    for id in BlockId::ORDER {
        let (block, style) = scene.block(id);
        let at = layout::effective_anchor(id, block, w, h, scene.margins);
        cmds.push(PaintCommand::SetTextState(TextState {
            font_size_px: style.font_size_px,
            fill: style.color,
            alignment: style.alignment,
            stroke: scene.outline.color,
            stroke_width: scene.outline.width,
        }));
        cmds.push(PaintCommand::FillText {
            block: id,
            text: block.content.clone(),
            at,
        });
        cmds.push(PaintCommand::StrokeText {
            block: id,
            text: block.content.clone(),
            at,
        });
    }
    cmds
}

/// Lowercase hex SHA-256 of the surface's raw RGBA bytes, row-major.
///
/// Independent of PNG encoder settings, so it is what the golden tests pin.
pub fn pixel_digest(surface: &RgbaImage) -> String {
    hex::encode(Sha256::digest(surface.as_raw()))
}

/// A rendered frame ready for export
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Frame {
    pub fn from_surface(surface: &RgbaImage) -> crate::Result<Self> {
        Ok(Self {
            width: surface.width(),
            height: surface.height(),
            png_data: raster::encode_png(surface)?,
        })
    }

    /// Lowercase hex SHA-256 of the PNG bytes
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Point, Rgb};
    use image::Rgba;

    fn outline() -> Outline {
        Outline {
            color: Rgb::BLACK,
            width: 2.0,
        }
    }

    #[test]
    fn compose_orders_image_then_top_then_bottom() {
        let img = Arc::new(RgbaImage::from_pixel(200, 100, Rgba([0, 0, 0, 255])));
        let top = TextBlock {
            content: "TOP".into(),
            anchor: None,
        };
        let bottom = TextBlock {
            content: String::new(),
            anchor: Some(Point::new(10.0, 90.0)),
        };
        let scene = Scene {
            image: &img,
            top: &top,
            bottom: &bottom,
            top_style: Style::default(),
            bottom_style: Style::default(),
            outline: outline(),
            margins: Margins::default(),
        };
        let cmds = compose(&scene);
        let kinds: Vec<_> = cmds.iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "draw_image",
                "set_text_state",
                "fill_text",
                "stroke_text",
                "set_text_state",
                "fill_text",
                "stroke_text"
            ]
        );
        match &cmds[2] {
            PaintCommand::FillText { block, at, .. } => {
                assert_eq!(*block, BlockId::Top);
                assert_eq!(*at, Point::new(100.0, 50.0));
            }
            other => panic!("unexpected {:?}", other.kind()),
        }
        match &cmds[6] {
            PaintCommand::StrokeText { block, text, at } => {
                assert_eq!(*block, BlockId::Bottom);
                assert!(text.is_empty());
                assert_eq!(*at, Point::new(10.0, 90.0));
            }
            other => panic!("unexpected {:?}", other.kind()),
        }
    }

    #[test]
    fn pixel_digest_hashes_raw_rgba() {
        let surface = RgbaImage::from_raw(1, 1, b"abc\xff".to_vec()).unwrap();
        assert_eq!(
            pixel_digest(&surface),
            "8e3b08dc1236880bf0c55873db58b12d8bf0398b1b17c9686e015ccfe098d35d"
        );
    }

    #[test]
    fn digest_is_stable_hex() {
        let f = Frame {
            width: 1,
            height: 1,
            png_data: b"abc".to_vec(),
        };
        assert_eq!(
            f.digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
