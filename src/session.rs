//! The meme session: one image, two text blocks, one surface.
//!
//! All state transitions happen through `&mut self`, so a session is driven
//! from a single logical flow. Redraws are reactive: the session remembers
//! which inputs the current surface was composed from and recomposes only
//! when one of them changed.

use crate::loader::{self, Bitmap, ImageFile};
use crate::model::{Alignment, BlockId, Point, Rgb, Style, TextBlock, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::platform::{Alert, Download, Host};
use crate::position::{DragController, DragState};
use crate::rendering::{self, layout, raster, Frame, Scene};
use crate::{Error, MemeConfig, Result};
use image::RgbaImage;
use log::{debug, info};
use std::sync::Arc;

/// Name every exported frame is delivered under
pub const EXPORT_FILE_NAME: &str = "meme.png";

/// Sequence number taken when an upload is accepted.
///
/// Only the completion carrying the newest ticket is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { width: u32, height: u32 },
    /// A newer upload (or a reset) happened while this one was decoding
    Superseded,
}

/// Inputs a frame was composed from
#[derive(Debug, Clone, PartialEq)]
struct SceneKey {
    generation: u64,
    top: TextBlock,
    bottom: TextBlock,
    top_style: Style,
    bottom_style: Style,
    dragging: bool,
}

pub struct MemeSession {
    config: MemeConfig,
    host: Host,
    bitmap: Option<Bitmap>,
    surface: Option<RgbaImage>,
    top: TextBlock,
    bottom: TextBlock,
    top_style: Style,
    bottom_style: Style,
    drag: DragController,
    generations: u64,
    latest_ticket: LoadTicket,
    composed: Option<SceneKey>,
    redraws: u64,
}

impl MemeSession {
    pub fn new(config: MemeConfig, host: Host) -> Self {
        let style = clamp_style(config.default_style);
        let drag = DragController::new(config.grab_threshold);
        Self {
            config,
            host,
            bitmap: None,
            surface: None,
            top: TextBlock::default(),
            bottom: TextBlock::default(),
            top_style: style,
            bottom_style: style,
            drag,
            generations: 0,
            latest_ticket: LoadTicket(0),
            composed: None,
            redraws: 0,
        }
    }

    pub fn config(&self) -> &MemeConfig {
        &self.config
    }

    // --- Loading ---

    /// Validate and decode an upload in one go.
    pub fn upload(&mut self, file: ImageFile) -> Result<LoadOutcome> {
        let ticket = self.begin_load(&file)?;
        let url = loader::to_data_url(&file.mime, &file.bytes);
        let decoded = loader::decode_data_url(&url);
        self.finish_load(ticket, decoded)
    }

    /// Accept or reject a selected file. Rejection raises an alert and
    /// leaves the session untouched.
    pub fn begin_load(&mut self, file: &ImageFile) -> Result<LoadTicket> {
        if !file.is_image() {
            self.host.alerts.alert(&Alert::InvalidFile);
            return Err(Error::InvalidFile(file.mime.clone()));
        }
        self.latest_ticket = LoadTicket(self.latest_ticket.0 + 1);
        debug!("upload '{}' accepted as {:?}", file.name, self.latest_ticket);
        Ok(self.latest_ticket)
    }

    /// Publish a decode result. Stale tickets are dropped; decode errors
    /// raise an alert and keep the previous image.
    pub fn finish_load(&mut self, ticket: LoadTicket, decoded: Result<RgbaImage>) -> Result<LoadOutcome> {
        if ticket != self.latest_ticket {
            debug!("discarding {:?}, newest is {:?}", ticket, self.latest_ticket);
            return Ok(LoadOutcome::Superseded);
        }
        let pixels = match decoded {
            Ok(p) => p,
            Err(e) => {
                let alert = match e {
                    Error::InvalidFile(_) => Alert::InvalidFile,
                    _ => Alert::DecodeFailed,
                };
                self.host.alerts.alert(&alert);
                return Err(e);
            }
        };
        let (width, height) = pixels.dimensions();
        self.generations += 1;
        self.bitmap = Some(Bitmap {
            generation: self.generations,
            pixels: Arc::new(pixels),
        });
        self.surface = Some(raster::blank_surface(width, height));
        self.top.anchor = None;
        self.bottom.anchor = None;
        self.drag.cancel();
        self.composed = None;
        info!("loaded {}x{} image (generation {})", width, height, self.generations);
        Ok(LoadOutcome::Loaded { width, height })
    }

    pub fn has_image(&self) -> bool {
        self.bitmap.is_some()
    }

    pub fn image_dimensions(&self) -> Option<(u32, u32)> {
        self.bitmap.as_ref().map(|b| (b.width(), b.height()))
    }

    pub fn surface_dimensions(&self) -> Option<(u32, u32)> {
        self.surface.as_ref().map(|s| s.dimensions())
    }

    // --- Text and style ---

    fn block_mut(&mut self, id: BlockId) -> &mut TextBlock {
        match id {
            BlockId::Top => &mut self.top,
            BlockId::Bottom => &mut self.bottom,
        }
    }

    pub fn block(&self, id: BlockId) -> &TextBlock {
        match id {
            BlockId::Top => &self.top,
            BlockId::Bottom => &self.bottom,
        }
    }

    pub fn set_text(&mut self, id: BlockId, text: impl Into<String>) {
        self.block_mut(id).content = text.into();
    }

    pub fn text(&self, id: BlockId) -> &str {
        &self.block(id).content
    }

    /// Place a block explicitly; `None` restores the computed default.
    pub fn set_anchor(&mut self, id: BlockId, anchor: Option<Point>) {
        self.block_mut(id).anchor = anchor;
    }

    pub fn anchor(&self, id: BlockId) -> Option<Point> {
        self.block(id).anchor
    }

    /// Anchor used for drawing, with defaults substituted. `None` until an
    /// image is loaded.
    pub fn effective_anchor(&self, id: BlockId) -> Option<Point> {
        let (w, h) = self.image_dimensions()?;
        Some(layout::effective_anchor(id, self.block(id), w, h, self.config.margins()))
    }

    pub fn style(&self, id: BlockId) -> Style {
        match id {
            BlockId::Top => self.top_style,
            BlockId::Bottom => self.bottom_style,
        }
    }

    pub fn set_block_style(&mut self, id: BlockId, style: Style) {
        let style = clamp_style(style);
        match id {
            BlockId::Top => self.top_style = style,
            BlockId::Bottom => self.bottom_style = style,
        }
    }

    /// Font size for both blocks, clamped to 10..=100.
    pub fn set_font_size(&mut self, size: u32) {
        let size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.top_style.font_size_px = size;
        self.bottom_style.font_size_px = size;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.top_style.color = color;
        self.bottom_style.color = color;
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.top_style.alignment = alignment;
        self.bottom_style.alignment = alignment;
    }

    // --- Pointer input ---

    pub fn pointer_down(&mut self, pos: Point) -> Option<BlockId> {
        let (w, h) = self.image_dimensions()?;
        let margins = self.config.margins();
        let (top, bottom) = (&self.top, &self.bottom);
        self.drag.pointer_down(pos, |id| {
            let block = match id {
                BlockId::Top => top,
                BlockId::Bottom => bottom,
            };
            layout::effective_anchor(id, block, w, h, margins)
        })
    }

    pub fn pointer_move(&mut self, pos: Point) {
        if let Some((id, at)) = self.drag.pointer_move(pos) {
            self.block_mut(id).anchor = Some(at);
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    // --- Drawing ---

    fn scene_key(&self, generation: u64) -> SceneKey {
        SceneKey {
            generation,
            top: self.top.clone(),
            bottom: self.bottom.clone(),
            top_style: self.top_style,
            bottom_style: self.bottom_style,
            dragging: self.drag.is_dragging(),
        }
    }

    /// The current surface, recomposed first if any input changed.
    pub fn frame(&mut self) -> Option<&RgbaImage> {
        let generation = self.bitmap.as_ref()?.generation;
        let key = self.scene_key(generation);
        if self.composed.as_ref() != Some(&key) {
            let bitmap = self.bitmap.as_ref()?;
            let outline = if key.dragging {
                self.config.drag_outline
            } else {
                self.config.outline
            };
            let scene = Scene {
                image: &bitmap.pixels,
                top: &self.top,
                bottom: &self.bottom,
                top_style: self.top_style,
                bottom_style: self.bottom_style,
                outline,
                margins: self.config.margins(),
            };
            let commands = rendering::compose(&scene);
            let surface = self.surface.as_mut()?;
            raster::execute(surface, &commands);
            self.redraws += 1;
            debug!("recomposed frame #{} ({} commands)", self.redraws, commands.len());
            self.composed = Some(key);
        }
        self.surface.as_ref()
    }

    /// Number of times the surface has been recomposed
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Encode the current frame without delivering it.
    pub fn render(&mut self) -> Result<Frame> {
        let surface = self.frame().ok_or(Error::NoImage)?;
        Frame::from_surface(surface)
    }

    /// Encode the current frame and hand it to the download sink.
    pub fn export(&mut self) -> Result<Download> {
        if !self.has_image() {
            self.host.alerts.alert(&Alert::NoImage);
            return Err(Error::NoImage);
        }
        let frame = self.render()?;
        let download = Download {
            file_name: EXPORT_FILE_NAME.to_string(),
            bytes: frame.png_data,
        };
        self.host.downloads.deliver(&download)?;
        info!("exported {} ({}x{})", download.file_name, frame.width, frame.height);
        Ok(download)
    }

    /// Back to the initial state. Pending uploads are invalidated.
    pub fn reset(&mut self) {
        let style = clamp_style(self.config.default_style);
        self.bitmap = None;
        self.surface = None;
        self.top = TextBlock::default();
        self.bottom = TextBlock::default();
        self.top_style = style;
        self.bottom_style = style;
        self.drag.cancel();
        self.latest_ticket = LoadTicket(self.latest_ticket.0 + 1);
        self.composed = None;
        debug!("session reset");
    }
}

impl Default for MemeSession {
    fn default() -> Self {
        Self::new(MemeConfig::default(), Host::default())
    }
}

fn clamp_style(style: Style) -> Style {
    Style {
        font_size_px: style.font_size_px.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
        ..style
    }
}
