//! memegen
//!
//! A headless meme compositor: load an image, overlay outlined top and
//! bottom text, drag the text around with pointer events and export the
//! result as a PNG.
//!
//! # Features
//!
//! - **Reactive redraw**: the session recomposes only when an input changed
//! - **Drag to reposition**: pointer events grab the nearest text block
//! - **Host hooks**: alerts and downloads go through swappable sinks
//! - **Async uploads** (default `async` feature): decode off the runtime,
//!   newest upload wins
//!
//! # Example
//!
//! ```no_run
//! use memegen::{BlockId, ImageFile, MemeSession, Point};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = MemeSession::default();
//! session.upload(ImageFile::from_path("cat.jpg".as_ref())?)?;
//! session.set_text(BlockId::Top, "ONE DOES NOT SIMPLY");
//! session.set_text(BlockId::Bottom, "WRITE A MEME IN RUST");
//!
//! // drag the top line down a bit
//! session.pointer_down(Point::new(10.0, 50.0));
//! session.pointer_move(Point::new(200.0, 80.0));
//! session.pointer_up();
//!
//! let download = session.export()?;
//! std::fs::write(&download.file_name, &download.bytes)?;
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod loader;
pub mod model;
pub mod platform;
pub mod position;
pub mod rendering;
pub mod session;

#[cfg(feature = "async")]
pub mod async_api;

pub use loader::{Bitmap, ImageFile};
pub use model::{Alignment, BlockId, Outline, Point, Rgb, Style, TextBlock};
pub use platform::{Alert, Download, Host};
pub use position::{DragState, GRAB_THRESHOLD};
pub use rendering::Frame;
pub use session::{LoadOutcome, LoadTicket, MemeSession, EXPORT_FILE_NAME};

/// Session configuration
///
/// The defaults reproduce the classic layout: 40px white centered text with
/// a 2px black outline, the top line 50px below the top edge and the bottom
/// line 20px above the bottom edge.
///
/// # Examples
///
/// ```
/// let cfg = memegen::MemeConfig::default();
/// assert_eq!(cfg.default_style.font_size_px, 40);
/// assert_eq!(memegen::EXPORT_FILE_NAME, "meme.png");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemeConfig {
    /// Style applied to both blocks initially and after a reset
    pub default_style: Style,
    /// Default baseline distance from the top edge for the top block
    pub top_offset: f32,
    /// Default baseline distance from the bottom edge for the bottom block
    pub bottom_offset: f32,
    /// Vertical distance within which a pointer-down grabs a block
    pub grab_threshold: f32,
    /// Outline drawn around text normally
    pub outline: Outline,
    /// Outline drawn while a block is being dragged
    pub drag_outline: Outline,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            default_style: Style::default(),
            top_offset: 50.0,
            bottom_offset: 20.0,
            grab_threshold: GRAB_THRESHOLD,
            outline: Outline {
                color: Rgb::BLACK,
                width: 2.0,
            },
            drag_outline: Outline {
                color: Rgb::RED,
                width: 4.0,
            },
        }
    }
}

impl MemeConfig {
    /// Parse a JSON config; missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: MemeConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grab_threshold < 0.0 {
            return Err(Error::ConfigError("grab_threshold must not be negative".into()));
        }
        if self.outline.width < 0.0 || self.drag_outline.width < 0.0 {
            return Err(Error::ConfigError("outline width must not be negative".into()));
        }
        Ok(())
    }

    pub fn margins(&self) -> rendering::layout::Margins {
        rendering::layout::Margins {
            top: self.top_offset,
            bottom: self.bottom_offset,
        }
    }
}
