//! Image loading: MIME check, data-URL stage and bitmap decode.

use crate::{Error, Result};
use base64::{engine::general_purpose, Engine as _};
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;

/// A user-selected file: name, declared MIME type and raw bytes
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, declaring its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, mime_from_path(path), bytes))
    }

    /// Whether the declared type is an image type.
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Declared MIME type for a path, based on its extension only.
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Decoded raster owned by the session.
///
/// `generation` identifies the upload it came from; two bitmaps with the
/// same generation are the same image.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub generation: u64,
    pub pixels: Arc<RgbaImage>,
}

impl Bitmap {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// First stage: encode the upload as a `data:` URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

/// Split a base64 `data:` URL into its MIME type and payload.
pub fn parse_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| Error::Decode("not a data URL".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::Decode("data URL has no payload".into()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| Error::Decode("data URL is not base64 encoded".into()))?;
    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::Decode(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

/// Second stage: decode a data URL into RGBA pixels.
pub fn decode_data_url(url: &str) -> Result<RgbaImage> {
    let (mime, bytes) = parse_data_url(url)?;
    if !is_image_mime(&mime) {
        return Err(Error::InvalidFile(mime));
    }
    let img = image::load_from_memory(&bytes)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::Decode("image has zero size".into()));
    }
    Ok(img.to_rgba8())
}

/// Validate and run both stages synchronously.
pub fn decode_file(file: &ImageFile) -> Result<RgbaImage> {
    if !file.is_image() {
        return Err(Error::InvalidFile(file.mime.clone()));
    }
    let url = to_data_url(&file.mime, &file.bytes);
    decode_data_url(&url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn data_url_roundtrip_preserves_mime() {
        let url = to_data_url("image/png", b"abc");
        assert!(url.starts_with("data:image/png;base64,"));
        let (mime, bytes) = parse_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"abc");
    }

    #[test]
    fn rejects_malformed_data_urls() {
        assert!(parse_data_url("http://example.com/a.png").is_err());
        assert!(parse_data_url("data:image/png,raw").is_err());
        assert!(parse_data_url("data:image/png;base64").is_err());
    }

    #[test]
    fn decodes_png_with_intrinsic_size() {
        let file = ImageFile::new("a.png", "image/png", png_bytes(7, 3));
        let img = decode_file(&file).unwrap();
        assert_eq!(img.dimensions(), (7, 3));
        assert_eq!(img.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn rejects_non_image_mime() {
        let file = ImageFile::new("notes.txt", "text/plain", b"hello".to_vec());
        assert!(matches!(decode_file(&file), Err(Error::InvalidFile(_))));
    }

    #[test]
    fn corrupt_image_is_a_decode_error() {
        let file = ImageFile::new("broken.png", "image/png", b"\x89PNG garbage".to_vec());
        assert!(matches!(decode_file(&file), Err(Error::Decode(_))));
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_from_path(Path::new("cat.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("cat.webp")), "image/webp");
        assert_eq!(mime_from_path(Path::new("cat.txt")), "application/octet-stream");
        assert_eq!(mime_from_path(Path::new("cat")), "application/octet-stream");
    }
}
