//! Asynchronous uploads.
//!
//! The session lock is held only to validate the file and to publish the
//! result; decoding runs on tokio's blocking pool in between, so pointer
//! input and text edits keep flowing while a large image decodes.

use crate::loader::{self, ImageFile};
use crate::session::{LoadOutcome, MemeSession};
use crate::{Error, Result};
use image::RgbaImage;
use log::debug;
use tokio::sync::Mutex;

/// Shared handle to a session for async hosts
pub type SharedSession = std::sync::Arc<Mutex<MemeSession>>;

pub fn shared(session: MemeSession) -> SharedSession {
    std::sync::Arc::new(Mutex::new(session))
}

/// Read a file into a data URL, then decode it off the async runtime.
pub async fn decode(file: ImageFile) -> Result<RgbaImage> {
    let url = loader::to_data_url(&file.mime, &file.bytes);
    debug!("decoding '{}' ({} bytes)", file.name, file.bytes.len());
    tokio::task::spawn_blocking(move || loader::decode_data_url(&url))
        .await
        .map_err(|e| Error::Other(format!("decode task failed: {}", e)))?
}

/// Upload `file` into `session`. When several uploads overlap, only the one
/// started last is applied; the others report [`LoadOutcome::Superseded`].
pub async fn upload(session: &Mutex<MemeSession>, file: ImageFile) -> Result<LoadOutcome> {
    let ticket = session.lock().await.begin_load(&file)?;
    let decoded = decode(file).await;
    session.lock().await.finish_load(ticket, decoded)
}

/// Read `path` from disk and upload it.
pub async fn upload_path(session: &Mutex<MemeSession>, path: &std::path::Path) -> Result<LoadOutcome> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = ImageFile::new(name, loader::mime_from_path(path), bytes);
    upload(session, file).await
}
