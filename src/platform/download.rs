//! Download delivery for exported frames

use crate::Result;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A file handed to the host for saving
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub trait DownloadSink: Send + Sync {
    fn deliver(&self, download: &Download) -> Result<()>;
}

/// Discards downloads
pub struct NoopDownloads;

impl DownloadSink for NoopDownloads {
    fn deliver(&self, _download: &Download) -> Result<()> {
        Ok(())
    }
}

/// Writes each download into a directory under its file name
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, download: &Download) -> PathBuf {
        self.dir.join(&download.file_name)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectoryDownloads {
    fn deliver(&self, download: &Download) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(download);
        std::fs::write(&path, &download.bytes)?;
        info!("saved {} ({} bytes)", path.display(), download.bytes.len());
        Ok(())
    }
}

/// Keeps downloads in memory. Clones share storage.
#[derive(Clone, Default)]
pub struct MemoryDownloads {
    files: Arc<Mutex<Vec<Download>>>,
}

impl MemoryDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downloads(&self) -> Vec<Download> {
        self.files.lock().unwrap().clone()
    }
}

impl DownloadSink for MemoryDownloads {
    fn deliver(&self, download: &Download) -> Result<()> {
        self.files.lock().unwrap().push(download.clone());
        Ok(())
    }
}
