//! Host hooks: alerts and downloads
//!
//! A session never talks to a UI directly. It raises alerts and hands off
//! downloads through these traits, so a GUI, the CLI and tests can each
//! supply their own implementation.

pub mod alerts;
pub mod download;

pub use alerts::{Alert, AlertSink, LogAlerts, NoopAlerts, RecordingAlerts};
pub use download::{DirectoryDownloads, Download, DownloadSink, MemoryDownloads, NoopDownloads};

/// Pair of hooks a session is constructed with.
pub struct Host {
    pub alerts: Box<dyn AlertSink>,
    pub downloads: Box<dyn DownloadSink>,
}

impl Host {
    pub fn new(alerts: impl AlertSink + 'static, downloads: impl DownloadSink + 'static) -> Self {
        Self {
            alerts: Box::new(alerts),
            downloads: Box::new(downloads),
        }
    }
}

/// Alerts go to the log, downloads are dropped.
impl Default for Host {
    fn default() -> Self {
        Self::new(LogAlerts, NoopDownloads)
    }
}
