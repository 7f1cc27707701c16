//! User-facing alerts raised by the session

use log::warn;
use std::fmt;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// The selected file is not an image
    InvalidFile,
    /// The file looked like an image but could not be decoded
    DecodeFailed,
    /// Export requested before any image was loaded
    NoImage,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Alert::InvalidFile => "Please upload a valid image file.",
            Alert::DecodeFailed => "The image could not be read. It may be corrupt.",
            Alert::NoImage => "Please upload an image first.",
        };
        f.write_str(msg)
    }
}

/// Host hook that shows a blocking message to the user.
pub trait AlertSink: Send + Sync {
    fn alert(&self, alert: &Alert);
}

/// Drops every alert
pub struct NoopAlerts;

impl AlertSink for NoopAlerts {
    fn alert(&self, _alert: &Alert) {}
}

/// Reports alerts through the `log` facade
pub struct LogAlerts;

impl AlertSink for LogAlerts {
    fn alert(&self, alert: &Alert) {
        warn!("{}", alert);
    }
}

/// Keeps alerts in memory so tests can inspect them. Clones share storage.
#[derive(Clone, Default)]
pub struct RecordingAlerts {
    seen: Arc<Mutex<Vec<Alert>>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.seen.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.seen.lock().unwrap().clear();
    }
}

impl AlertSink for RecordingAlerts {
    fn alert(&self, alert: &Alert) {
        self.seen.lock().unwrap().push(alert.clone());
    }
}
