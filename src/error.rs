//! Error types for the meme compositor

use thiserror::Error;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, composing or exporting a meme
#[derive(Error, Debug)]
pub enum Error {
    /// The selected file does not declare an image MIME type
    #[error("Not an image file: {0}")]
    InvalidFile(String),

    /// The file declared an image type but its bytes could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// An export was requested before any image was loaded
    #[error("No image loaded")]
    NoImage,

    /// PNG encoding of the surface failed
    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    /// Invalid configuration or option value
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem error while reading an upload or writing a download
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Encoding(e) => Error::Encode(e.to_string()),
            other => Error::Decode(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}
