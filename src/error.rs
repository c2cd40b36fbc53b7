// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the label visualization library.

use std::fmt;

/// Result type alias for visualization operations.
pub type Result<T> = std::result::Result<T, VisError>;

/// Main error type for the label visualization library.
#[derive(Debug)]
pub enum VisError {
    /// The dataset name does not match any registered skeleton topology.
    UnknownDataset(String),
    /// A joint connection references a keypoint row that does not exist.
    IndexOutOfRange {
        /// Offending keypoint index.
        index: usize,
        /// Number of rows in the keypoint table.
        len: usize,
    },
    /// Error reading or validating label files.
    LabelError(String),
    /// Error loading, drawing or saving images.
    ImageError(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// IO error (file not found, permission denied, etc.).
    IoError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
}

impl fmt::Display for VisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDataset(name) => write!(
                f,
                "Unknown dataset '{name}', expected one of: {}",
                crate::dataset::Dataset::names().join(", ")
            ),
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "Keypoint index {index} out of range for table with {len} rows"
            ),
            Self::LabelError(msg) => write!(f, "Label error: {msg}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::IoError(msg) => write!(f, "IO error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for VisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VisError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for VisError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

impl From<serde_json::Error> for VisError {
    fn from(err: serde_json::Error) -> Self {
        Self::LabelError(err.to_string())
    }
}
