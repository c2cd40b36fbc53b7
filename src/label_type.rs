// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Kinds of labels that can be visualized.

use std::fmt;
use std::str::FromStr;

/// Label kinds produced for each dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabelType {
    /// 2D keypoints and bones drawn over every camera view.
    #[default]
    Keypoints2D,
    /// 3D keypoints rendered from an orbiting camera.
    Keypoints3D,
    /// Bounding boxes drawn over every camera view.
    BBox,
}

impl LabelType {
    /// Returns the name used for the output directory.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Keypoints2D => "2D",
            Self::Keypoints3D => "3D",
            Self::BBox => "BBox",
        }
    }

    /// Returns whether this label type is drawn over camera images.
    #[must_use]
    pub const fn uses_images(&self) -> bool {
        matches!(self, Self::Keypoints2D | Self::BBox)
    }
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LabelType {
    type Err = LabelTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "2d" | "keypoints2d" => Ok(Self::Keypoints2D),
            "3d" | "keypoints3d" => Ok(Self::Keypoints3D),
            "bbox" | "box" | "boxes" => Ok(Self::BBox),
            _ => Err(LabelTypeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid label type string.
#[derive(Debug, Clone)]
pub struct LabelTypeParseError(String);

impl fmt::Display for LabelTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid label type '{}', expected one of: 2D, 3D, BBox",
            self.0
        )
    }
}

impl std::error::Error for LabelTypeParseError {}
