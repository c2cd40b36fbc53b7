// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Saving rendered label images.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::RgbImage;

use crate::dataset::Dataset;
use crate::error::{Result, VisError};
use crate::label_type::LabelType;

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// JPEG.
    Jpg,
}

impl ImageFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }

    const fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpg => image::ImageFormat::Jpeg,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = VisError;

    /// Accepts `png`, `.png`, `jpg`, `.jpg` and `jpeg`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            _ => Err(VisError::ConfigError(format!(
                "invalid image format '{s}', expected png or jpg"
            ))),
        }
    }
}

/// Writes one image per frame to `<output>/<dataset>/<label type>/<frame>.<ext>`.
#[derive(Debug, Clone)]
pub struct FrameWriter {
    save_dir: PathBuf,
    format: ImageFormat,
}

impl FrameWriter {
    /// Create a writer and its output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(
        output_root: &Path,
        dataset: Dataset,
        label_type: LabelType,
        format: ImageFormat,
    ) -> Result<Self> {
        let save_dir = output_root
            .join(dataset.as_str())
            .join(label_type.as_str());
        std::fs::create_dir_all(&save_dir).map_err(|e| {
            VisError::IoError(format!(
                "Failed to create directory {}: {e}",
                save_dir.display()
            ))
        })?;
        Ok(Self { save_dir, format })
    }

    /// Directory frames are written to.
    #[must_use]
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Path of the image for `frame_idx`.
    #[must_use]
    pub fn frame_path(&self, frame_idx: usize) -> PathBuf {
        self.save_dir
            .join(format!("{frame_idx}.{}", self.format.extension()))
    }

    /// Save the image of `frame_idx`, returning its path.
    ///
    /// # Errors
    ///
    /// Returns [`VisError::ImageError`] if encoding or writing fails.
    pub fn save(&self, frame_idx: usize, image: &RgbImage) -> Result<PathBuf> {
        let path = self.frame_path(frame_idx);
        image
            .save_with_format(&path, self.format.to_image_format())
            .map_err(|e| {
                VisError::ImageError(format!("Failed to save {}: {e}", path.display()))
            })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_image_format_from_str() {
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!(".jpg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpg);
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpg);
        assert!("blue".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_frame_writer_layout_and_save() {
        let root = std::env::temp_dir().join(format!("mbw-label-vis-io-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);

        let writer =
            FrameWriter::new(&root, Dataset::Tiger, LabelType::BBox, ImageFormat::Jpg).unwrap();
        assert_eq!(writer.save_dir(), root.join("Tiger").join("BBox"));
        assert_eq!(writer.frame_path(12), root.join("Tiger/BBox/12.jpg"));

        let img = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let path = writer.save(3, &img).unwrap();
        assert!(path.exists());
        assert_eq!(image::open(&path).unwrap().width(), 4);

        std::fs::remove_dir_all(&root).unwrap();
    }
}
