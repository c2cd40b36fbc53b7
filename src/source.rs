// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Dataset directory layout and camera image discovery.
//!
//! A dataset lives under `<data_root>/<dataset>/` with camera images in
//! `images/CAM_1/`, `images/CAM_2/`, ... and per-camera label files in `annot/`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::dataset::Dataset;
use crate::error::{Result, VisError};
use crate::utils::natural_sort;

/// Paths of one dataset on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    /// Dataset the layout belongs to.
    pub dataset: Dataset,
    /// `<data_root>/<dataset>`.
    pub root: PathBuf,
}

impl DatasetLayout {
    /// Create the layout for `dataset` under `data_root`.
    #[must_use]
    pub fn new(data_root: impl AsRef<Path>, dataset: Dataset) -> Self {
        Self {
            dataset,
            root: data_root.as_ref().join(dataset.as_str()),
        }
    }

    /// Directory holding one sub-directory per camera.
    #[must_use]
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// Directory holding the label files.
    #[must_use]
    pub fn annot_dir(&self) -> PathBuf {
        self.root.join("annot")
    }

    /// Image directory of a camera (`cam_idx` is zero-based, folders are one-based).
    #[must_use]
    pub fn camera_dir(&self, cam_idx: usize) -> PathBuf {
        self.images_dir().join(format!("CAM_{}", cam_idx + 1))
    }

    /// Images of a camera in natural order.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera directory does not exist or cannot be read.
    pub fn camera_frames(&self, cam_idx: usize) -> Result<Vec<PathBuf>> {
        collect_images_from_dir(&self.camera_dir(cam_idx))
    }

    /// Images of the first `num_views` cameras, indexed `[camera][frame]`.
    ///
    /// # Errors
    ///
    /// Returns an error if a camera directory cannot be read or holds fewer than
    /// `num_frames` images.
    pub fn all_camera_frames(&self, num_views: usize, num_frames: usize) -> Result<Vec<Vec<PathBuf>>> {
        (0..num_views)
            .map(|cam_idx| {
                let frames = self.camera_frames(cam_idx)?;
                if frames.len() < num_frames {
                    return Err(VisError::ImageError(format!(
                        "{} has {} images but labels cover {num_frames} frames",
                        self.camera_dir(cam_idx).display(),
                        frames.len()
                    )));
                }
                Ok(frames)
            })
            .collect()
    }
}

/// Collect image paths from a directory.
fn collect_images_from_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(VisError::ImageError(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| VisError::IoError(format!("Failed to read {}: {e}", dir.display())))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_image_file(path))
        .collect();

    natural_sort(&mut paths);
    Ok(paths)
}

/// Check if a path is an image file based on extension.
fn is_image_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "jpg" | "jpeg" | "png")
    })
}

/// Load an image, decoding JPEGs with `jpeg-decoder` first.
///
/// Falls back to `image::open` for other formats and for JPEG pixel layouts the
/// direct path does not handle.
///
/// # Errors
///
/// Returns [`VisError::ImageError`] if the image cannot be decoded.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    if matches!(ext.as_deref(), Some("jpg" | "jpeg"))
        && let Some(img) = decode_jpeg(path)
    {
        return Ok(img);
    }

    image::open(path)
        .map_err(|e| VisError::ImageError(format!("Failed to load {}: {e}", path.display())))
}

fn decode_jpeg(path: &Path) -> Option<DynamicImage> {
    let file = File::open(path).ok()?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder.decode().ok()?;
    let info = decoder.info()?;
    let (width, height) = (u32::from(info.width), u32::from(info.height));

    match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => {
            image::ImageBuffer::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
        }
        jpeg_decoder::PixelFormat::L8 => {
            image::ImageBuffer::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8)
        }
        _ => None,
    }
}
