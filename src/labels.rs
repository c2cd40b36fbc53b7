// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Label files produced by the multi-view labeling pipeline.
//!
//! A dataset's `annot/` directory holds one JSON file per camera. Each file is an array
//! with one record per frame:
//!
//! ```json
//! [
//!   {
//!     "W_Pred": [[x, y], ...],
//!     "S_Pred": [[x, y, z], ...],
//!     "W_GT": [[x, y], ...],
//!     "confidence": true,
//!     "BBox": [xmax, xmin, ymax, ymin]
//!   }
//! ]
//! ```
//!
//! Camera files are ordered naturally by name (`cam2` before `cam10`).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::Deserialize;

use crate::error::{Result, VisError};
use crate::utils::natural_sort;

/// Confidence flag as written by the labeling pipeline.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RawConfidence {
    Flag(bool),
    Score(f64),
}

impl RawConfidence {
    fn is_confident(self) -> bool {
        match self {
            Self::Flag(flag) => flag,
            Self::Score(score) => score != 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(rename = "W_Pred")]
    w_pred: Vec<Vec<f32>>,
    #[serde(rename = "S_Pred")]
    s_pred: Vec<Vec<f32>>,
    #[serde(rename = "W_GT")]
    w_gt: Vec<Vec<f32>>,
    confidence: RawConfidence,
    #[serde(rename = "BBox")]
    bbox: [f32; 4],
}

/// Axis-aligned bounding box in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    /// Right edge.
    pub xmax: f32,
    /// Left edge.
    pub xmin: f32,
    /// Bottom edge.
    pub ymax: f32,
    /// Top edge.
    pub ymin: f32,
}

impl BBox {
    /// Build from the on-disk `[xmax, xmin, ymax, ymin]` order.
    #[must_use]
    pub const fn from_label(values: [f32; 4]) -> Self {
        Self {
            xmax: values[0],
            xmin: values[1],
            ymax: values[2],
            ymin: values[3],
        }
    }

    /// Width (`xmax - xmin`).
    #[must_use]
    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    /// Height (`ymax - ymin`).
    #[must_use]
    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }
}

/// Labels of one camera view at one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLabel {
    /// Predicted 2D keypoints, shape (joints, 2).
    pub w_pred: Array2<f32>,
    /// Predicted 3D keypoints, shape (joints, 3).
    pub s_pred: Array2<f32>,
    /// Ground-truth 2D keypoints, shape (joints, 2).
    pub w_gt: Array2<f32>,
    /// Whether the prediction for this view passed the confidence check.
    pub confident: bool,
    /// Bounding box of the subject.
    pub bbox: BBox,
}

impl FrameLabel {
    fn from_raw(raw: RawFrame, frame_idx: usize) -> Result<Self> {
        Ok(Self {
            w_pred: to_array(raw.w_pred, 2, "W_Pred", frame_idx)?,
            s_pred: to_array(raw.s_pred, 3, "S_Pred", frame_idx)?,
            w_gt: to_array(raw.w_gt, 2, "W_GT", frame_idx)?,
            confident: raw.confidence.is_confident(),
            bbox: BBox::from_label(raw.bbox),
        })
    }

    /// Returns `true` when no coordinate of the 3D prediction is exactly zero.
    ///
    /// Frames without a 3D reconstruction are stored with zeroed keypoints.
    #[must_use]
    pub fn has_3d(&self) -> bool {
        !self.s_pred.is_empty() && self.s_pred.iter().all(|&v| v != 0.0)
    }
}

fn to_array(rows: Vec<Vec<f32>>, cols: usize, field: &str, frame_idx: usize) -> Result<Array2<f32>> {
    let n = rows.len();
    let mut flat = Vec::with_capacity(n * cols);
    for (joint, row) in rows.into_iter().enumerate() {
        if row.len() != cols {
            return Err(VisError::LabelError(format!(
                "frame {frame_idx}: {field} joint {joint} has {} values, expected {cols}",
                row.len()
            )));
        }
        flat.extend(row);
    }
    Array2::from_shape_vec((n, cols), flat)
        .map_err(|e| VisError::LabelError(format!("frame {frame_idx}: {field}: {e}")))
}

/// All frames of one camera view.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraLabels {
    /// File the labels were read from.
    pub path: PathBuf,
    /// Per-frame labels.
    pub frames: Vec<FrameLabel>,
}

impl CameraLabels {
    /// Parse camera labels from a JSON reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a keypoint row has the wrong width.
    pub fn from_reader<R: Read>(reader: R, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw: Vec<RawFrame> = serde_json::from_reader(reader)
            .map_err(|e| VisError::LabelError(format!("{}: {e}", path.display())))?;
        let frames = raw
            .into_iter()
            .enumerate()
            .map(|(idx, frame)| FrameLabel::from_raw(frame, idx))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { path, frames })
    }

    /// Read camera labels from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            VisError::IoError(format!("Failed to open {}: {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(file), path)
    }
}

/// Labels of every camera view of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSet {
    /// One entry per camera, in natural file order.
    pub cameras: Vec<CameraLabels>,
}

impl LabelSet {
    /// Build a label set, checking that every camera has the same number of frames.
    ///
    /// # Errors
    ///
    /// Returns [`VisError::LabelError`] for an empty set or mismatched frame counts.
    pub fn new(cameras: Vec<CameraLabels>) -> Result<Self> {
        let Some(first) = cameras.first() else {
            return Err(VisError::LabelError("no camera labels".to_string()));
        };
        let frames = first.frames.len();
        if let Some(other) = cameras.iter().find(|c| c.frames.len() != frames) {
            return Err(VisError::LabelError(format!(
                "{} has {} frames but {} has {frames}",
                other.path.display(),
                other.frames.len(),
                first.path.display()
            )));
        }
        Ok(Self { cameras })
    }

    /// Load every `*.json` label file in `annot_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read, holds no label files, or
    /// any file fails to parse.
    pub fn load_dir(annot_dir: &Path) -> Result<Self> {
        let mut paths = label_files(annot_dir)?;
        if paths.is_empty() {
            return Err(VisError::LabelError(format!(
                "No label files found in {}",
                annot_dir.display()
            )));
        }
        natural_sort(&mut paths);

        let cameras = paths
            .iter()
            .map(|path| CameraLabels::from_path(path))
            .collect::<Result<Vec<_>>>()?;
        Self::new(cameras)
    }

    /// Number of camera views.
    #[must_use]
    pub fn num_views(&self) -> usize {
        self.cameras.len()
    }

    /// Number of frames per view.
    #[must_use]
    pub fn num_frames(&self) -> usize {
        self.cameras.first().map_or(0, |c| c.frames.len())
    }

    /// Number of keypoints per frame, read from the first ground-truth record.
    #[must_use]
    pub fn num_joints(&self) -> Option<usize> {
        self.cameras
            .first()
            .and_then(|c| c.frames.first())
            .map(|f| f.w_gt.nrows())
    }

    /// Labels of every view at `frame_idx`.
    #[must_use]
    pub fn frame(&self, frame_idx: usize) -> Vec<&FrameLabel> {
        self.cameras
            .iter()
            .filter_map(|c| c.frames.get(frame_idx))
            .collect()
    }
}

fn label_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(VisError::LabelError(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let paths = std::fs::read_dir(dir)
        .map_err(|e| VisError::IoError(format!("Failed to read {}: {e}", dir.display())))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
        })
        .collect();
    Ok(paths)
}
