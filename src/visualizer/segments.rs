// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Bone-line extraction and axis remapping.

use ndarray::{Array2, ArrayView2};

use crate::error::{Result, VisError};
use crate::visualizer::skeleton::AxisMatrix;

/// Flattened bone coordinates for a single multi-segment line draw.
///
/// Each connection contributes its two endpoints followed by a `None` break marker,
/// so a renderer never joins unrelated bones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoneLines {
    /// X coordinates.
    pub x: Vec<Option<f32>>,
    /// Y coordinates.
    pub y: Vec<Option<f32>>,
    /// Z coordinates, present for 3-column keypoint tables.
    pub z: Option<Vec<Option<f32>>>,
}

impl BoneLines {
    /// Number of entries in each sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` when there are no bones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Drawable bones as `(start, end)` point pairs.
    ///
    /// Points are `[x, y, z]`, with `z = 0.0` for 2D tables.
    #[must_use]
    pub fn segments(&self) -> Vec<([f32; 3], [f32; 3])> {
        let point = |i: usize| -> Option<[f32; 3]> {
            let z = match &self.z {
                Some(z) => z[i]?,
                None => 0.0,
            };
            Some([self.x[i]?, self.y[i]?, z])
        };

        (0..self.len())
            .step_by(3)
            .filter_map(|i| Some((point(i)?, point(i + 1)?)))
            .collect()
    }
}

/// Extract bone line coordinates from a keypoint table.
///
/// # Arguments
///
/// * `keypoints` - Table with one row per joint and 2 or 3 coordinate columns.
/// * `connections` - Pairs of row indices to connect.
///
/// # Errors
///
/// Returns [`VisError::ConfigError`] if `keypoints` does not have 2 or 3 columns, and
/// [`VisError::IndexOutOfRange`] if a connection references a missing row.
pub fn extract_segments(
    keypoints: ArrayView2<'_, f32>,
    connections: &[(usize, usize)],
) -> Result<BoneLines> {
    let cols = keypoints.ncols();
    if !(2..=3).contains(&cols) {
        return Err(VisError::ConfigError(format!(
            "keypoints need 2 or 3 columns, got {cols}"
        )));
    }
    let rows = keypoints.nrows();
    let with_z = cols == 3;
    let capacity = connections.len() * 3;

    let mut lines = BoneLines {
        x: Vec::with_capacity(capacity),
        y: Vec::with_capacity(capacity),
        z: with_z.then(|| Vec::with_capacity(capacity)),
    };

    for &(a, b) in connections {
        for index in [a, b] {
            if index >= rows {
                return Err(VisError::IndexOutOfRange { index, len: rows });
            }
            lines.x.push(Some(keypoints[[index, 0]]));
            lines.y.push(Some(keypoints[[index, 1]]));
            if let Some(z) = lines.z.as_mut() {
                z.push(Some(keypoints[[index, 2]]));
            }
        }
        lines.x.push(None);
        lines.y.push(None);
        if let Some(z) = lines.z.as_mut() {
            z.push(None);
        }
    }

    Ok(lines)
}

/// Apply an axis-remap matrix to row-vector 3D keypoints (`points · R`).
///
/// # Errors
///
/// Returns [`VisError::ConfigError`] if `points` does not have 3 columns.
pub fn apply_axis_matrix(points: ArrayView2<'_, f32>, matrix: &AxisMatrix) -> Result<Array2<f32>> {
    if points.ncols() != 3 {
        return Err(VisError::ConfigError(format!(
            "axis remap needs 3 columns, got {}",
            points.ncols()
        )));
    }
    let r = Array2::from_shape_fn((3, 3), |(i, j)| matrix[i][j]);
    Ok(points.dot(&r))
}
