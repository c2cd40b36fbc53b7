// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton topologies, bone extraction and colors.

/// Color definitions.
pub mod color;

/// Bone-line extraction and axis remapping.
pub mod segments;

/// Per-dataset skeleton registry.
pub mod skeleton;

pub use color::Color;
pub use segments::{BoneLines, apply_axis_matrix, extract_segments};
pub use skeleton::{AxisMatrix, IDENTITY, TOPOLOGIES, Topology, lookup};
