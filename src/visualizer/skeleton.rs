// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton topology registry.
//!
//! Each dataset maps to a static [`Topology`]: the keypoint index pairs drawn as bones,
//! the range scale of its 3D plot and the axis-remap matrix that puts the subject's
//! up axis where the renderer expects it.

use crate::dataset::Dataset;
use crate::error::Result;

/// 3x3 axis-remap matrix applied to row-vector keypoints (`p' = p · R`).
pub type AxisMatrix = [[f32; 3]; 3];

/// Identity axis matrix.
pub const IDENTITY: AxisMatrix = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Skeleton topology of one dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topology {
    /// Dataset this topology belongs to.
    pub dataset: Dataset,
    /// Pairs of keypoint indices connected by a bone.
    pub connections: &'static [(usize, usize)],
    /// Multiplier for the 3D plot's bounding box.
    pub range_scale: f32,
    /// Axis remap applied to 3D keypoints before plotting.
    pub axis_matrix: AxisMatrix,
    /// Number of keypoints per frame in this dataset's labels.
    pub num_joints: usize,
}

impl Topology {
    /// Topology registered for `dataset`.
    #[must_use]
    pub fn for_dataset(dataset: Dataset) -> &'static Self {
        // TOPOLOGIES is laid out in `Dataset::ALL` order
        &TOPOLOGIES[dataset as usize]
    }

    /// Number of bones.
    #[must_use]
    pub const fn num_connections(&self) -> usize {
        self.connections.len()
    }

    /// Largest keypoint index referenced by a bone.
    #[must_use]
    pub fn max_joint_index(&self) -> Option<usize> {
        self.connections.iter().map(|&(a, b)| a.max(b)).max()
    }
}

/// Look up the topology of a dataset by name.
///
/// Names are matched case-insensitively and `-` is accepted for `_`.
///
/// # Errors
///
/// Returns [`crate::VisError::UnknownDataset`] for names outside the registry.
pub fn lookup(dataset_name: &str) -> Result<&'static Topology> {
    let dataset: Dataset = dataset_name.parse()?;
    Ok(Topology::for_dataset(dataset))
}

const HUMAN: [(usize, usize); 16] = [
    (14, 15),
    (15, 16),
    (13, 12),
    (12, 11),
    (9, 8),
    (8, 7),
    (4, 5),
    (5, 6),
    (3, 2),
    (2, 1),
    (7, 0),
    (0, 4),
    (0, 1),
    (8, 11),
    (8, 14),
    (9, 10),
];

const CHEETAH: [(usize, usize); 21] = [
    (3, 1),
    (1, 0),
    (1, 2),
    (3, 4),
    (4, 5),
    (5, 6),
    (6, 7),
    (8, 9),
    (9, 10),
    (3, 8),
    (3, 11),
    (11, 12),
    (12, 13),
    (5, 17),
    (17, 18),
    (18, 19),
    (5, 14),
    (14, 15),
    (15, 16),
    (4, 14),
    (4, 17),
];

const FLAMINGO: [(usize, usize); 11] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (4, 5),
    (5, 6),
    (3, 6),
    (6, 7),
    (7, 8),
    (6, 9),
    (9, 10),
];

const TIGER: [(usize, usize); 15] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (2, 5),
    (5, 6),
    (2, 7),
    (7, 8),
    (8, 9),
    (9, 10),
    (8, 11),
    (11, 12),
    (8, 13),
    (13, 14),
    (14, 15),
];

const FISH: [(usize, usize); 15] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (1, 3),
    (3, 4),
    (4, 5),
    (5, 6),
    (6, 7),
    (5, 7),
    (5, 8),
    (8, 9),
    (9, 10),
    (8, 10),
    (10, 11),
    (11, 0),
];

/// Shared by both primate datasets.
const PRIMATE: [(usize, usize); 15] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (1, 5),
    (5, 6),
    (6, 7),
    (1, 8),
    (8, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
];

const FLY: [(usize, usize); 27] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (5, 6),
    (6, 7),
    (7, 8),
    (8, 9),
    (10, 11),
    (11, 12),
    (12, 13),
    (13, 14),
    (16, 17),
    (17, 18),
    (19, 20),
    (20, 21),
    (21, 22),
    (22, 23),
    (24, 25),
    (25, 26),
    (26, 27),
    (27, 28),
    (29, 30),
    (31, 32),
    (32, 33),
    (35, 36),
    (36, 37),
];

/// Swaps Y and Z.
const FISH_AXES: AxisMatrix = [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]];
const COLOBUS_AXES: AxisMatrix = [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
const CHIMPANZEE_AXES: AxisMatrix = [[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]];

/// Registry, one entry per [`Dataset`] in declaration order.
pub static TOPOLOGIES: [Topology; 8] = [
    Topology {
        dataset: Dataset::Human,
        connections: &HUMAN,
        range_scale: 1.0,
        axis_matrix: IDENTITY,
        num_joints: 17,
    },
    Topology {
        dataset: Dataset::Cheetah,
        connections: &CHEETAH,
        range_scale: 1.0,
        axis_matrix: IDENTITY,
        num_joints: 20,
    },
    Topology {
        dataset: Dataset::Flamingo,
        connections: &FLAMINGO,
        range_scale: 1.0,
        axis_matrix: IDENTITY,
        num_joints: 11,
    },
    Topology {
        dataset: Dataset::Tiger,
        connections: &TIGER,
        range_scale: 1.0,
        axis_matrix: IDENTITY,
        num_joints: 16,
    },
    Topology {
        dataset: Dataset::Fish,
        connections: &FISH,
        range_scale: 2.0,
        axis_matrix: FISH_AXES,
        num_joints: 12,
    },
    Topology {
        dataset: Dataset::ColobusMonkey,
        connections: &PRIMATE,
        range_scale: 1.0,
        axis_matrix: COLOBUS_AXES,
        num_joints: 16,
    },
    Topology {
        dataset: Dataset::Chimpanzee,
        connections: &PRIMATE,
        range_scale: 1.0,
        axis_matrix: CHIMPANZEE_AXES,
        num_joints: 16,
    },
    Topology {
        dataset: Dataset::Fly,
        connections: &FLY,
        range_scale: 1.0,
        axis_matrix: IDENTITY,
        num_joints: 38,
    },
];
