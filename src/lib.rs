// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]

//! # MBW Label Visualization Library
//!
//! Renders the labels of multi-view motion-capture datasets: 2D keypoint skeletons and
//! bounding boxes drawn over the camera images, and 3D reconstructions drawn from an
//! orbiting viewpoint.
//!
//! ## Features
//!
//! - **Skeleton Registry** - Bone connectivity, range scale and axis remap for every dataset
//! - **Bone Lines** - Connected keypoint pairs flattened into `None`-separated polylines
//! - **Multi-View Frames** - All camera views of a frame annotated and tiled side by side
//! - **3D Scenes** - Perspective renderer with a bounding wireframe and a rotating camera
//! - **Parallel Rendering** - Frames are independent and render on all cores
//!
//! ## Data Layout
//!
//! ```text
//! Data/<dataset>/
//!     annot/*.json        one label file per camera, natural order
//!     images/CAM_1/...    one image per frame, natural order
//!     images/CAM_2/...
//! ```
//!
//! Rendered frames are written to `<output>/<dataset>/<label type>/<frame>.<ext>`.
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use mbw_label_vis::{Dataset, LabelType, RenderConfig, VisualizeJob, visualize};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let job = VisualizeJob::new(Dataset::Chimpanzee, LabelType::Keypoints2D, "Data", "Label_Vis")
//!         .with_config(RenderConfig::new().with_only_confident(true));
//!
//!     let summary = visualize::run(&job)?;
//!     println!("Saved {} frames to {}", summary.saved.len(), summary.save_dir.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Bone Lines
//!
//! ```rust
//! use mbw_label_vis::{extract_segments, lookup};
//! use ndarray::array;
//!
//! let topology = lookup("Fish").unwrap();
//! let keypoints = ndarray::Array2::<f32>::zeros((12, 2));
//! let lines = extract_segments(keypoints.view(), topology.connections).unwrap();
//! assert_eq!(lines.len(), 3 * topology.num_connections());
//!
//! let pair = array![[0.0_f32, 0.0], [3.0, 4.0]];
//! let lines = extract_segments(pair.view(), &[(0, 1)]).unwrap();
//! assert_eq!(lines.x, vec![Some(0.0), Some(3.0), None]);
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # 2D keypoints of the default dataset
//! mbw-label-vis visualize
//!
//! # 3D reconstructions as jpg
//! mbw-label-vis visualize --dataset Fish --label-type 3D --format jpg
//!
//! # Bounding boxes in a custom color
//! mbw-label-vis visualize -d Tiger -t BBox --color "rgb(30, 20, 160)"
//!
//! # Registered skeletons
//! mbw-label-vis datasets
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`visualizer`] | Skeleton registry ([`Topology`], [`lookup`]), bone lines, colors |
//! | [`labels`] | Per-camera label files ([`LabelSet`], [`FrameLabel`], [`BBox`]) |
//! | [`source`] | Dataset directory layout and image loading |
//! | [`annotate`] | 2D skeleton and bounding box drawing, view tiling |
//! | [`scene`] | 3D perspective rendering |
//! | [`visualize`] | End-to-end [`VisualizeJob`] runner |
//! | [`error`] | Error types ([`VisError`], [`Result`]) |
//!
//! ## License
//!
//! This project is licensed under [AGPL-3.0](https://ultralytics.com/license).

// Modules
pub mod annotate;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod label_type;
pub mod labels;
pub mod scene;
pub mod source;
pub mod utils;
pub mod visualize;
pub mod visualizer;

// Re-export main types for convenience
pub use config::RenderConfig;
pub use dataset::Dataset;
pub use error::{Result, VisError};
pub use io::{FrameWriter, ImageFormat};
pub use label_type::LabelType;
pub use labels::{BBox, CameraLabels, FrameLabel, LabelSet};
pub use scene::SceneRenderer;
pub use source::DatasetLayout;
pub use visualize::{Summary, VisualizeJob};
pub use visualizer::{
    AxisMatrix, BoneLines, Color, Topology, apply_axis_matrix, extract_segments, lookup,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
