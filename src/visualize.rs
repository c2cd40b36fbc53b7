// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! End-to-end label visualization of one dataset.
//!
//! Loads the dataset's labels, renders every frame for the requested [`LabelType`] and
//! writes the images with a [`FrameWriter`]. Frames are independent and render in
//! parallel; a frame that fails is recorded and the rest continue.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::annotate::annotate_frame;
use crate::config::RenderConfig;
use crate::dataset::Dataset;
use crate::error::{Result, VisError};
use crate::io::{FrameWriter, ImageFormat};
use crate::label_type::LabelType;
use crate::labels::LabelSet;
use crate::scene::SceneRenderer;
use crate::source::{DatasetLayout, load_image};
use crate::visualizer::Topology;
use crate::{verbose, warn};

/// Everything needed to visualize one dataset.
#[derive(Debug, Clone)]
pub struct VisualizeJob {
    /// Dataset to render.
    pub dataset: Dataset,
    /// Kind of labels to render.
    pub label_type: LabelType,
    /// Directory containing one sub-directory per dataset.
    pub data_root: PathBuf,
    /// Root of the output tree.
    pub output_root: PathBuf,
    /// Output image format.
    pub format: ImageFormat,
    /// Colors and stroke settings.
    pub config: RenderConfig,
}

impl VisualizeJob {
    /// Create a job with default rendering settings.
    #[must_use]
    pub fn new(
        dataset: Dataset,
        label_type: LabelType,
        data_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dataset,
            label_type,
            data_root: data_root.into(),
            output_root: output_root.into(),
            format: ImageFormat::default(),
            config: RenderConfig::default(),
        }
    }

    /// Set the output image format.
    #[must_use]
    pub const fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the rendering configuration.
    #[must_use]
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }
}

/// Outcome of a visualization run.
#[derive(Debug, Default)]
pub struct Summary {
    /// Directory the images were written to.
    pub save_dir: PathBuf,
    /// Written image paths, in frame order.
    pub saved: Vec<PathBuf>,
    /// Frames skipped because they carry no 3D reconstruction.
    pub skipped: usize,
    /// Frames that failed, with the reason.
    pub failed: Vec<(usize, VisError)>,
}

/// Render every frame of a dataset.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the labels cannot be loaded, the
/// camera images are missing or the output directory cannot be created. Errors on
/// individual frames are collected in [`Summary::failed`] instead.
pub fn run(job: &VisualizeJob) -> Result<Summary> {
    job.config.validate()?;
    let topology = Topology::for_dataset(job.dataset);
    let layout = DatasetLayout::new(&job.data_root, job.dataset);

    let labels = LabelSet::load_dir(&layout.annot_dir())?;
    verbose!(
        "{}: {} views, {} frames, {} bones",
        job.dataset,
        labels.num_views(),
        labels.num_frames(),
        topology.num_connections()
    );

    if let Some(joints) = labels.num_joints()
        && joints != topology.num_joints
    {
        warn!(
            "{} labels have {joints} keypoints, skeleton expects {}",
            job.dataset, topology.num_joints
        );
    }

    let writer = FrameWriter::new(&job.output_root, job.dataset, job.label_type, job.format)?;

    let mut summary = if job.label_type.uses_images() {
        render_image_labels(job, topology, &layout, &labels, &writer)?
    } else {
        render_scene_labels(job, topology, &labels, &writer)?
    };
    summary.save_dir = writer.save_dir().to_path_buf();
    Ok(summary)
}

fn collect(results: Vec<(usize, Result<PathBuf>)>, skipped: usize) -> Summary {
    let mut summary = Summary {
        skipped,
        ..Summary::default()
    };
    for (frame_idx, result) in results {
        match result {
            Ok(path) => summary.saved.push(path),
            Err(e) => summary.failed.push((frame_idx, e)),
        }
    }
    summary
}

fn render_image_labels(
    job: &VisualizeJob,
    topology: &Topology,
    layout: &DatasetLayout,
    labels: &LabelSet,
    writer: &FrameWriter,
) -> Result<Summary> {
    let image_paths = layout.all_camera_frames(labels.num_views(), labels.num_frames())?;

    let results: Vec<(usize, Result<PathBuf>)> = (0..labels.num_frames())
        .into_par_iter()
        .map(|frame_idx| {
            let result = render_image_frame(
                frame_idx,
                &image_paths,
                job,
                topology.connections,
                labels,
                writer,
            );
            (frame_idx, result)
        })
        .collect();

    Ok(collect(results, 0))
}

fn render_image_frame(
    frame_idx: usize,
    image_paths: &[Vec<PathBuf>],
    job: &VisualizeJob,
    connections: &[(usize, usize)],
    labels: &LabelSet,
    writer: &FrameWriter,
) -> Result<PathBuf> {
    let images = image_paths
        .iter()
        .map(|camera| load_image(&camera[frame_idx]))
        .collect::<Result<Vec<_>>>()?;
    let annotated = annotate_frame(
        &images,
        &labels.frame(frame_idx),
        job.label_type,
        connections,
        &job.config,
    )?;
    writer.save(frame_idx, &annotated)
}

fn render_scene_labels(
    job: &VisualizeJob,
    topology: &Topology,
    labels: &LabelSet,
    writer: &FrameWriter,
) -> Result<Summary> {
    let renderer = SceneRenderer::new(topology, &job.config)?;

    // 3D predictions are shared by all views, take them from the first camera
    let frames: Vec<_> = labels
        .cameras
        .first()
        .map(|camera| {
            camera
                .frames
                .iter()
                .enumerate()
                .filter(|(_, frame)| frame.has_3d())
                .collect()
        })
        .unwrap_or_default();
    let skipped = labels.num_frames() - frames.len();

    let results: Vec<(usize, Result<PathBuf>)> = frames
        .par_iter()
        .enumerate()
        .map(|(step, (frame_idx, frame))| {
            let result = renderer
                .render(frame.s_pred.view(), step)
                .and_then(|img| writer.save(*frame_idx, &img));
            (*frame_idx, result)
        })
        .collect();

    Ok(collect(results, skipped))
}
