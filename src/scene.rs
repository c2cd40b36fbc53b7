// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! 3D keypoint rendering.
//!
//! Keypoints are remapped with the dataset's axis matrix, scaled by its range scale and
//! viewed through a perspective camera that circles the subject, one step per rendered
//! frame. The scene box spans `±0.4` horizontally and `±1` vertically, matching the
//! tall aspect of most captured subjects.

use std::f32::consts::TAU;

use image::{Rgb, RgbImage};
use nalgebra::{Isometry3, Perspective3, Point3, Vector3};
use ndarray::{Array2, ArrayView2};

use crate::annotate::{draw_marker, draw_thick_line};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::visualizer::{Color, Topology, apply_axis_matrix, extract_segments};

/// Half extents of the scene box along its x, y and z (up) axes.
pub const SCENE_HALF_EXTENTS: [f32; 3] = [0.4, 0.4, 1.0];

const ZNEAR: f32 = 1e-3;
const ZFAR: f32 = 1e3;

/// Eye positions of a camera circling the scene center at a fixed height.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn camera_orbit(steps: usize, radius: f32, height: f32) -> Vec<Point3<f32>> {
    (0..steps)
        .map(|k| {
            let theta = TAU * k as f32 / steps as f32;
            Point3::new(radius * theta.cos(), radius * theta.sin(), height)
        })
        .collect()
}

/// Perspective camera looking at the scene center with `+z` up.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    view: Isometry3<f32>,
    projection: Perspective3<f32>,
    width: f32,
    height: f32,
}

impl Camera {
    /// Create a camera at `eye` rendering onto a `width x height` canvas.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn look_at_origin(eye: Point3<f32>, fov_degrees: f32, width: u32, height: u32) -> Self {
        let (width, height) = (width as f32, height as f32);
        Self {
            view: Isometry3::look_at_rh(&eye, &Point3::origin(), &Vector3::z()),
            projection: Perspective3::new(width / height, fov_degrees.to_radians(), ZNEAR, ZFAR),
            width,
            height,
        }
    }

    /// Pixel position of a scene point, or `None` if it is not in front of the camera.
    #[must_use]
    pub fn project(&self, point: &Point3<f32>) -> Option<(f32, f32)> {
        let local = self.view.transform_point(point);
        // the camera looks down -z in view space
        if local.z.is_nan() || local.z >= -ZNEAR {
            return None;
        }
        let ndc = self.projection.project_point(&local);
        Some((
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        ))
    }
}

/// Renders 3D keypoints of one dataset.
#[derive(Debug, Clone)]
pub struct SceneRenderer<'a> {
    topology: &'a Topology,
    config: &'a RenderConfig,
    orbit: Vec<Point3<f32>>,
}

impl<'a> SceneRenderer<'a> {
    /// Create a renderer for `topology`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VisError::ConfigError`] if the configuration is invalid.
    pub fn new(topology: &'a Topology, config: &'a RenderConfig) -> Result<Self> {
        config.validate()?;
        let orbit = camera_orbit(config.orbit_steps, config.orbit_radius, config.eye_height);
        Ok(Self {
            topology,
            config,
            orbit,
        })
    }

    /// Camera eye for the `step`-th rendered frame, wrapping after a full orbit.
    #[must_use]
    pub fn eye(&self, step: usize) -> Point3<f32> {
        self.orbit[step % self.orbit.len()]
    }

    /// Map keypoints into scene coordinates.
    ///
    /// Applies the axis matrix, moves the data's Y axis to the scene's up axis and divides
    /// by the range scale.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VisError::ConfigError`] if `points` does not have 3 columns.
    pub fn to_scene(&self, points: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        let remapped = apply_axis_matrix(points, &self.topology.axis_matrix)?;
        let scale = self.topology.range_scale;
        Ok(Array2::from_shape_fn(remapped.dim(), |(i, j)| {
            let source = [0, 2, 1][j];
            remapped[[i, source]] / scale
        }))
    }

    /// Render keypoints as seen from the `step`-th orbit position.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is not a 3-column table or a bone references a
    /// missing keypoint.
    pub fn render(&self, points: ArrayView2<'_, f32>, step: usize) -> Result<RgbImage> {
        let (width, height) = self.config.canvas_size;
        let camera = Camera::look_at_origin(self.eye(step), self.config.fov_degrees, width, height);
        let mut img = RgbImage::from_pixel(width, height, Color::WHITE.to_rgb());

        draw_scene_box(&mut img, &camera, Color::LIGHT_GRAY.to_rgb());

        let scene = self.to_scene(points)?;
        let color = self.config.color.to_rgb();
        let lines = extract_segments(scene.view(), self.topology.connections)?;
        for (a, b) in lines.segments() {
            if let (Some(pa), Some(pb)) = (
                camera.project(&Point3::from(a)),
                camera.project(&Point3::from(b)),
            ) {
                draw_thick_line(&mut img, pa, pb, self.config.line_width, color);
            }
        }

        for row in scene.rows() {
            if let Some(center) = camera.project(&Point3::new(row[0], row[1], row[2])) {
                draw_marker(&mut img, center, self.config.point_radius, color);
            }
        }

        Ok(img)
    }
}

/// Draw the 12 edges of the scene box.
fn draw_scene_box(img: &mut RgbImage, camera: &Camera, color: Rgb<u8>) {
    let [hx, hy, hz] = SCENE_HALF_EXTENTS;
    let corner = |i: usize| {
        Point3::new(
            if i & 1 == 0 { -hx } else { hx },
            if i & 2 == 0 { -hy } else { hy },
            if i & 4 == 0 { -hz } else { hz },
        )
    };

    for i in 0..8 {
        for bit in [1, 2, 4] {
            let j = i | bit;
            if j != i
                && let (Some(a), Some(b)) =
                    (camera.project(&corner(i)), camera.project(&corner(j)))
            {
                draw_thick_line(img, a, b, 1, color);
            }
        }
    }
}
