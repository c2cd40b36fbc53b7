// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Rendering configuration.
//!
//! This module defines the [`RenderConfig`] struct, which carries every color and stroke
//! setting the annotators and the 3D scene renderer use. Nothing is read from global
//! state; callers pass the configuration explicitly.

use crate::error::{Result, VisError};
use crate::visualizer::Color;

/// Configuration for label rendering.
///
/// It uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use mbw_label_vis::{Color, RenderConfig};
///
/// let config = RenderConfig::new()
///     .with_color(Color::GREEN)
///     .with_line_width(6)
///     .with_only_confident(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Color of predicted keypoints, bones and boxes.
    pub color: Color,
    /// Color of ground-truth keypoints and bones.
    pub secondary_color: Color,
    /// Radius of keypoint markers in pixels.
    pub point_radius: i32,
    /// Width of bone lines in pixels.
    pub line_width: u32,
    /// Stroke thickness of bounding boxes in pixels.
    pub bbox_thickness: u32,
    /// Only draw 2D keypoints for views whose prediction is confident.
    pub only_confident: bool,
    /// Also draw ground-truth 2D keypoints.
    pub show_ground_truth: bool,
    /// Size of the 3D canvas (width, height).
    pub canvas_size: (u32, u32),
    /// Vertical field of view of the 3D camera in degrees.
    pub fov_degrees: f32,
    /// Horizontal distance of the 3D camera eye from the scene center.
    pub orbit_radius: f32,
    /// Rendered frames per full orbit of the 3D camera.
    pub orbit_steps: usize,
    /// Height of the 3D camera eye above the scene center.
    pub eye_height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            secondary_color: Color::RED,
            point_radius: 6,
            line_width: 4,
            bbox_thickness: 3,
            only_confident: false,
            show_ground_truth: false,
            canvas_size: (700, 700),
            fov_degrees: 60.0,
            orbit_radius: 1.5,
            orbit_steps: 120,
            eye_height: 1.25,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color of predicted labels.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the color of ground-truth labels.
    #[must_use]
    pub const fn with_secondary_color(mut self, color: Color) -> Self {
        self.secondary_color = color;
        self
    }

    /// Set the keypoint marker radius.
    #[must_use]
    pub const fn with_point_radius(mut self, radius: i32) -> Self {
        self.point_radius = radius;
        self
    }

    /// Set the bone line width.
    #[must_use]
    pub const fn with_line_width(mut self, width: u32) -> Self {
        self.line_width = width;
        self
    }

    /// Set the bounding box stroke thickness.
    #[must_use]
    pub const fn with_bbox_thickness(mut self, thickness: u32) -> Self {
        self.bbox_thickness = thickness;
        self
    }

    /// Skip 2D keypoints of views that failed the confidence check.
    #[must_use]
    pub const fn with_only_confident(mut self, only_confident: bool) -> Self {
        self.only_confident = only_confident;
        self
    }

    /// Overlay ground-truth 2D keypoints in the secondary color.
    #[must_use]
    pub const fn with_ground_truth(mut self, show: bool) -> Self {
        self.show_ground_truth = show;
        self
    }

    /// Set the 3D canvas size.
    #[must_use]
    pub const fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_size = (width, height);
        self
    }

    /// Set the 3D camera orbit: eye distance, frames per orbit and eye height.
    #[must_use]
    pub const fn with_orbit(mut self, radius: f32, steps: usize, eye_height: f32) -> Self {
        self.orbit_radius = radius;
        self.orbit_steps = steps;
        self.eye_height = eye_height;
        self
    }

    /// Set the 3D camera field of view in degrees.
    #[must_use]
    pub const fn with_fov(mut self, degrees: f32) -> Self {
        self.fov_degrees = degrees;
        self
    }

    /// Check that sizes and camera settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`VisError::ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.point_radius < 0 {
            return Err(VisError::ConfigError("point radius must be >= 0".into()));
        }
        if self.canvas_size.0 == 0 || self.canvas_size.1 == 0 {
            return Err(VisError::ConfigError("canvas size must be non-zero".into()));
        }
        if !(1.0..180.0).contains(&self.fov_degrees) {
            return Err(VisError::ConfigError(format!(
                "field of view {} outside (1, 180) degrees",
                self.fov_degrees
            )));
        }
        if self.orbit_steps == 0 {
            return Err(VisError::ConfigError("orbit needs at least one step".into()));
        }
        // the eye must not sit on the up axis
        if !(self.orbit_radius.is_finite() && self.orbit_radius > 0.0) {
            return Err(VisError::ConfigError(format!(
                "orbit radius must be positive and finite, got {}",
                self.orbit_radius
            )));
        }
        if !self.eye_height.is_finite() {
            return Err(VisError::ConfigError(format!(
                "eye height must be finite, got {}",
                self.eye_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.color, Color::BLUE);
        assert_eq!(config.secondary_color, Color::RED);
        assert_eq!(config.bbox_thickness, 3);
        assert!(!config.only_confident);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = RenderConfig::new()
            .with_color(Color::GREEN)
            .with_line_width(2)
            .with_point_radius(3)
            .with_only_confident(true)
            .with_ground_truth(true)
            .with_canvas_size(320, 240)
            .with_orbit(2.0, 10, 0.5);

        assert_eq!(config.color, Color::GREEN);
        assert_eq!(config.line_width, 2);
        assert_eq!(config.point_radius, 3);
        assert!(config.only_confident);
        assert!(config.show_ground_truth);
        assert_eq!(config.canvas_size, (320, 240));
        assert_eq!(config.orbit_steps, 10);
    }

    #[test]
    fn test_config_validate() {
        assert!(RenderConfig::new().with_canvas_size(0, 10).validate().is_err());
        assert!(RenderConfig::new().with_fov(0.0).validate().is_err());
        assert!(RenderConfig::new().with_orbit(1.0, 0, 1.0).validate().is_err());
        assert!(RenderConfig::new().with_orbit(0.0, 5, 1.25).validate().is_err());
        assert!(RenderConfig::new().with_point_radius(-1).validate().is_err());
    }

    #[test]
    fn test_config_validate_non_finite_orbit() {
        assert!(RenderConfig::new().with_orbit(f32::NAN, 5, 1.25).validate().is_err());
        assert!(RenderConfig::new().with_orbit(f32::INFINITY, 5, 1.25).validate().is_err());
        assert!(RenderConfig::new().with_orbit(1.5, 5, f32::NAN).validate().is_err());
        assert!(RenderConfig::new().with_orbit(1.5, 5, -0.5).validate().is_ok());
    }
}
