// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Drawing 2D keypoint and bounding box labels over camera images.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use ndarray::ArrayView2;

use crate::config::RenderConfig;
use crate::error::{Result, VisError};
use crate::label_type::LabelType;
use crate::labels::{BBox, FrameLabel};
use crate::visualizer::extract_segments;

/// Clip a segment to the rectangle spanned by `min` and `max` (Liang-Barsky).
///
/// Returns `None` when the segment lies outside the rectangle or has a non-finite end.
/// Intersections are computed in `f64` so far-off endpoints keep sub-pixel accuracy.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn clip_segment(
    start: (f32, f32),
    end: (f32, f32),
    min: (f32, f32),
    max: (f32, f32),
) -> Option<((f32, f32), (f32, f32))> {
    if ![start.0, start.1, end.0, end.1].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (x0, y0) = (f64::from(start.0), f64::from(start.1));
    let (dx, dy) = (f64::from(end.0) - x0, f64::from(end.1) - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-dx, x0 - f64::from(min.0)),
        (dx, f64::from(max.0) - x0),
        (-dy, y0 - f64::from(min.1)),
        (dy, f64::from(max.1) - y0),
    ] {
        if p.abs() < f64::EPSILON {
            // parallel to this edge
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    let at = |t: f64| (t.mul_add(dx, x0) as f32, t.mul_add(dy, y0) as f32);
    Some((at(t0), at(t1)))
}

/// Draw a line segment `width` pixels wide.
///
/// The segment is clipped to the image first, so far-off endpoints are safe.
#[allow(clippy::cast_precision_loss)]
pub fn draw_thick_line(
    img: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    width: u32,
    color: Rgb<u8>,
) {
    let (img_w, img_h) = img.dimensions();
    let margin = width as f32 + 1.0;
    let Some((start, end)) = clip_segment(
        start,
        end,
        (-margin, -margin),
        (img_w as f32 + margin, img_h as f32 + margin),
    ) else {
        return;
    };

    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = dx.hypot(dy);
    if width <= 1 || length < f32::EPSILON {
        draw_line_segment_mut(img, start, end, color);
        return;
    }

    // unit normal to the segment
    let (nx, ny) = (-dy / length, dx / length);
    let half = (width - 1) as f32 / 2.0;
    for k in 0..width {
        let offset = k as f32 - half;
        draw_line_segment_mut(
            img,
            (offset.mul_add(nx, start.0), offset.mul_add(ny, start.1)),
            (offset.mul_add(nx, end.0), offset.mul_add(ny, end.1)),
            color,
        );
    }
}

/// Draw a filled keypoint marker.
///
/// Markers whose centre is non-finite or farther than `radius` outside the image are skipped.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn draw_marker(img: &mut RgbImage, center: (f32, f32), radius: i32, color: Rgb<u8>) {
    let (img_w, img_h) = img.dimensions();
    let r = radius as f32;
    let (x, y) = center;
    let inside = (-r..=img_w as f32 + r).contains(&x) && (-r..=img_h as f32 + r).contains(&y);
    if inside {
        draw_filled_circle_mut(img, (x.round() as i32, y.round() as i32), radius, color);
    }
}

/// Draw keypoint markers and skeleton bones.
///
/// Non-finite coordinates are skipped.
///
/// # Errors
///
/// Returns [`VisError::IndexOutOfRange`] if a connection references a missing keypoint.
pub fn draw_skeleton(
    img: &mut RgbImage,
    keypoints: ArrayView2<'_, f32>,
    connections: &[(usize, usize)],
    color: Rgb<u8>,
    config: &RenderConfig,
) -> Result<()> {
    let lines = extract_segments(keypoints, connections)?;
    for (a, b) in lines.segments() {
        draw_thick_line(img, (a[0], a[1]), (b[0], b[1]), config.line_width, color);
    }

    for row in keypoints.rows() {
        draw_marker(img, (row[0], row[1]), config.point_radius, color);
    }
    Ok(())
}

/// Draw a hollow bounding box, clamped to the image.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn draw_bbox(img: &mut RgbImage, bbox: &BBox, thickness: u32, color: Rgb<u8>) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let mut x1 = bbox.xmin.round() as i32;
    let mut y1 = bbox.ymin.round() as i32;
    let mut x2 = bbox.xmax.round() as i32;
    let mut y2 = bbox.ymax.round() as i32;

    // Ensure x1 < x2 and y1 < y2
    if x1 > x2 {
        std::mem::swap(&mut x1, &mut x2);
    }
    if y1 > y2 {
        std::mem::swap(&mut y1, &mut y2);
    }

    x1 = x1.clamp(0, width as i32 - 1);
    y1 = y1.clamp(0, height as i32 - 1);
    x2 = x2.clamp(0, width as i32 - 1);
    y2 = y2.clamp(0, height as i32 - 1);

    if x2 <= x1 || y2 <= y1 {
        return;
    }

    for t in 0..thickness.max(1) as i32 {
        let tx1 = (x1 + t).min(x2);
        let ty1 = (y1 + t).min(y2);
        let tx2 = (x2 - t).max(tx1);
        let ty2 = (y2 - t).max(ty1);
        if tx2 > tx1 && ty2 > ty1 {
            let rect = Rect::at(tx1, ty1).of_size((tx2 - tx1) as u32, (ty2 - ty1) as u32);
            draw_hollow_rect_mut(img, rect, color);
        }
    }
}

/// Annotate one camera view with its labels.
///
/// # Errors
///
/// Returns an error for 3D label types or bad joint indices.
pub fn annotate_view(
    image: &DynamicImage,
    label: &FrameLabel,
    label_type: LabelType,
    connections: &[(usize, usize)],
    config: &RenderConfig,
) -> Result<RgbImage> {
    let mut img = image.to_rgb8();

    match label_type {
        LabelType::Keypoints2D => {
            if config.show_ground_truth && !label.w_gt.is_empty() {
                let gt = config.secondary_color.to_rgb();
                draw_skeleton(&mut img, label.w_gt.view(), connections, gt, config)?;
            }
            if !config.only_confident || label.confident {
                let color = config.color.to_rgb();
                draw_skeleton(&mut img, label.w_pred.view(), connections, color, config)?;
            }
        }
        LabelType::BBox => {
            draw_bbox(
                &mut img,
                &label.bbox,
                config.bbox_thickness,
                config.color.to_rgb(),
            );
        }
        LabelType::Keypoints3D => {
            return Err(VisError::ConfigError(
                "3D labels are rendered by the scene renderer, not over camera images".into(),
            ));
        }
    }

    Ok(img)
}

/// Place views side by side, top-aligned, on a black canvas.
#[must_use]
pub fn tile_views(views: &[RgbImage]) -> RgbImage {
    let width = views.iter().map(RgbImage::width).sum();
    let height = views.iter().map(RgbImage::height).max().unwrap_or(0);
    let mut canvas = RgbImage::new(width, height);

    let mut x = 0_i64;
    for view in views {
        image::imageops::replace(&mut canvas, view, x, 0);
        x += i64::from(view.width());
    }
    canvas
}

/// Annotate every view of a frame and tile the results.
///
/// # Errors
///
/// Returns an error if the number of images and labels differ or a view fails to annotate.
pub fn annotate_frame(
    images: &[DynamicImage],
    labels: &[&FrameLabel],
    label_type: LabelType,
    connections: &[(usize, usize)],
    config: &RenderConfig,
) -> Result<RgbImage> {
    if images.len() != labels.len() {
        return Err(VisError::LabelError(format!(
            "{} camera images but {} label views",
            images.len(),
            labels.len()
        )));
    }

    let views = images
        .iter()
        .zip(labels)
        .map(|(image, label)| annotate_view(image, label, label_type, connections, config))
        .collect::<Result<Vec<_>>>()?;
    Ok(tile_views(&views))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::Color;
    use ndarray::{Array2, array};

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn label(w_pred: Array2<f32>, confident: bool) -> FrameLabel {
        FrameLabel {
            w_gt: w_pred.clone(),
            s_pred: Array2::zeros((w_pred.nrows(), 3)),
            w_pred,
            confident,
            bbox: BBox::from_label([30.0, 10.0, 25.0, 5.0]),
        }
    }

    fn blank(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
    }

    #[test]
    fn test_annotate_2d_draws_points_and_bones() {
        let config = RenderConfig::new().with_point_radius(1).with_line_width(1);
        let frame = label(array![[5.0, 5.0], [35.0, 5.0]], true);
        let img = annotate_view(
            &blank(40, 10),
            &frame,
            LabelType::Keypoints2D,
            &[(0, 1)],
            &config,
        )
        .unwrap();

        let blue = Color::BLUE.to_rgb();
        assert_eq!(*img.get_pixel(5, 5), blue);
        assert_eq!(*img.get_pixel(20, 5), blue);
        assert_eq!(*img.get_pixel(20, 0), BLACK);
    }

    #[test]
    fn test_far_off_keypoint_is_clipped() {
        let config = RenderConfig::new().with_point_radius(1).with_line_width(1);
        let frame = label(array![[5.0, 5.0], [3e9, 5.0]], true);
        let img = annotate_view(
            &blank(10, 10),
            &frame,
            LabelType::Keypoints2D,
            &[(0, 1)],
            &config,
        )
        .unwrap();

        let blue = Color::BLUE.to_rgb();
        assert_eq!(*img.get_pixel(5, 5), blue);
        assert_eq!(*img.get_pixel(9, 5), blue);
        assert_eq!(*img.get_pixel(9, 0), BLACK);
    }

    #[test]
    fn test_thick_line_between_distant_points() {
        let mut img = RgbImage::new(20, 20);
        draw_thick_line(&mut img, (-4e9, -4e9), (4e9, 4e9), 3, Color::RED.to_rgb());
        assert_eq!(*img.get_pixel(10, 10), Color::RED.to_rgb());
        assert_eq!(*img.get_pixel(19, 0), BLACK);
    }

    fn assert_close(actual: (f32, f32), expected: (f32, f32)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-4 && (actual.1 - expected.1).abs() < 1e-4,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_clip_segment() {
        let (a, b) = clip_segment((-10.0, 5.0), (20.0, 5.0), (0.0, 0.0), (10.0, 10.0)).unwrap();
        assert_close(a, (0.0, 5.0));
        assert_close(b, (10.0, 5.0));

        let (a, b) = clip_segment((1.0, 1.0), (2.0, 3.0), (0.0, 0.0), (10.0, 10.0)).unwrap();
        assert_close(a, (1.0, 1.0));
        assert_close(b, (2.0, 3.0));

        assert!(clip_segment((-5.0, -5.0), (-1.0, 20.0), (0.0, 0.0), (10.0, 10.0)).is_none());
        assert!(clip_segment((f32::NAN, 1.0), (2.0, 3.0), (0.0, 0.0), (10.0, 10.0)).is_none());
    }

    #[test]
    fn test_marker_outside_image_is_skipped() {
        let mut img = RgbImage::new(10, 10);
        draw_marker(&mut img, (3e9, -3e9), 6, Color::BLUE.to_rgb());
        draw_marker(&mut img, (f32::INFINITY, 5.0), 6, Color::BLUE.to_rgb());
        assert!(img.pixels().all(|p| *p == BLACK));

        draw_marker(&mut img, (12.0, 5.0), 3, Color::BLUE.to_rgb());
        assert_eq!(*img.get_pixel(9, 5), Color::BLUE.to_rgb());
    }

    #[test]
    fn test_only_confident_skips_view() {
        let config = RenderConfig::new().with_only_confident(true);
        let frame = label(array![[5.0, 5.0], [35.0, 5.0]], false);
        let img = annotate_view(
            &blank(40, 10),
            &frame,
            LabelType::Keypoints2D,
            &[(0, 1)],
            &config,
        )
        .unwrap();
        assert!(img.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_ground_truth_overlay_uses_secondary_color() {
        let config = RenderConfig::new()
            .with_only_confident(true)
            .with_ground_truth(true)
            .with_point_radius(0)
            .with_line_width(1);
        let frame = label(array![[2.0, 2.0], [8.0, 2.0]], false);
        let img = annotate_view(
            &blank(10, 5),
            &frame,
            LabelType::Keypoints2D,
            &[(0, 1)],
            &config,
        )
        .unwrap();
        assert_eq!(*img.get_pixel(5, 2), Color::RED.to_rgb());
    }

    #[test]
    fn test_bad_joint_index_errors() {
        let frame = label(array![[5.0, 5.0]], true);
        let err = annotate_view(
            &blank(10, 10),
            &frame,
            LabelType::Keypoints2D,
            &[(0, 3)],
            &RenderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, VisError::IndexOutOfRange { index: 3, len: 1 }));
    }

    #[test]
    fn test_bbox_outline() {
        let config = RenderConfig::new().with_bbox_thickness(1);
        let frame = label(array![[0.0, 0.0]], true);
        let img = annotate_view(&blank(40, 40), &frame, LabelType::BBox, &[], &config).unwrap();

        let blue = Color::BLUE.to_rgb();
        // corners of xmin=10, ymin=5, xmax=30, ymax=25
        assert_eq!(*img.get_pixel(10, 5), blue);
        assert_eq!(*img.get_pixel(29, 24), blue);
        assert_eq!(*img.get_pixel(20, 15), BLACK);
    }

    #[test]
    fn test_bbox_outside_image_is_ignored() {
        let mut img = RgbImage::new(10, 10);
        let bbox = BBox::from_label([-5.0, -20.0, -1.0, -9.0]);
        draw_bbox(&mut img, &bbox, 3, Color::BLUE.to_rgb());
        assert!(img.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_3d_not_drawn_on_images() {
        let frame = label(array![[0.0, 0.0]], true);
        let result = annotate_view(
            &blank(4, 4),
            &frame,
            LabelType::Keypoints3D,
            &[],
            &RenderConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tile_views() {
        let a = RgbImage::from_pixel(3, 2, Rgb([255, 0, 0]));
        let b = RgbImage::from_pixel(4, 5, Rgb([0, 255, 0]));
        let tiled = tile_views(&[a, b]);
        assert_eq!(tiled.dimensions(), (7, 5));
        assert_eq!(*tiled.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*tiled.get_pixel(0, 4), BLACK);
        assert_eq!(*tiled.get_pixel(3, 4), Rgb([0, 255, 0]));
    }

    #[test]
    fn test_annotate_frame_view_count_mismatch() {
        let frame = label(array![[0.0, 0.0]], true);
        let result = annotate_frame(
            &[blank(4, 4), blank(4, 4)],
            &[&frame],
            LabelType::BBox,
            &[],
            &RenderConfig::default(),
        );
        assert!(result.is_err());
    }
}
