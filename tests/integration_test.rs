// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Integration tests for the label visualization library

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use serde_json::{Value, json};

use mbw_label_vis::{
    Dataset, ImageFormat, LabelType, RenderConfig, VisError, VisualizeJob, extract_segments,
    lookup, visualize,
};

const NUM_CAMERAS: usize = 2;
const NUM_FRAMES: usize = 3;
const WIDTH: u32 = 32;
const HEIGHT: u32 = 24;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "mbw-label-vis-it-{name}-{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn frame_record(joints: usize, frame_idx: usize) -> Value {
    let w: Vec<[f32; 2]> = (0..joints)
        .map(|j| [2.0 + j as f32 * 2.0, 4.0 + frame_idx as f32])
        .collect();
    // The middle frame has no 3D reconstruction
    let s: Vec<[f32; 3]> = (0..joints)
        .map(|j| {
            if frame_idx == 1 {
                [0.0, 0.0, 0.0]
            } else {
                [0.1 * (j + 1) as f32, 0.2, 0.3]
            }
        })
        .collect();
    json!({
        "W_Pred": w,
        "S_Pred": s,
        "W_GT": w,
        "confidence": frame_idx != 2,
        "BBox": [28.0, 3.0, 20.0, 2.0],
    })
}

/// Writes `Data/Fish/{annot,images/CAM_n}` with `images_per_camera` frames per camera.
fn write_dataset(data_root: &Path, images_per_camera: usize) {
    write_dataset_with(data_root, images_per_camera, |_| lookup("Fish").unwrap().num_joints);
}

/// Like [`write_dataset`], with the number of keypoints of each frame chosen by `joints`.
fn write_dataset_with(data_root: &Path, images_per_camera: usize, joints: impl Fn(usize) -> usize) {
    let root = data_root.join(Dataset::Fish.as_str());
    let annot = root.join("annot");
    fs::create_dir_all(&annot).unwrap();

    for cam in 0..NUM_CAMERAS {
        let records: Vec<Value> = (0..NUM_FRAMES)
            .map(|f| frame_record(joints(f), f))
            .collect();
        fs::write(
            annot.join(format!("cam{}.json", cam + 1)),
            serde_json::to_string(&records).unwrap(),
        )
        .unwrap();

        let cam_dir = root.join("images").join(format!("CAM_{}", cam + 1));
        fs::create_dir_all(&cam_dir).unwrap();
        for f in 0..images_per_camera {
            let img = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([40, 40, 40]));
            img.save(cam_dir.join(format!("img{f}.png"))).unwrap();
        }
    }
}

#[test]
fn test_registry_lookup() {
    let fish = lookup("fish").unwrap();
    assert_eq!(fish.range_scale, 2.0);
    assert_eq!(fish.num_connections(), 15);

    match lookup("Giraffe") {
        Err(VisError::UnknownDataset(name)) => assert_eq!(name, "Giraffe"),
        other => panic!("expected UnknownDataset, got {other:?}"),
    }
}

#[test]
fn test_extract_segments_length() {
    let topology = lookup("Human").unwrap();
    let keypoints = ndarray::Array2::<f32>::ones((topology.num_joints, 3));
    let lines = extract_segments(keypoints.view(), topology.connections).unwrap();
    assert_eq!(lines.len(), 3 * topology.num_connections());
    assert!(lines.z.is_some());
    assert_eq!(lines.x.iter().filter(|v| v.is_none()).count(), topology.num_connections());
}

#[test]
fn test_visualize_2d_keypoints() {
    let root = scratch_dir("2d");
    let data = root.join("Data");
    let output = root.join("Label_Vis");
    write_dataset(&data, NUM_FRAMES);

    let job = VisualizeJob::new(Dataset::Fish, LabelType::Keypoints2D, &data, &output)
        .with_config(RenderConfig::new().with_ground_truth(true));
    let summary = visualize::run(&job).unwrap();

    assert!(summary.failed.is_empty(), "{:?}", summary.failed);
    assert_eq!(summary.saved.len(), NUM_FRAMES);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.save_dir, output.join("Fish").join("2D"));

    let first = image::open(summary.save_dir.join("0.png")).unwrap();
    assert_eq!(first.width(), WIDTH * NUM_CAMERAS as u32);
    assert_eq!(first.height(), HEIGHT);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_visualize_bbox_jpg() {
    let root = scratch_dir("bbox");
    let data = root.join("Data");
    let output = root.join("Label_Vis");
    write_dataset(&data, NUM_FRAMES);

    let job = VisualizeJob::new(Dataset::Fish, LabelType::BBox, &data, &output)
        .with_format(ImageFormat::Jpg);
    let summary = visualize::run(&job).unwrap();

    assert_eq!(summary.saved.len(), NUM_FRAMES);
    for frame_idx in 0..NUM_FRAMES {
        assert!(output.join("Fish/BBox").join(format!("{frame_idx}.jpg")).exists());
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_visualize_3d_skips_missing_reconstructions() {
    let root = scratch_dir("3d");
    let data = root.join("Data");
    let output = root.join("Label_Vis");
    write_dataset(&data, NUM_FRAMES);

    let config = RenderConfig::new().with_canvas_size(120, 90);
    let job =
        VisualizeJob::new(Dataset::Fish, LabelType::Keypoints3D, &data, &output).with_config(config);
    let summary = visualize::run(&job).unwrap();

    assert!(summary.failed.is_empty(), "{:?}", summary.failed);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.saved.len(), 2);

    let save_dir = output.join("Fish").join("3D");
    assert!(save_dir.join("0.png").exists());
    assert!(!save_dir.join("1.png").exists());
    assert!(save_dir.join("2.png").exists());

    let rendered = image::open(save_dir.join("2.png")).unwrap();
    assert_eq!((rendered.width(), rendered.height()), (120, 90));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_visualize_reports_failed_frame_and_continues() {
    let root = scratch_dir("partial");
    let data = root.join("Data");
    let output = root.join("Label_Vis");
    let fish_joints = lookup("Fish").unwrap().num_joints;
    // frame 1 is missing most keypoints referenced by the Fish bones
    write_dataset_with(&data, NUM_FRAMES, |f| if f == 1 { 3 } else { fish_joints });

    let job = VisualizeJob::new(Dataset::Fish, LabelType::Keypoints2D, &data, &output);
    let summary = visualize::run(&job).unwrap();

    assert_eq!(summary.failed.len(), 1);
    let (frame_idx, err) = &summary.failed[0];
    assert_eq!(*frame_idx, 1);
    assert!(matches!(err, VisError::IndexOutOfRange { len: 3, .. }), "{err:?}");

    let save_dir = output.join("Fish").join("2D");
    assert_eq!(
        summary.saved,
        vec![save_dir.join("0.png"), save_dir.join("2.png")]
    );
    assert!(save_dir.join("0.png").exists());
    assert!(!save_dir.join("1.png").exists());
    assert!(save_dir.join("2.png").exists());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_visualize_missing_images() {
    let root = scratch_dir("missing");
    let data = root.join("Data");
    write_dataset(&data, NUM_FRAMES - 1);

    let job = VisualizeJob::new(Dataset::Fish, LabelType::Keypoints2D, &data, root.join("out"));
    assert!(visualize::run(&job).is_err());

    // 3D labels do not need camera images
    let job = VisualizeJob::new(Dataset::Fish, LabelType::Keypoints3D, &data, root.join("out"))
        .with_config(RenderConfig::new().with_canvas_size(64, 64));
    assert!(visualize::run(&job).is_ok());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_visualize_missing_labels() {
    let root = scratch_dir("nolabels");
    let job = VisualizeJob::new(
        Dataset::Tiger,
        LabelType::Keypoints2D,
        root.join("Data"),
        root.join("out"),
    );
    assert!(visualize::run(&job).is_err());

    let _ = fs::remove_dir_all(&root);
}
