use detpost::{
    AspectRatioRange, DetPostError, Detector, DetectorConfig, DetectorKind, LabelSet,
    TensorLayout, TensorView,
};
use std::fs;
use std::path::PathBuf;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("detpost-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn tensor_view_rejects_short_buffer() {
    let layout = TensorLayout::new(3, 7, 2).unwrap();
    let data = [0.0f32; 20];
    let err = TensorView::new(&data, layout).err().unwrap();
    assert_eq!(err, DetPostError::BufferTooSmall { needed: 21, got: 20 });
}

#[test]
fn tensor_layout_rejects_inconsistent_shapes() {
    let err = TensorLayout::new(10, 5, 1).err().unwrap();
    assert_eq!(
        err,
        DetPostError::InvalidLayout {
            reason: "num_channels must be at least 5 + num_classes",
        }
    );

    let err = TensorLayout::new(usize::MAX, 7, 2).err().unwrap();
    assert!(matches!(err, DetPostError::InvalidLayout { .. }));

    // Public fields can bypass `new`; the view still validates.
    let layout = TensorLayout {
        num_predictions: 1,
        num_channels: 6,
        num_classes: 2,
    };
    assert!(TensorView::new(&[0.0; 6], layout).is_err());
}

#[test]
fn label_file_is_parsed_in_index_order() {
    let path = temp_file("labels.txt", "10_rupee\n20_rupee\n\n50_rupee\n");
    let labels = LabelSet::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(labels.len(), 3);
    assert_eq!(labels.get(2), Some("50_rupee"));
}

#[test]
fn missing_label_file_reports_io_error() {
    let path = std::env::temp_dir().join("detpost-definitely-missing-labels.txt");
    let err = LabelSet::load(&path).err().unwrap();
    assert!(matches!(err, DetPostError::LabelIo { .. }));
}

#[test]
fn detector_load_falls_back_on_missing_label_file() {
    let mut cfg = DetectorConfig::for_kind(DetectorKind::Currency);
    cfg.label_path = Some(std::env::temp_dir().join("detpost-definitely-missing-labels.txt"));
    let detector = Detector::load(cfg).unwrap();
    assert_eq!(detector.labels(), &LabelSet::currency_default());
}

#[test]
fn detector_load_uses_label_file_when_present() {
    let path = temp_file("notes.txt", "ten\ntwenty\n");
    let mut cfg = DetectorConfig::for_kind(DetectorKind::Currency);
    cfg.label_path = Some(path.clone());
    let detector = Detector::load(cfg).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(detector.labels().as_slice(), &["ten", "twenty"]);
}

#[test]
fn detector_load_falls_back_on_empty_label_file() {
    let path = temp_file("empty.txt", "\n\n");
    let mut cfg = DetectorConfig::for_kind(DetectorKind::Currency);
    cfg.label_path = Some(path.clone());
    let detector = Detector::load(cfg).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(detector.labels().len(), 7);
}

#[test]
fn factory_rejects_unknown_tag() {
    let err = Detector::from_tag("pedestrian").err().unwrap();
    assert_eq!(
        err,
        DetPostError::UnknownDetectorKind {
            tag: "pedestrian".to_owned(),
        }
    );
}

#[test]
fn factory_builds_object_detector() {
    let detector = Detector::from_tag("yolo").unwrap();
    assert_eq!(detector.kind(), DetectorKind::Object);
    assert_eq!(detector.labels().get(0), Some("person"));
    assert!(!detector.is_armed());
}

#[test]
fn detector_rejects_invalid_layout() {
    let mut cfg = DetectorConfig::for_kind(DetectorKind::Object);
    cfg.layout.num_channels = 10;
    let err = Detector::new(cfg, LabelSet::default()).err().unwrap();
    assert!(matches!(err, DetPostError::InvalidLayout { .. }));
}

#[test]
fn aspect_ratio_range_contains_is_inclusive() {
    let range = AspectRatioRange::new(0.3, 3.0).unwrap();
    assert!(range.contains(0.3));
    assert!(range.contains(3.0));
    assert!(!range.contains(3.01));
    assert!(!range.contains(f32::NAN));
    assert!(!range.is_unbounded());
    assert!(AspectRatioRange::default().is_unbounded());
}
