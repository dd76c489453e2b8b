//! Detector kinds and their default configurations.

use crate::candidate::filter::AspectRatioRange;
use crate::decode::DecodeParams;
use crate::labels::LabelSet;
use crate::pipeline::PipelineParams;
use crate::tensor::TensorLayout;
use crate::util::DetPostError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which model family a detector post-processes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetectorKind {
    /// General object detection (COCO classes).
    Object,
    /// Banknote detection.
    Currency,
}

impl DetectorKind {
    /// Factory tag for this kind.
    pub const fn tag(self) -> &'static str {
        match self {
            DetectorKind::Object => "yolo",
            DetectorKind::Currency => "currency",
        }
    }

    /// Fallback labels used when no label file yields any names.
    pub fn default_labels(self) -> LabelSet {
        match self {
            DetectorKind::Object => LabelSet::coco_default(),
            DetectorKind::Currency => LabelSet::currency_default(),
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DetectorKind {
    type Err = DetPostError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "yolo" => Ok(DetectorKind::Object),
            "currency" => Ok(DetectorKind::Currency),
            _ => Err(DetPostError::UnknownDetectorKind {
                tag: tag.to_owned(),
            }),
        }
    }
}

/// Full configuration of one detector.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Model family.
    pub kind: DetectorKind,
    /// Model file the caller runs to produce tensors.
    pub model_path: PathBuf,
    /// Label file; `None` means use the kind's built-in labels.
    pub label_path: Option<PathBuf>,
    /// Model input width in pixels.
    pub input_width: usize,
    /// Model input height in pixels.
    pub input_height: usize,
    /// Output tensor shape.
    pub layout: TensorLayout,
    /// Post-processing thresholds.
    pub params: PipelineParams,
}

impl DetectorConfig {
    /// Default configuration for `kind`.
    pub fn for_kind(kind: DetectorKind) -> Self {
        match kind {
            DetectorKind::Object => Self {
                kind,
                model_path: PathBuf::from("yolov10n_float16.tflite"),
                label_path: None,
                input_width: 640,
                input_height: 640,
                layout: TensorLayout {
                    num_predictions: 8400,
                    num_channels: 85,
                    num_classes: 80,
                },
                params: PipelineParams {
                    decode: DecodeParams {
                        objectness_threshold: 0.5,
                        confidence_threshold: 0.5,
                        min_box_area: 0.0,
                    },
                    iou_threshold: 0.5,
                    aspect_ratio: AspectRatioRange::unbounded(),
                    parallel: false,
                },
            },
            // Output shape (1, 11, 8400): 4 box + objectness + 6 class scores.
            DetectorKind::Currency => Self {
                kind,
                model_path: PathBuf::from("best_float32.tflite"),
                label_path: Some(PathBuf::from("labels.txt")),
                input_width: 640,
                input_height: 640,
                layout: TensorLayout {
                    num_predictions: 8400,
                    num_channels: 11,
                    num_classes: 6,
                },
                params: PipelineParams {
                    decode: DecodeParams {
                        objectness_threshold: 0.7,
                        confidence_threshold: 0.6,
                        min_box_area: 0.01,
                    },
                    iou_threshold: 0.4,
                    // Banknotes sit around 2:1.
                    aspect_ratio: AspectRatioRange::new_unchecked(0.3, 3.0),
                    parallel: false,
                },
            },
        }
    }
}
