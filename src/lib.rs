//! detpost turns raw detection-head tensors into final bounding boxes.
//!
//! The pipeline decodes YOLO-style rows (`[cx, cy, w, h, objectness,
//! class scores..]`) into scored boxes, applies greedy class-agnostic
//! non-maximum suppression and an optional aspect-ratio band. A [`Detector`]
//! bundles one configuration with its labels and an armed/disarmed switch.
//! Parallel decoding is available behind the `rayon` feature.

mod candidate;
pub mod decode;
pub mod detector;
pub mod geometry;
pub mod labels;
pub mod lowlevel;
pub mod pipeline;
pub mod tensor;
mod trace;
pub mod util;

pub use candidate::filter::{filter_aspect_ratio, AspectRatioRange};
pub use candidate::nms::suppress;
pub use decode::{decode, DecodeParams};
pub use detector::{
    DetectionListener, Detector, DetectorConfig, DetectorKind, DetectorState, Outcome,
};
pub use geometry::{iou, BoundingBox};
pub use labels::LabelSet;
pub use pipeline::{PipelineParams, PostProcessor};
pub use tensor::{TensorLayout, TensorView};
pub use util::{DetPostError, DetPostResult};

#[cfg(feature = "rayon")]
pub use decode::rayon::decode_par;
