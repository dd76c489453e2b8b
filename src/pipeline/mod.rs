//! Decode → suppress → filter pipeline.

use crate::candidate::filter::{filter_in_range, AspectRatioRange};
use crate::candidate::nms::suppress;
use crate::decode::{decode, DecodeParams};
use crate::geometry::BoundingBox;
use crate::labels::LabelSet;
use crate::tensor::TensorView;
use crate::trace::{trace_event, trace_span};
use crate::util::{DetPostError, DetPostResult};

/// Parameters for one full post-processing pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineParams {
    /// Decoder thresholds.
    pub decode: DecodeParams,
    /// Boxes overlapping a kept box with IoU at or above this value are dropped.
    pub iou_threshold: f32,
    /// Accepted aspect-ratio band applied after suppression.
    pub aspect_ratio: AspectRatioRange,
    /// Decode predictions in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            decode: DecodeParams::default(),
            iou_threshold: 0.5,
            aspect_ratio: AspectRatioRange::unbounded(),
            parallel: false,
        }
    }
}

impl PipelineParams {
    /// Checks that thresholds are finite numbers.
    pub fn validate(&self) -> DetPostResult<()> {
        let DecodeParams {
            objectness_threshold,
            confidence_threshold,
            min_box_area,
        } = self.decode;
        if objectness_threshold.is_nan() || confidence_threshold.is_nan() {
            return Err(DetPostError::InvalidInput("score thresholds must not be NaN"));
        }
        if min_box_area.is_nan() {
            return Err(DetPostError::InvalidInput("min_box_area must not be NaN"));
        }
        if self.iou_threshold.is_nan() {
            return Err(DetPostError::InvalidInput("iou_threshold must not be NaN"));
        }
        Ok(())
    }
}

/// Runs the post-processing stages with fixed parameters.
#[derive(Clone, Debug)]
pub struct PostProcessor {
    params: PipelineParams,
}

impl PostProcessor {
    /// Creates a post-processor after validating `params`.
    pub fn new(params: PipelineParams) -> DetPostResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the active parameters.
    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Decodes, suppresses and filters `tensor`.
    pub fn run(&self, tensor: TensorView<'_>, labels: &LabelSet) -> Vec<BoundingBox> {
        let _span = trace_span!("postprocess", predictions = tensor.num_predictions()).entered();

        let candidates = self.decode(tensor, labels);
        if candidates.is_empty() {
            return candidates;
        }
        let kept = suppress(candidates, self.params.iou_threshold);
        let out = filter_in_range(kept, self.params.aspect_ratio);

        trace_event!("final_detections", count = out.len());
        out
    }

    #[cfg(feature = "rayon")]
    fn decode(&self, tensor: TensorView<'_>, labels: &LabelSet) -> Vec<BoundingBox> {
        if self.params.parallel {
            crate::decode::rayon::decode_par(tensor, labels, &self.params.decode)
        } else {
            decode(tensor, labels, &self.params.decode)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn decode(&self, tensor: TensorView<'_>, labels: &LabelSet) -> Vec<BoundingBox> {
        decode(tensor, labels, &self.params.decode)
    }
}
