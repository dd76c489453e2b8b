//! Detectors wrap the shared pipeline with a configuration, a label set and
//! an armed/disarmed switch.
//!
//! A detector starts disarmed. While disarmed, [`Detector::detect`] does no
//! work at all and returns `Ok(None)`; once armed it validates the tensor,
//! runs decode → suppress → filter and reports an explicit [`Outcome`].

mod kind;

pub use kind::{DetectorConfig, DetectorKind};

use crate::geometry::BoundingBox;
use crate::labels::LabelSet;
use crate::pipeline::PostProcessor;
use crate::tensor::TensorView;
use crate::trace::{trace_event, trace_warn};
use crate::util::DetPostResult;
use std::time::Duration;

/// Whether a detector processes frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetectorState {
    /// `detect` is a no-op.
    #[default]
    Disarmed,
    /// `detect` runs the full pipeline.
    Armed,
}

/// Result of one armed detection pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Nothing survived post-processing.
    Empty,
    /// Surviving boxes plus the caller-measured inference time.
    Detected {
        boxes: Vec<BoundingBox>,
        inference_time: Duration,
    },
}

impl Outcome {
    fn from_boxes(boxes: Vec<BoundingBox>, inference_time: Duration) -> Self {
        if boxes.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Detected {
                boxes,
                inference_time,
            }
        }
    }

    /// Returns `true` for [`Outcome::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    /// Returns the detected boxes (empty for [`Outcome::Empty`]).
    pub fn boxes(&self) -> &[BoundingBox] {
        match self {
            Outcome::Empty => &[],
            Outcome::Detected { boxes, .. } => boxes,
        }
    }
}

/// Receiver for detection results.
pub trait DetectionListener {
    /// Called when a pass produced no detections or failed.
    fn on_empty(&mut self);

    /// Called with the surviving boxes of a pass.
    fn on_detect(&mut self, boxes: Vec<BoundingBox>, inference_time: Duration);
}

/// A configured detector.
#[derive(Clone, Debug)]
pub struct Detector {
    config: DetectorConfig,
    labels: LabelSet,
    processor: PostProcessor,
    state: DetectorState,
}

impl Detector {
    /// Creates a disarmed detector.
    ///
    /// An empty `labels` set is replaced with the kind's default labels.
    pub fn new(config: DetectorConfig, labels: LabelSet) -> DetPostResult<Self> {
        config.layout.validate()?;
        let processor = PostProcessor::new(config.params)?;

        let kind = config.kind;
        let labels = labels.or_else(|| {
            trace_warn!("labels_fallback", kind = kind.tag());
            kind.default_labels()
        });
        if labels.len() < config.layout.num_classes {
            trace_warn!(
                "labels_short",
                labels = labels.len(),
                classes = config.layout.num_classes
            );
        }
        trace_event!("detector_initialized", kind = kind.tag(), labels = labels.len());

        Ok(Self {
            config,
            labels,
            processor,
            state: DetectorState::Disarmed,
        })
    }

    /// Creates a detector, reading labels from `config.label_path`.
    ///
    /// A missing, unreadable or empty label file is not an error; the kind's
    /// default labels are used instead.
    pub fn load(config: DetectorConfig) -> DetPostResult<Self> {
        let labels = match config.label_path.as_deref() {
            Some(path) => LabelSet::load(path).unwrap_or_else(|err| {
                let reason = err.to_string();
                trace_warn!("labels_unreadable", reason = reason.as_str());
                LabelSet::default()
            }),
            None => LabelSet::default(),
        };
        Self::new(config, labels)
    }

    /// Factory: builds the default detector for a kind tag (`"yolo"` or
    /// `"currency"`).
    pub fn from_tag(tag: &str) -> DetPostResult<Self> {
        let kind: DetectorKind = tag.parse()?;
        Self::load(DetectorConfig::for_kind(kind))
    }

    /// Returns the detector kind.
    pub fn kind(&self) -> DetectorKind {
        self.config.kind
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns the resolved label set.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Returns the current state.
    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Returns `true` when armed.
    pub fn is_armed(&self) -> bool {
        self.state == DetectorState::Armed
    }

    /// Arms the detector.
    pub fn enable(&mut self) {
        self.state = DetectorState::Armed;
        trace_event!("detector_enabled", kind = self.config.kind.tag());
    }

    /// Disarms the detector.
    pub fn disable(&mut self) {
        self.state = DetectorState::Disarmed;
        trace_event!("detector_disabled", kind = self.config.kind.tag());
    }

    /// Post-processes one tensor.
    ///
    /// Returns `Ok(None)` without touching `tensor` while disarmed. Fails only
    /// when `tensor` is shorter than the configured layout.
    pub fn detect(
        &self,
        tensor: &[f32],
        inference_time: Duration,
    ) -> DetPostResult<Option<Outcome>> {
        if !self.is_armed() {
            return Ok(None);
        }
        let view = TensorView::new(tensor, self.config.layout)?;
        let boxes = self.processor.run(view, &self.labels);
        Ok(Some(Outcome::from_boxes(boxes, inference_time)))
    }

    /// Post-processes one tensor and forwards the outcome to `listener`.
    ///
    /// Failures are logged and reported as an empty detection so that frame
    /// processing can continue. Nothing is reported while disarmed.
    pub fn detect_into<L: DetectionListener + ?Sized>(
        &self,
        tensor: &[f32],
        inference_time: Duration,
        listener: &mut L,
    ) {
        match self.detect(tensor, inference_time) {
            Ok(None) => {}
            Ok(Some(Outcome::Empty)) => listener.on_empty(),
            Ok(Some(Outcome::Detected {
                boxes,
                inference_time,
            })) => listener.on_detect(boxes, inference_time),
            Err(err) => {
                let reason = err.to_string();
                trace_warn!("detection_failed", reason = reason.as_str());
                listener.on_empty();
            }
        }
    }
}
