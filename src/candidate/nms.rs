//! Non-maximum suppression for decoded boxes.

use crate::geometry::{iou, BoundingBox};
use crate::trace::{trace_event, trace_span};

/// Sorts boxes by descending confidence.
///
/// The sort is stable, so equally confident boxes keep their input order and
/// the earlier one becomes the suppression anchor.
pub(crate) fn sort_by_confidence_desc(boxes: &mut [BoundingBox]) {
    boxes.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}

/// Applies greedy, class-agnostic non-maximum suppression.
///
/// Boxes are visited by descending confidence and kept unless their IoU with
/// an already kept box is at least `iou_threshold`. Boxes of different classes
/// suppress each other.
pub fn suppress(mut boxes: Vec<BoundingBox>, iou_threshold: f32) -> Vec<BoundingBox> {
    let _span = trace_span!("suppress", candidates = boxes.len()).entered();

    sort_by_confidence_desc(&mut boxes);
    let mut kept: Vec<BoundingBox> = Vec::with_capacity(boxes.len());

    'outer: for candidate in boxes {
        for anchor in kept.iter() {
            if iou(anchor, &candidate) >= iou_threshold {
                continue 'outer;
            }
        }
        kept.push(candidate);
    }

    trace_event!("suppressed_candidates", kept = kept.len());
    kept
}
