//! Decoding of raw detection tensors into scored candidate boxes.
//!
//! Each prediction row goes through a fixed sequence of cheap-to-expensive
//! rejections: objectness gate, corner conversion with clamping, minimum
//! area, class argmax, then the combined confidence gate.

use crate::geometry::BoundingBox;
use crate::labels::LabelSet;
use crate::tensor::{TensorView, CLASS_OFFSET, OBJECTNESS_CHANNEL};
use crate::trace::{trace_event, trace_span};
use crate::util::math::{argmax_first, clamp_unit, exceeds};

#[cfg(feature = "rayon")]
pub mod rayon;

/// Thresholds applied while decoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecodeParams {
    /// Predictions with objectness at or below this value are skipped.
    pub objectness_threshold: f32,
    /// Boxes need `objectness * class_score` strictly above this value.
    pub confidence_threshold: f32,
    /// Boxes with a clamped area below this value are skipped.
    pub min_box_area: f32,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            objectness_threshold: 0.5,
            confidence_threshold: 0.5,
            min_box_area: 0.0,
        }
    }
}

/// Decodes every prediction of `tensor`, returning candidates in prediction order.
///
/// Class ids without a matching entry in `labels` are dropped.
pub fn decode(
    tensor: TensorView<'_>,
    labels: &LabelSet,
    params: &DecodeParams,
) -> Vec<BoundingBox> {
    let _span = trace_span!("decode", predictions = tensor.num_predictions()).entered();

    let num_classes = tensor.layout().num_classes;
    let out: Vec<BoundingBox> = tensor
        .predictions()
        .filter_map(|row| decode_prediction(row, num_classes, labels, params))
        .collect();

    trace_event!("decoded_candidates", count = out.len());
    out
}

/// Decodes a single prediction row.
///
/// `row` must hold at least `5 + num_classes` values; `TensorView` guarantees
/// this for its rows.
pub(crate) fn decode_prediction(
    row: &[f32],
    num_classes: usize,
    labels: &LabelSet,
    params: &DecodeParams,
) -> Option<BoundingBox> {
    let objectness = row[OBJECTNESS_CHANNEL];
    if !exceeds(objectness, params.objectness_threshold) {
        return None;
    }

    let (x_center, y_center, width, height) = (row[0], row[1], row[2], row[3]);
    let x1 = clamp_unit(x_center - width / 2.0);
    let y1 = clamp_unit(y_center - height / 2.0);
    let x2 = clamp_unit(x_center + width / 2.0);
    let y2 = clamp_unit(y_center + height / 2.0);
    // Negative extents invert the corners; skip them.
    if x2 < x1 || y2 < y1 {
        return None;
    }

    let area = (x2 - x1) * (y2 - y1);
    if area < params.min_box_area {
        return None;
    }

    let (class_id, class_score) = argmax_first(&row[CLASS_OFFSET..CLASS_OFFSET + num_classes])?;
    let confidence = objectness * class_score;
    if !exceeds(confidence, params.confidence_threshold) {
        return None;
    }
    let class_name = labels.get(class_id)?;

    Some(BoundingBox {
        x1,
        y1,
        x2,
        y2,
        confidence,
        class_id,
        class_name: class_name.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::{decode, DecodeParams};
    use crate::labels::LabelSet;
    use crate::tensor::{TensorLayout, TensorView};

    fn labels() -> LabelSet {
        LabelSet::from_static(&["a", "b"])
    }

    fn params() -> DecodeParams {
        DecodeParams {
            objectness_threshold: 0.7,
            confidence_threshold: 0.5,
            min_box_area: 0.0,
        }
    }

    fn decode_rows(
        rows: &[[f32; 7]],
        labels: &LabelSet,
        params: &DecodeParams,
    ) -> Vec<crate::BoundingBox> {
        let data: Vec<f32> = rows.iter().flatten().copied().collect();
        let layout = TensorLayout::new(rows.len(), 7, 2).unwrap();
        decode(TensorView::new(&data, layout).unwrap(), labels, params)
    }

    #[test]
    fn objectness_equal_to_threshold_is_skipped() {
        let rows = [[0.5, 0.5, 0.2, 0.2, 0.7, 1.0, 0.0]];
        assert!(decode_rows(&rows, &labels(), &params()).is_empty());
    }

    #[test]
    fn coordinates_are_clamped() {
        let rows = [[0.95, 0.05, 0.3, 0.3, 0.9, 0.9, 0.0]];
        let boxes = decode_rows(&rows, &labels(), &params());
        assert_eq!(boxes.len(), 1);
        let b = &boxes[0];
        assert_eq!(b.x2, 1.0);
        assert_eq!(b.y1, 0.0);
        assert!((b.x1 - 0.8).abs() < 1e-6);
        assert!((b.y2 - 0.2).abs() < 1e-6);
    }

    #[test]
    fn small_boxes_are_skipped_before_class_scan() {
        let rows = [[0.5, 0.5, 0.05, 0.05, 0.9, 0.9, 0.0]];
        let p = DecodeParams {
            min_box_area: 0.01,
            ..params()
        };
        assert!(decode_rows(&rows, &labels(), &p).is_empty());
    }

    #[test]
    fn class_ties_resolve_to_lowest_index() {
        let rows = [[0.5, 0.5, 0.2, 0.2, 0.9, 0.8, 0.8]];
        let boxes = decode_rows(&rows, &labels(), &params());
        assert_eq!(boxes[0].class_id, 0);
        assert_eq!(boxes[0].class_name, "a");
    }

    #[test]
    fn class_without_label_is_dropped() {
        let rows = [[0.5, 0.5, 0.2, 0.2, 0.9, 0.1, 0.9]];
        let short = LabelSet::from_static(&["a"]);
        assert!(decode_rows(&rows, &short, &params()).is_empty());
    }

    #[test]
    fn negative_extent_is_rejected() {
        let rows = [
            [0.5, 0.5, -0.2, 0.2, 0.9, 0.9, 0.0],
            [0.5, 0.5, 0.2, -0.2, 0.9, 0.9, 0.0],
            [0.5, 0.5, -0.2, -0.2, 0.9, 0.9, 0.0],
        ];
        assert!(decode_rows(&rows, &labels(), &params()).is_empty());
    }

    #[test]
    fn zero_extent_after_clamping_is_kept_without_min_area() {
        // Entirely right of the frame: both x corners clamp to 1.0.
        let rows = [[1.3, 0.5, 0.2, 0.2, 0.9, 0.9, 0.0]];
        let boxes = decode_rows(&rows, &labels(), &params());
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].x1, 1.0);
        assert_eq!(boxes[0].x2, 1.0);
    }

    #[test]
    fn confidence_must_exceed_threshold() {
        // 0.9 * 0.5 = 0.45 < 0.5
        let rows = [[0.5, 0.5, 0.2, 0.2, 0.9, 0.5, 0.0]];
        assert!(decode_rows(&rows, &labels(), &params()).is_empty());
    }
}
