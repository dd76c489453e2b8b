//! Rayon-parallel decoding (feature-gated).
//!
//! Predictions are independent, so rows are decoded in parallel and collected
//! in index order; the output matches [`decode`](super::decode) exactly.

use super::{decode_prediction, DecodeParams};
use crate::geometry::BoundingBox;
use crate::labels::LabelSet;
use crate::tensor::TensorView;
use crate::trace::{trace_event, trace_span};
use rayon::prelude::*;

/// Parallel counterpart of [`decode`](super::decode).
pub fn decode_par(
    tensor: TensorView<'_>,
    labels: &LabelSet,
    params: &DecodeParams,
) -> Vec<BoundingBox> {
    let _span = trace_span!(
        "decode",
        predictions = tensor.num_predictions(),
        parallel = true
    )
    .entered();

    let layout = tensor.layout();
    let out: Vec<BoundingBox> = tensor
        .as_slice()
        .par_chunks_exact(layout.num_channels)
        .filter_map(|row| decode_prediction(row, layout.num_classes, labels, params))
        .collect();

    trace_event!("decoded_candidates", count = out.len());
    out
}
