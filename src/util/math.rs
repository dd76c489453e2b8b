//! Scalar helpers for the decode hot path.

/// Clamps a normalized coordinate to `[0, 1]`.
///
/// `f32::max`/`f32::min` return the non-NaN operand, so a NaN model output
/// collapses to `0.0` instead of leaking into the box corners.
#[inline]
#[allow(clippy::manual_clamp)]
pub(crate) fn clamp_unit(value: f32) -> f32 {
    value.max(0.0).min(1.0)
}

/// Returns `true` when `value` is strictly above `threshold`.
///
/// NaN never exceeds anything.
#[inline]
pub(crate) fn exceeds(value: f32, threshold: f32) -> bool {
    value > threshold
}

/// Finds the first maximal strictly-positive score.
///
/// The running maximum starts at zero, so all-non-positive scores yield `None`.
/// Later scores must be strictly greater to win, which keeps the lowest index
/// on ties.
#[inline]
pub(crate) fn argmax_first(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    let mut best_score = 0.0f32;
    for (idx, &score) in scores.iter().enumerate() {
        if score > best_score {
            best_score = score;
            best = Some((idx, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{argmax_first, clamp_unit, exceeds};

    #[test]
    fn clamp_unit_bounds_and_nan() {
        assert_eq!(clamp_unit(-0.25), 0.0);
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(0.4), 0.4);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
    }

    #[test]
    fn exceeds_is_strict() {
        assert!(exceeds(0.71, 0.7));
        assert!(!exceeds(0.7, 0.7));
        assert!(!exceeds(f32::NAN, 0.0));
    }

    #[test]
    fn argmax_first_prefers_lowest_index_on_ties() {
        assert_eq!(argmax_first(&[0.2, 0.5, 0.5, 0.1]), Some((1, 0.5)));
        assert_eq!(argmax_first(&[0.3, 0.3]), Some((0, 0.3)));
    }

    #[test]
    fn argmax_first_rejects_non_positive_scores() {
        assert_eq!(argmax_first(&[0.0, -1.0]), None);
        assert_eq!(argmax_first(&[]), None);
    }
}
