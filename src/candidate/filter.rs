//! Aspect-ratio post-filtering.

use crate::geometry::BoundingBox;
use crate::trace::trace_event;
use crate::util::{DetPostError, DetPostResult};

/// Inclusive band of accepted `width / height` ratios.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectRatioRange {
    min: f32,
    max: f32,
}

impl AspectRatioRange {
    /// Creates a bounded range. Bounds may be infinite.
    pub fn new(min: f32, max: f32) -> DetPostResult<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(DetPostError::InvalidInput(
                "aspect ratio bounds must not be NaN",
            ));
        }
        if min > max {
            return Err(DetPostError::InvalidInput(
                "aspect ratio minimum must not exceed maximum",
            ));
        }
        Ok(Self { min, max })
    }

    /// Creates a range from bounds already known to satisfy `min <= max`.
    pub(crate) const fn new_unchecked(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A range that accepts every box, degenerate ones included.
    pub const fn unbounded() -> Self {
        Self {
            min: f32::NEG_INFINITY,
            max: f32::INFINITY,
        }
    }

    /// Lower bound.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Returns `true` when the range disables filtering.
    pub fn is_unbounded(&self) -> bool {
        self.min == f32::NEG_INFINITY && self.max == f32::INFINITY
    }

    /// Returns `true` when `ratio` lies inside the band. NaN never does.
    pub fn contains(&self, ratio: f32) -> bool {
        ratio >= self.min && ratio <= self.max
    }
}

impl Default for AspectRatioRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Keeps boxes whose aspect ratio lies in `[min_ratio, max_ratio]`.
pub fn filter_aspect_ratio(
    mut boxes: Vec<BoundingBox>,
    min_ratio: f32,
    max_ratio: f32,
) -> Vec<BoundingBox> {
    boxes.retain(|b| {
        let ratio = b.aspect_ratio();
        ratio >= min_ratio && ratio <= max_ratio
    });
    trace_event!("aspect_filtered", kept = boxes.len());
    boxes
}

/// Applies `range`, passing every box through when it is unbounded.
pub(crate) fn filter_in_range(
    boxes: Vec<BoundingBox>,
    range: AspectRatioRange,
) -> Vec<BoundingBox> {
    if range.is_unbounded() {
        return boxes;
    }
    filter_aspect_ratio(boxes, range.min, range.max)
}
