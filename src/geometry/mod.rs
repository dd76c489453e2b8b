//! Box representation and overlap metrics.
//!
//! Coordinates are normalized to `[0, 1]` in image space with `(x1, y1)` the
//! top-left and `(x2, y2)` the bottom-right corner.

/// A scored detection region.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
    /// Objectness times the best class probability.
    pub confidence: f32,
    /// Index into the detector's label set.
    pub class_id: usize,
    /// Label resolved from `class_id`.
    pub class_name: String,
}

impl BoundingBox {
    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Area in normalized units.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Width over height; `inf` or NaN for zero-height boxes.
    pub fn aspect_ratio(&self) -> f32 {
        self.width() / self.height()
    }

    /// Intersection-over-union with `other`.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        iou(self, other)
    }
}

/// Computes intersection-over-union of two boxes.
///
/// Returns `0.0` when the union is empty, so zero-area boxes never overlap.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let ix1 = a.x1.max(b.x1);
    let iy1 = a.y1.max(b.y1);
    let ix2 = a.x2.min(b.x2);
    let iy2 = a.y2.min(b.y2);

    let intersection = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
    let union = a.area() + b.area() - intersection;

    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}

#[cfg(test)]
pub(crate) fn test_box(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32) -> BoundingBox {
    BoundingBox {
        x1,
        y1,
        x2,
        y2,
        confidence,
        class_id: 0,
        class_name: "object".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{iou, test_box};

    #[test]
    fn iou_of_identical_boxes_is_one() {
        let a = test_box(0.1, 0.1, 0.5, 0.4, 0.9);
        assert!((iou(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn iou_of_disjoint_boxes_is_zero() {
        let a = test_box(0.0, 0.0, 0.2, 0.2, 0.9);
        let b = test_box(0.5, 0.5, 0.9, 0.9, 0.8);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn iou_with_zero_area_box_is_zero() {
        let a = test_box(0.3, 0.3, 0.3, 0.3, 0.9);
        assert_eq!(iou(&a, &a), 0.0);

        let b = test_box(0.2, 0.2, 0.4, 0.4, 0.9);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn iou_of_half_overlap() {
        let a = test_box(0.0, 0.0, 0.2, 0.2, 0.9);
        let b = test_box(0.1, 0.0, 0.3, 0.2, 0.9);
        // intersection 0.02, union 0.06
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn derived_measures() {
        let a = test_box(0.1, 0.2, 0.5, 0.4, 0.9);
        assert!((a.width() - 0.4).abs() < 1e-6);
        assert!((a.height() - 0.2).abs() < 1e-6);
        assert!((a.area() - 0.08).abs() < 1e-6);
        assert!((a.aspect_ratio() - 2.0).abs() < 1e-5);
    }
}
