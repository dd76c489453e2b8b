//! Borrowed views over flat detection tensors.
//!
//! A detection head emits `num_predictions` rows of `num_channels` values,
//! stored prediction-major: the value for prediction `i`, channel `c` lives at
//! `i * num_channels + c`. Each row is
//! `[x_center, y_center, width, height, objectness, class_0, ..]`.
//! `TensorView` validates the shape once so the decoder can index freely.

use crate::util::{DetPostError, DetPostResult};

/// Channel index of the objectness score.
pub const OBJECTNESS_CHANNEL: usize = 4;
/// Channel index of the first class score.
pub const CLASS_OFFSET: usize = 5;

/// Shape of a detection tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TensorLayout {
    /// Number of predictions (anchors).
    pub num_predictions: usize,
    /// Values per prediction, box + objectness + class scores (+ any extras).
    pub num_channels: usize,
    /// Number of class score channels scanned per prediction.
    pub num_classes: usize,
}

impl TensorLayout {
    /// Creates a layout and checks it for consistency.
    pub fn new(
        num_predictions: usize,
        num_channels: usize,
        num_classes: usize,
    ) -> DetPostResult<Self> {
        let layout = Self {
            num_predictions,
            num_channels,
            num_classes,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Checks that every class channel fits inside a prediction row.
    pub fn validate(&self) -> DetPostResult<()> {
        if self.num_classes == 0 {
            return Err(DetPostError::InvalidLayout {
                reason: "num_classes must be at least 1",
            });
        }
        let needed = CLASS_OFFSET
            .checked_add(self.num_classes)
            .ok_or(DetPostError::InvalidLayout {
                reason: "num_classes overflows",
            })?;
        if self.num_channels < needed {
            return Err(DetPostError::InvalidLayout {
                reason: "num_channels must be at least 5 + num_classes",
            });
        }
        self.required_len().map(|_| ())
    }

    /// Number of values a tensor with this layout must hold.
    pub fn required_len(&self) -> DetPostResult<usize> {
        self.num_predictions
            .checked_mul(self.num_channels)
            .ok_or(DetPostError::InvalidLayout {
                reason: "num_predictions * num_channels overflows",
            })
    }
}

/// Borrowed, shape-checked view over a flat `f32` detection tensor.
#[derive(Clone, Copy, Debug)]
pub struct TensorView<'a> {
    data: &'a [f32],
    layout: TensorLayout,
}

impl<'a> TensorView<'a> {
    /// Creates a view after validating `layout` against `data`.
    ///
    /// Trailing values beyond `num_predictions * num_channels` are ignored.
    pub fn new(data: &'a [f32], layout: TensorLayout) -> DetPostResult<Self> {
        layout.validate()?;
        let needed = layout.required_len()?;
        if data.len() < needed {
            return Err(DetPostError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data: &data[..needed],
            layout,
        })
    }

    /// Returns the tensor layout.
    pub fn layout(&self) -> TensorLayout {
        self.layout
    }

    /// Returns the number of predictions.
    pub fn num_predictions(&self) -> usize {
        self.layout.num_predictions
    }

    /// Returns the validated backing slice.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Returns the channel row of prediction `index`.
    pub fn prediction(&self, index: usize) -> Option<&'a [f32]> {
        if index >= self.layout.num_predictions {
            return None;
        }
        let start = index * self.layout.num_channels;
        self.data.get(start..start + self.layout.num_channels)
    }

    /// Iterates over prediction rows in index order.
    pub fn predictions(&self) -> std::slice::ChunksExact<'a, f32> {
        self.data.chunks_exact(self.layout.num_channels)
    }
}
