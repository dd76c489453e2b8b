//! Individual pipeline stages for custom post-processing.
//!
//! Most users should go through [`Detector`](crate::Detector) or
//! [`PostProcessor`](crate::PostProcessor).

pub use crate::candidate::filter::{filter_aspect_ratio, AspectRatioRange};
pub use crate::candidate::nms::suppress;
pub use crate::decode::{decode, DecodeParams};
pub use crate::geometry::iou;
pub use crate::labels::{COCO_LABELS, CURRENCY_LABELS};
pub use crate::tensor::{CLASS_OFFSET, OBJECTNESS_CHANNEL};

#[cfg(feature = "rayon")]
pub use crate::decode::rayon::decode_par;
