//! Candidate pruning utilities.
//!
//! Includes greedy IoU suppression and aspect-ratio post-filtering.

pub(crate) mod filter;
pub(crate) mod nms;
