//! Class label sets.
//!
//! Label files are UTF-8 text with one class name per line in class-index
//! order. Lines are trimmed and blank lines are skipped.

mod defaults;

pub use defaults::{COCO_LABELS, CURRENCY_LABELS};

use crate::util::{DetPostError, DetPostResult};
use std::fs;
use std::path::Path;

/// Ordered, immutable class names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSet {
    names: Vec<String>,
}

impl LabelSet {
    /// Creates a label set from owned names.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Creates a label set from static names.
    pub fn from_static(names: &[&str]) -> Self {
        Self::new(names.iter().map(|name| (*name).to_owned()).collect())
    }

    /// Parses label file contents.
    pub fn parse(text: &str) -> Self {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self { names }
    }

    /// Reads and parses a label file.
    pub fn load<P: AsRef<Path>>(path: P) -> DetPostResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| DetPostError::LabelIo {
            reason: format!("{}: {err}", path.display()),
        })?;
        Ok(Self::parse(&text))
    }

    /// Indian rupee denominations used when a currency label file is missing.
    pub fn currency_default() -> Self {
        Self::from_static(&CURRENCY_LABELS)
    }

    /// COCO class names used when an object label file is missing.
    pub fn coco_default() -> Self {
        Self::from_static(&COCO_LABELS)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when no labels were loaded.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the name of class `class_id`.
    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.names.get(class_id).map(String::as_str)
    }

    /// Returns all names in index order.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Returns `self` unless it is empty, in which case `fallback()`.
    pub fn or_else(self, fallback: impl FnOnce() -> LabelSet) -> LabelSet {
        if self.is_empty() {
            fallback()
        } else {
            self
        }
    }
}

impl FromIterator<String> for LabelSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::LabelSet;

    #[test]
    fn parse_trims_and_skips_blank_lines() {
        let labels = LabelSet::parse("10_rupee\r\n\n  20_rupee  \n\n");
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get(0), Some("10_rupee"));
        assert_eq!(labels.get(1), Some("20_rupee"));
        assert_eq!(labels.get(2), None);
    }

    #[test]
    fn or_else_only_replaces_empty_sets() {
        let empty = LabelSet::parse("\n \n");
        assert!(empty.is_empty());
        let filled = empty.or_else(LabelSet::currency_default);
        assert_eq!(filled.len(), 7);
        assert_eq!(filled.get(6), Some("2000_rupee"));

        let kept = LabelSet::parse("a\nb").or_else(LabelSet::coco_default);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn coco_default_has_eighty_classes() {
        let labels = LabelSet::coco_default();
        assert_eq!(labels.len(), 80);
        assert_eq!(labels.get(0), Some("person"));
        assert_eq!(labels.get(79), Some("toothbrush"));
    }
}
