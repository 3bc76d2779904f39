//! Label and text normalization shared by every factor.
//!
//! Matching is case-insensitive and whitespace-trimmed, and `_` is equivalent to a space,
//! so `"natural_rubber"`, `" Natural Rubber "` and `"NATURAL  RUBBER"` are the same label.

use std::collections::BTreeSet;

/// Normalizes a label: case-folded, `_` as space, trimmed, internal whitespace collapsed.
///
/// Upper-casing before lower-casing folds letters whose upper-case form expands
/// (`ß` becomes `ss`), so a label and its upper-cased copy always normalize alike.
pub fn normalize_label(raw: &str) -> String {
    raw.to_uppercase()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes free text the same way as labels so substring search lines up.
pub fn normalize_text(raw: &str) -> String {
    normalize_label(raw)
}

/// A set of normalized labels. Blank labels are dropped and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet(BTreeSet<String>);

impl LabelSet {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            labels
                .into_iter()
                .map(|label| normalize_label(label.as_ref()))
                .filter(|label| !label.is_empty())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `label` must already be normalized.
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Labels present in both sets, in sorted order.
    pub fn intersection<'a>(&'a self, other: &'a LabelSet) -> impl Iterator<Item = &'a str> {
        self.0.intersection(&other.0).map(String::as_str)
    }
}
