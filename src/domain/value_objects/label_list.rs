use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered list of labels given as a comma-separated string
///
/// Segments are kept byte-for-byte (no trimming). Empty segments are dropped,
/// so every element is a non-empty label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelList(Vec<String>);

impl LabelList {
    /// Parse a comma-separated list
    pub fn parse(input: &str) -> Self {
        Self(
            input
                .split(',')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Create a list from already split labels
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            labels
                .into_iter()
                .map(Into::into)
                .filter(|label: &String| !label.is_empty())
                .collect(),
        )
    }

    /// Return a new list with `label` in front
    pub fn prepend(&self, label: impl Into<String>) -> Self {
        let mut labels = Vec::with_capacity(self.0.len() + 1);
        labels.push(label.into());
        labels.extend(self.0.iter().cloned());
        Self::from_labels(labels)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Pairs of `(previous, label)` for building a stage chain
    ///
    /// The first element has an empty predecessor.
    pub fn chain(&self) -> impl Iterator<Item = (&str, &str)> {
        let previous = std::iter::once("").chain(self.iter());
        previous.zip(self.iter())
    }
}

impl fmt::Display for LabelList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl<'a> IntoIterator for &'a LabelList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
