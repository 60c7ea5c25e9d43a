//! Label sets and label queries

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unordered set of key/value tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

impl Labels {
    /// Create an empty label set
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a label, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a label, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Get a label value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no labels
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the labels in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when every label here is present with the same value in `that`.
    ///
    /// The empty set is a subset of everything.
    pub fn is_subset_of(&self, that: &Labels) -> bool {
        self.0
            .iter()
            .all(|(k, v)| that.0.get(k).is_some_and(|other| other == v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Alternative label sets used as a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelsCollection(Vec<Labels>);

impl LabelsCollection {
    /// The query that matches everything
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of alternative label sets
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the query has no label sets
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when any member is a subset of `that`.
    ///
    /// An empty collection matches every label set.
    pub fn has_subset_of(&self, that: &Labels) -> bool {
        self.0.is_empty() || self.0.iter().any(|labels| labels.is_subset_of(that))
    }
}

impl From<Labels> for LabelsCollection {
    fn from(labels: Labels) -> Self {
        Self(vec![labels])
    }
}

impl From<Vec<Labels>> for LabelsCollection {
    fn from(labels: Vec<Labels>) -> Self {
        Self(labels)
    }
}

impl FromIterator<Labels> for LabelsCollection {
    fn from_iter<I: IntoIterator<Item = Labels>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
