//! Submitted form data
//!
//! A [`Payload`] is the decoded request body: a nested mapping whose leaves
//! are strings. Key order is preserved, since rows are rebuilt in the order
//! the client sent them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Nested mapping of field name to value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// A single submitted value
    Leaf(String),
    /// A named sub-structure
    Nested(IndexMap<String, Payload>),
}

impl Payload {
    /// Empty nested payload
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::Nested(IndexMap::new())
    }

    /// Leaf payload from any string-like value
    #[inline]
    #[must_use]
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf(value.into())
    }

    /// Check if this is a leaf value
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Borrow the leaf value
    #[inline]
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Nested(_) => None,
        }
    }

    /// Borrow the nested entries
    #[inline]
    #[must_use]
    pub fn as_nested(&self) -> Option<&IndexMap<String, Payload>> {
        match self {
            Self::Nested(entries) => Some(entries),
            Self::Leaf(_) => None,
        }
    }

    /// Number of direct entries (0 for leaves)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_nested().map_or(0, IndexMap::len)
    }

    /// Check if there are no direct entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct child by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Payload> {
        self.as_nested().and_then(|entries| entries.get(key))
    }

    /// Descend along a sequence of keys
    ///
    /// An empty sequence returns `self`.
    #[must_use]
    pub fn get_path<'a, I>(&self, path: I) -> Option<&Payload>
    where
        I: IntoIterator<Item = &'a str>,
    {
        path.into_iter()
            .try_fold(self, |current, key| current.get(key))
    }

    /// Keys whose values are nested structures, in submission order
    #[must_use]
    pub fn nested_keys(&self) -> Vec<&str> {
        self.as_nested()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, value)| !value.is_leaf())
                    .map(|(key, _)| key.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether any leaf below (or at) this node is a non-empty string
    #[must_use]
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Leaf(value) => !value.is_empty(),
            Self::Nested(entries) => entries.values().any(Payload::is_filled),
        }
    }

    /// Copy without the given keys at any depth
    #[must_use]
    pub fn without_keys_deep(&self, names: &HashSet<&str>) -> Payload {
        match self {
            Self::Leaf(_) => self.clone(),
            Self::Nested(entries) => Self::Nested(
                entries
                    .iter()
                    .filter(|(key, _)| !names.contains(key.as_str()))
                    .map(|(key, value)| (key.clone(), value.without_keys_deep(names)))
                    .collect(),
            ),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Payload)> for Payload {
    fn from_iter<T: IntoIterator<Item = (K, Payload)>>(iter: T) -> Self {
        Self::Nested(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::leaf(value)
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Leaf(value)
    }
}
