//! Field paths for addressing nodes within a form
//!
//! Provides [`FieldPath`], the name chain from the form root down to a node.
//! The same segments index into the submitted [`Payload`](crate::Payload).

use std::fmt::{self, Display, Formatter};

/// Separator used when a path is rendered as a single string
pub const NAME_SEPARATOR: char = '-';

/// Path of a node inside a form tree
///
/// The form root itself is not part of the path.
///
/// # Examples
/// - `["phones", "0", "number"]` → `phones-0-number`
/// - `["address", "street"]` → `address-street`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

/// Check that a single name is usable as a path segment
///
/// # Errors
/// Returns [`PathError`] for empty names or names with characters outside
/// `[A-Za-z0-9_]`.
pub fn validate_segment(segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        Err(PathError::EmptySegment)
    } else if segment.contains(|c: char| !c.is_alphanumeric() && c != '_') {
        Err(PathError::InvalidSegment(segment.to_string()))
    } else {
        Ok(())
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, "{NAME_SEPARATOR}")?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FieldPath {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(String::as_str)
    }
}

/// Errors related to field paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be alphanumeric or underscore)")]
    InvalidSegment(String),
}
