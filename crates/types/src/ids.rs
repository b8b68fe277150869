//! Newtype wrappers for identifiers handed to the core by its collaborators.
//!
//! These keep annotation ids and chapter coordinates from being mixed up with
//! the plain strings and integers that flow through the matcher and paginator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identifier of a highlight or author note, as issued by the annotation store.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(String);

impl AnnotationId {
    /// Creates a new AnnotationId from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this annotation ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AnnotationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AnnotationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for AnnotationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Addresses one chapter of a serialized work: the part it belongs to and its
/// position inside that part.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChapterKey {
    pub part: u32,
    pub chapter: u32,
}

impl ChapterKey {
    pub fn new(part: u32, chapter: u32) -> Self {
        Self { part, chapter }
    }
}

impl fmt::Display for ChapterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part {} / chapter {}", self.part, self.chapter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_id_serializes_as_plain_string() {
        let id = AnnotationId::new("h1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"h1\"");
        let back: AnnotationId = serde_json::from_str("\"n7\"").unwrap();
        assert_eq!(back.as_str(), "n7");
    }

    #[test]
    fn chapter_keys_order_by_part_then_chapter() {
        assert!(ChapterKey::new(1, 9) < ChapterKey::new(2, 0));
        assert!(ChapterKey::new(2, 1) < ChapterKey::new(2, 3));
        assert_eq!(ChapterKey::new(3, 4).to_string(), "part 3 / chapter 4");
    }
}
