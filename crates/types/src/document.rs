use serde::{Deserialize, Serialize};
use std::fmt;

/// One block-level unit of chapter content, already wrapped in its block tag.
///
/// Paragraphs are the atoms of pagination: a page holds whole paragraphs and a
/// paragraph is never split across pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paragraph(String);

impl Paragraph {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_html(&self) -> &str {
        &self.0
    }

    pub fn into_html(self) -> String {
        self.0
    }
}

impl From<String> for Paragraph {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Paragraph {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Paragraph {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A finished page: a window of consecutive paragraphs rendered as one HTML string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Zero-based position of the page in the chapter.
    pub index: usize,
    /// Index of the first paragraph on this page.
    pub first_paragraph: usize,
    /// Number of paragraphs on this page; zero only for the placeholder page.
    pub paragraph_count: usize,
    /// The page content.
    pub html: String,
    /// Set when the page holds a single paragraph that is taller than the box.
    pub overflows: bool,
}

impl Page {
    /// Range of paragraph indices covered by this page.
    pub fn paragraph_range(&self) -> std::ops::Range<usize> {
        self.first_paragraph..self.first_paragraph + self.paragraph_count
    }

    pub fn contains_paragraph(&self, paragraph: usize) -> bool {
        self.paragraph_range().contains(&paragraph)
    }

    pub fn is_placeholder(&self) -> bool {
        self.paragraph_count == 0
    }
}
