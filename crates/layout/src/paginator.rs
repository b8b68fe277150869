//! Greedy paragraph packing.
//!
//! Paragraphs are appended to a candidate page one at a time and the candidate
//! is measured after every append. When it overflows, the page is closed
//! without the new paragraph and the paragraph opens the next page. A
//! paragraph that overflows on its own still gets a page of its own: content
//! is never split or dropped.

use crate::LayoutError;
use crate::style::StyleGuard;
use folio_content::{DEFAULT_PLACEHOLDER, placeholder_paragraph};
use folio_traits::LayoutOracle;
use folio_types::{Page, PageStyle, Paragraph};
use serde::Serialize;

/// Separator between paragraphs on one page.
const PARAGRAPH_SEPARATOR: &str = "\n";

/// The result of one pagination pass. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub pages: Vec<Page>,
    /// The style that was actually measured with.
    pub style: PageStyle,
    /// Set when the oracle failed and the chapter fell back to one page per
    /// paragraph.
    pub degraded: bool,
}

impl Pagination {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Index of the page holding paragraph `paragraph`.
    pub fn page_of_paragraph(&self, paragraph: usize) -> Option<usize> {
        self.pages.iter().position(|page| page.contains_paragraph(paragraph))
    }

    /// Number of paragraphs across all pages.
    pub fn paragraph_count(&self) -> usize {
        self.pages.iter().map(|page| page.paragraph_count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }
}

/// Joins paragraphs into one page's HTML.
pub fn render_page(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(Paragraph::as_html)
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

/// Paginates with a fresh [`Paginator`].
pub fn paginate(paragraphs: &[Paragraph], oracle: &dyn LayoutOracle, style: PageStyle) -> Pagination {
    Paginator::new().paginate(paragraphs, oracle, style)
}

/// Packs paragraphs into pages, remembering the last usable style between
/// passes.
#[derive(Debug, Clone)]
pub struct Paginator {
    styles: StyleGuard,
    /// Text of the page emitted when there is nothing to paginate.
    placeholder_text: String,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            styles: StyleGuard::default(),
            placeholder_text: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paginator whose fallback style starts at `style`.
    pub fn with_style(style: PageStyle) -> Self {
        Self {
            styles: StyleGuard::new(style),
            ..Self::default()
        }
    }

    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = text.into();
        self
    }

    pub fn last_good_style(&self) -> PageStyle {
        self.styles.last_good()
    }

    pub fn paginate(&mut self, paragraphs: &[Paragraph], oracle: &dyn LayoutOracle, style: PageStyle) -> Pagination {
        let style = self.styles.resolve(style);

        if paragraphs.is_empty() {
            log::debug!("No paragraphs to paginate; emitting the placeholder page.");
            return Pagination {
                pages: vec![placeholder_page(&self.placeholder_text)],
                style,
                degraded: false,
            };
        }

        match pack(paragraphs, oracle, &style) {
            Ok(pages) => {
                log::debug!(
                    "Paginated {} paragraphs into {} pages with oracle '{}'.",
                    paragraphs.len(),
                    pages.len(),
                    oracle.name()
                );
                Pagination {
                    pages,
                    style,
                    degraded: false,
                }
            }
            Err(e) => {
                log::warn!(
                    "Oracle '{}' failed ({}); falling back to one page per paragraph.",
                    oracle.name(),
                    e
                );
                Pagination {
                    pages: one_per_paragraph(paragraphs),
                    style,
                    degraded: true,
                }
            }
        }
    }
}

fn placeholder_page(text: &str) -> Page {
    Page {
        index: 0,
        first_paragraph: 0,
        paragraph_count: 0,
        html: placeholder_paragraph(text).into_html(),
        overflows: false,
    }
}

fn one_per_paragraph(paragraphs: &[Paragraph]) -> Vec<Page> {
    paragraphs
        .iter()
        .enumerate()
        .map(|(i, paragraph)| Page {
            index: i,
            first_paragraph: i,
            paragraph_count: 1,
            html: paragraph.as_html().to_string(),
            overflows: false,
        })
        .collect()
}

/// The single forward packing pass. The surface is dropped on every return.
fn pack(paragraphs: &[Paragraph], oracle: &dyn LayoutOracle, style: &PageStyle) -> Result<Vec<Page>, LayoutError> {
    let mut surface = oracle.open_surface(style)?;
    let mut pages = Vec::new();
    let mut buffer = PageBuffer::default();

    for (i, paragraph) in paragraphs.iter().enumerate() {
        let was_empty = buffer.is_empty();
        buffer.push(i, paragraph);
        if !surface.fit(&buffer.html)?.overflows() {
            continue;
        }

        if was_empty {
            // Too tall even alone: it gets its own page.
            buffer.overflows = true;
            pages.push(buffer.finish(pages.len())?);
        } else {
            buffer.pop();
            pages.push(buffer.finish(pages.len())?);
            buffer.push(i, paragraph);
            buffer.overflows = surface.fit(&buffer.html)?.overflows();
        }
    }

    if !buffer.is_empty() {
        pages.push(buffer.finish(pages.len())?);
    }
    Ok(pages)
}

/// The candidate page being filled.
#[derive(Debug, Default)]
struct PageBuffer {
    first: usize,
    count: usize,
    html: String,
    /// Byte length of `html` before the most recent push.
    previous_len: usize,
    overflows: bool,
}

impl PageBuffer {
    fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn push(&mut self, index: usize, paragraph: &Paragraph) {
        self.previous_len = self.html.len();
        if self.count == 0 {
            self.first = index;
        } else {
            self.html.push_str(PARAGRAPH_SEPARATOR);
        }
        self.html.push_str(paragraph.as_html());
        self.count += 1;
    }

    /// Undoes the most recent push.
    fn pop(&mut self) {
        self.html.truncate(self.previous_len);
        self.count -= 1;
    }

    /// Closes the buffer into a page and resets it.
    fn finish(&mut self, index: usize) -> Result<Page, LayoutError> {
        if self.count == 0 {
            return Err(LayoutError::EmptyPage(index));
        }
        let page = Page {
            index,
            first_paragraph: self.first,
            paragraph_count: self.count,
            html: std::mem::take(&mut self.html),
            overflows: self.overflows,
        };
        log::debug!(
            "Finalized page {} with paragraphs {:?}.",
            index,
            page.paragraph_range()
        );
        *self = Self::default();
        Ok(page)
    }
}
