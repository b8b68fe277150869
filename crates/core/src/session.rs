//! The reader's explicit state object.
//!
//! A [`ReaderSession`] owns everything the reading view needs between user
//! actions: the open chapter's paragraphs, the annotation set, the font size,
//! the viewport and the current pagination. Every operation recomputes what it
//! invalidates synchronously and bumps [`ReaderSession::revision`], so a caller
//! that coalesces rapid triggers (resize storms, repeated font clicks) can tell
//! which result is the latest.

use crate::config::ReaderConfig;
use folio_annotate::Annotator;
use folio_content::{normalize_with, placeholder_paragraph};
use folio_layout::{LayoutOracle, Pagination, Paginator, render_page};
use folio_types::{Annotation, ChapterKey, Page, PageStyle, Paragraph, Size};

/// What happens to the current page index after a repagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIndexPolicy {
    /// Back to the first page. Used when the page split itself changed (font
    /// size, viewport, chapter): the old index no longer points at the same text.
    Reset,
    /// Keep the index, clamped to the new page count. Used when only the
    /// decoration changed.
    Clamp,
}

#[derive(Debug, Clone)]
struct Chapter {
    key: ChapterKey,
    /// Normalized paragraphs without markers.
    paragraphs: Vec<Paragraph>,
    /// `paragraphs` with the current annotation set applied.
    decorated: Vec<Paragraph>,
}

/// Reading state for one reader, one chapter at a time.
#[derive(Debug)]
pub struct ReaderSession<O> {
    config: ReaderConfig,
    oracle: O,
    paginator: Paginator,
    font_size: f32,
    viewport: Size,
    annotations: Vec<Annotation>,
    annotator: Annotator,
    chapter: Option<Chapter>,
    pagination: Pagination,
    current_page: usize,
    scroll_hint_seen: bool,
    revision: u64,
}

impl<O: LayoutOracle> ReaderSession<O> {
    pub fn new(config: ReaderConfig, oracle: O) -> Self {
        let font_size = config.font_scale.snap(config.font_scale.default);
        let viewport = config.viewport;
        let mut paginator =
            Paginator::with_style(config.page_style(font_size, viewport)).with_placeholder(config.placeholder_text.as_str());
        let pagination = paginator.paginate(&[], &oracle, config.page_style(font_size, viewport));
        Self {
            annotator: Annotator::with_style(&[], &config.marker_style()),
            config,
            oracle,
            paginator,
            font_size,
            viewport,
            annotations: Vec::new(),
            chapter: None,
            pagination,
            current_page: 0,
            scroll_hint_seen: false,
            revision: 0,
        }
    }

    /// Opens a chapter: normalizes `raw_content`, applies `annotations` and
    /// paginates. Starts on the first page.
    pub fn open_chapter(&mut self, key: ChapterKey, raw_content: Option<&str>, annotations: &[Annotation]) -> &Pagination {
        let paragraphs = normalize_with(raw_content, &self.config.normalize_options());
        log::info!("Opening {} with {} paragraphs and {} annotations.", key, paragraphs.len(), annotations.len());

        self.annotations = annotations.to_vec();
        self.annotator = Annotator::with_style(annotations, &self.config.marker_style());
        let decorated = self.annotator.decorate_paragraphs(&paragraphs);
        self.chapter = Some(Chapter {
            key,
            paragraphs,
            decorated,
        });
        self.repaginate(PageIndexPolicy::Reset);
        &self.pagination
    }

    /// Replaces the annotation set of the open chapter. The reader stays on the
    /// same page number where it still exists.
    pub fn set_annotations(&mut self, annotations: &[Annotation]) {
        self.annotations = annotations.to_vec();
        self.annotator = Annotator::with_style(annotations, &self.config.marker_style());
        if let Some(chapter) = &mut self.chapter {
            chapter.decorated = self.annotator.decorate_paragraphs(&chapter.paragraphs);
        }
        self.repaginate(PageIndexPolicy::Clamp);
    }

    /// Sets the font size, snapped to the configured scale, and returns the size
    /// applied. A change repaginates and returns to the first page.
    pub fn set_font_size(&mut self, size: f32) -> f32 {
        let size = self.config.font_scale.snap(size);
        if size != self.font_size {
            log::debug!("Font size {} -> {}", self.font_size, size);
            self.font_size = size;
            self.repaginate(PageIndexPolicy::Reset);
        }
        self.font_size
    }

    pub fn increase_font(&mut self) -> f32 {
        self.set_font_size(self.config.font_scale.increase(self.font_size))
    }

    pub fn decrease_font(&mut self) -> f32 {
        self.set_font_size(self.config.font_scale.decrease(self.font_size))
    }

    /// The reading container changed size. Repaginates and returns to the first
    /// page. An unusable box keeps the previous page split.
    pub fn resize(&mut self, viewport: Size) {
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.repaginate(PageIndexPolicy::Reset);
    }

    /// Advances one page. Returns false on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.current_page + 1 < self.page_count() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page. Returns false on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `index`, clamped to the last page. Returns the page shown.
    pub fn go_to_page(&mut self, index: usize) -> usize {
        self.current_page = index.min(self.page_count() - 1);
        self.current_page
    }

    /// Jumps to the page holding paragraph `paragraph`, if there is one.
    pub fn go_to_paragraph(&mut self, paragraph: usize) -> Option<usize> {
        let page = self.pagination.page_of_paragraph(paragraph)?;
        self.current_page = page;
        Some(page)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The page being shown. Pagination is never empty, so there always is one.
    pub fn page(&self) -> &Page {
        &self.pagination.pages[self.current_page]
    }

    pub fn pages(&self) -> &[Page] {
        &self.pagination.pages
    }

    pub fn page_count(&self) -> usize {
        self.pagination.len()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Position in the chapter from `0.0` (first page) to `1.0` (last page).
    /// A single-page chapter is fully read.
    pub fn progress(&self) -> f32 {
        match self.page_count() {
            0 | 1 => 1.0,
            n => self.current_page as f32 / (n - 1) as f32,
        }
    }

    /// First paragraph of the page being shown, for restoring the position after
    /// a repagination. `None` on the placeholder page.
    pub fn paragraph_at_current_page(&self) -> Option<usize> {
        let page = self.page();
        (!page.is_placeholder()).then_some(page.first_paragraph)
    }

    /// The whole decorated chapter as one HTML string, for scroll mode.
    pub fn continuous_html(&self) -> String {
        match &self.chapter {
            Some(chapter) => render_page(&chapter.decorated),
            None => placeholder_paragraph(&self.config.placeholder_text).into_html(),
        }
    }

    pub fn chapter(&self) -> Option<ChapterKey> {
        self.chapter.as_ref().map(|c| c.key)
    }

    /// Normalized paragraphs of the open chapter, without markers.
    pub fn paragraphs(&self) -> &[Paragraph] {
        self.chapter.as_ref().map_or(&[][..], |c| c.paragraphs.as_slice())
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The style the current pagination was measured with.
    pub fn page_style(&self) -> PageStyle {
        self.pagination.style
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Incremented by every operation that recomputes pages.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn scroll_hint_seen(&self) -> bool {
        self.scroll_hint_seen
    }

    pub fn mark_scroll_hint_seen(&mut self) {
        self.scroll_hint_seen = true;
    }

    /// Closes the chapter and forgets per-reader state: annotations, font size,
    /// viewport and the scroll hint flag all return to their configured defaults.
    pub fn reset(&mut self) {
        self.chapter = None;
        self.annotations.clear();
        self.annotator = Annotator::with_style(&[], &self.config.marker_style());
        self.font_size = self.config.font_scale.snap(self.config.font_scale.default);
        self.viewport = self.config.viewport;
        self.scroll_hint_seen = false;
        self.repaginate(PageIndexPolicy::Reset);
    }

    fn repaginate(&mut self, policy: PageIndexPolicy) {
        let style = self.config.page_style(self.font_size, self.viewport);
        let paragraphs = self.chapter.as_ref().map_or(&[][..], |c| c.decorated.as_slice());
        self.pagination = self.paginator.paginate(paragraphs, &self.oracle, style);
        self.current_page = match policy {
            PageIndexPolicy::Reset => 0,
            PageIndexPolicy::Clamp => self.current_page.min(self.pagination.len() - 1),
        };
        self.revision += 1;
        log::debug!(
            "Revision {}: {} pages at font size {}{}",
            self.revision,
            self.pagination.len(),
            self.pagination.style.font_size,
            if self.pagination.degraded { " (degraded)" } else { "" }
        );
    }
}
