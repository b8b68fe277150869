//! Raw chapter content → canonical paragraph list.
//!
//! Chapters arrive either as plain text with blank lines between paragraphs or
//! as rich-text HTML from the CMS. Both become a list of block-wrapped
//! [`Paragraph`]s:
//!
//! 1. split on blank lines (`\r\n` is treated as `\n`),
//! 2. split each chunk further at top-level block elements, so
//!    `<p>a</p><p>b</p>` yields two paragraphs,
//! 3. wrap loose inline content in `<p>`, leaving block elements as authored,
//! 4. drop anything empty after trimming.
//!
//! The result never is empty: missing or blank content yields a single
//! placeholder paragraph so that pagination always has something to show.

use crate::html::{TagKind, Token, tokens};
use crate::text::{escape_html, starts_with_block};
use folio_types::Paragraph;
use regex::Regex;
use std::sync::LazyLock;

/// Text shown when a chapter has no content.
pub const DEFAULT_PLACEHOLDER: &str = "This chapter has no content yet.";

static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n[^\S\n]*\n").expect("BUG: invalid BLANK_LINE_RE regex literal")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Text of the placeholder paragraph used for empty chapters.
    pub placeholder_text: String,
    /// Render single line breaks inside a paragraph as `<br>` instead of folding
    /// them into spaces.
    pub preserve_line_breaks: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            placeholder_text: DEFAULT_PLACEHOLDER.to_string(),
            preserve_line_breaks: false,
        }
    }
}

/// Normalizes raw chapter content with default options.
pub fn normalize(raw: Option<&str>) -> Vec<Paragraph> {
    normalize_with(raw, &NormalizeOptions::default())
}

pub fn normalize_with(raw: Option<&str>, options: &NormalizeOptions) -> Vec<Paragraph> {
    let raw = raw.unwrap_or_default();
    let unified = if raw.contains('\r') {
        raw.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        raw.to_string()
    };

    let mut paragraphs = Vec::new();
    for chunk in BLANK_LINE_RE.split(&unified) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        for segment in split_top_level(chunk) {
            if let Some(paragraph) = segment.into_paragraph(options) {
                paragraphs.push(paragraph);
            }
        }
    }

    if paragraphs.is_empty() {
        log::debug!("Chapter content is empty; using placeholder paragraph.");
        paragraphs.push(placeholder_paragraph(&options.placeholder_text));
    }
    paragraphs
}

/// The paragraph shown in place of missing content.
pub fn placeholder_paragraph(text: &str) -> Paragraph {
    Paragraph::new(format!(
        "<p class=\"folio-placeholder\">{}</p>",
        escape_html(text)
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    /// A complete top-level block element, kept as authored.
    Block(&'a str),
    /// Text and inline markup between blocks.
    Inline(&'a str),
}

impl Segment<'_> {
    fn into_paragraph(self, options: &NormalizeOptions) -> Option<Paragraph> {
        match self {
            Segment::Block(html) => {
                let html = html.trim();
                (!html.is_empty()).then(|| Paragraph::new(html))
            }
            Segment::Inline(html) => {
                let folded = fold_line_breaks(html, options.preserve_line_breaks);
                if folded.is_empty() {
                    return None;
                }
                if starts_with_block(&folded) {
                    return Some(Paragraph::new(folded));
                }
                Some(Paragraph::new(format!("<p>{folded}</p>")))
            }
        }
    }
}

/// Joins the lines of a paragraph with a space or a `<br>`.
fn fold_line_breaks(html: &str, preserve: bool) -> String {
    let separator = if preserve { "<br>" } else { " " };
    html.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Splits a chunk at the boundaries of its top-level block elements.
///
/// Nesting depth counts every non-void element, so a block inside an inline
/// wrapper stays part of the inline run. A block that is never closed runs to
/// the end of the chunk.
fn split_top_level(chunk: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut inline_start = 0usize;
    let mut block_start: Option<usize> = None;

    for token in tokens(chunk) {
        let Token::Tag(tag) = token else {
            continue;
        };
        match tag.kind {
            TagKind::Open => {
                if depth == 0 && block_start.is_none() && tag.is_block() {
                    push_inline(&mut segments, chunk, inline_start, tag.start);
                    block_start = Some(tag.start);
                }
                depth += 1;
            }
            TagKind::Close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(start) = block_start.take() {
                        segments.push(Segment::Block(&chunk[start..tag.end]));
                        inline_start = tag.end;
                    }
                }
            }
            TagKind::SelfClosing => {
                if depth == 0 && block_start.is_none() && tag.is_block() {
                    push_inline(&mut segments, chunk, inline_start, tag.start);
                    segments.push(Segment::Block(&chunk[tag.start..tag.end]));
                    inline_start = tag.end;
                }
            }
            TagKind::Other => {}
        }
    }

    match block_start {
        Some(start) => segments.push(Segment::Block(&chunk[start..])),
        None => push_inline(&mut segments, chunk, inline_start, chunk.len()),
    }
    segments
}

fn push_inline<'a>(segments: &mut Vec<Segment<'a>>, chunk: &'a str, from: usize, to: usize) {
    if from < to && !chunk[from..to].trim().is_empty() {
        segments.push(Segment::Inline(&chunk[from..to]));
    }
}
