//! Wrapping trigger matches in marker spans.
//!
//! All positions are byte offsets into the *input* string. Every accepted match
//! becomes a claim; later (shorter) annotations skip any candidate that touches
//! a claim, and markers already present in the input are claims from the start.
//! Output is assembled once at the end, so claims never have to be shifted.
//!
//! Claims never overlap and markers are never nested. A match that cannot be
//! widened to nest cleanly is written as several sibling spans with the same
//! id, split at the tags it would otherwise cross. Running the same annotation
//! set over its own output therefore finds nothing new.

use crate::markers::{MARKER_ID_ATTR, marker_regions};
use crate::pattern::{TriggerPattern, build_pattern};
use folio_content::{Tag, TagKind, escape_attr, plain_text, scan_tags};
use folio_types::{Annotation, AnnotationId, Paragraph, RenderHint};
use std::ops::Range;

/// Presentation of marker spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    /// Base CSS class. Each marker also gets `{class}--{kind}`.
    pub class: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            class: "folio-marker".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    annotation: Annotation,
    pattern: TriggerPattern,
    open_tag: String,
}

/// A compiled, ordered annotation set that can decorate any number of
/// paragraphs or pages.
#[derive(Debug, Clone)]
pub struct Annotator {
    entries: Vec<Entry>,
}

/// Wraps every annotation trigger found in `html` in a marker span.
pub fn apply_annotations(html: &str, annotations: &[Annotation]) -> String {
    Annotator::new(annotations).apply(html)
}

impl Annotator {
    pub fn new(annotations: &[Annotation]) -> Self {
        Self::with_style(annotations, &MarkerStyle::default())
    }

    /// Compiles the annotation set.
    ///
    /// Annotations are ordered by trigger length, longest first; equal lengths
    /// are ordered by id, and equal ids keep their input order. Annotations whose
    /// trigger has no visible text are dropped.
    pub fn with_style(annotations: &[Annotation], style: &MarkerStyle) -> Self {
        let mut entries: Vec<Entry> = annotations
            .iter()
            .filter_map(|annotation| match build_pattern(&annotation.trigger_text) {
                Ok(pattern) => Some(Entry {
                    open_tag: open_tag(annotation, style),
                    annotation: annotation.clone(),
                    pattern,
                }),
                Err(e) => {
                    log::debug!("Skipping annotation '{}': {}", annotation.id, e);
                    None
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.annotation
                .trigger_len()
                .cmp(&a.annotation.trigger_len())
                .then_with(|| a.annotation.id.cmp(&b.annotation.id))
        });
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Annotations in matching order.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.entries.iter().map(|e| &e.annotation)
    }

    /// Decorates one HTML fragment.
    pub fn apply(&self, html: &str) -> String {
        if self.entries.is_empty() {
            return html.to_string();
        }

        let tags: Vec<Tag<'_>> = scan_tags(html).collect();
        let mut claims = existing_claims(html);
        let mut wraps: Vec<(Range<usize>, usize)> = Vec::new();

        for (index, entry) in self.entries.iter().enumerate() {
            let mut pos = 0;
            let mut found = 0usize;
            while let Some(candidate) = entry.pattern.find_at(html, pos) {
                match accept(html, &tags, &claims, candidate.clone()) {
                    Some(range) => {
                        pos = range.end;
                        claims.push(range.clone());
                        wraps.push((range, index));
                        found += 1;
                    }
                    None => pos = next_char_boundary(html, candidate.start),
                }
            }
            if found == 0 {
                log::debug!(
                    "Trigger for annotation '{}' not found in content.",
                    entry.annotation.id
                );
            }
        }

        if wraps.is_empty() {
            return html.to_string();
        }
        wraps.sort_by_key(|(range, _)| range.start);

        let mut out = String::with_capacity(html.len() + wraps.len() * 128);
        let mut copied_to = 0;
        for (range, index) in wraps {
            for piece in segments(html, &tags, range) {
                out.push_str(&html[copied_to..piece.start]);
                out.push_str(&self.entries[index].open_tag);
                out.push_str(&html[piece.clone()]);
                out.push_str("</span>");
                copied_to = piece.end;
            }
        }
        out.push_str(&html[copied_to..]);
        out
    }

    /// Decorates each paragraph on its own; markers never cross paragraph
    /// boundaries.
    pub fn decorate_paragraphs(&self, paragraphs: &[Paragraph]) -> Vec<Paragraph> {
        paragraphs
            .iter()
            .map(|p| Paragraph::new(self.apply(p.as_html())))
            .collect()
    }
}

/// Regions already covered by markers. Sibling spans of one marker that were
/// split around tags form a single claim.
fn existing_claims(html: &str) -> Vec<Range<usize>> {
    let mut claims: Vec<(Range<usize>, AnnotationId)> = Vec::new();
    for (range, id) in marker_regions(html) {
        if let Some((last, last_id)) = claims.last_mut() {
            if *last_id == id && plain_text(&html[last.end..range.start]).is_empty() {
                last.end = range.end;
                continue;
            }
        }
        claims.push((range, id));
    }
    claims.into_iter().map(|(range, _)| range).collect()
}

fn open_tag(annotation: &Annotation, style: &MarkerStyle) -> String {
    let kind = annotation.kind.as_str();
    let mut tag = format!(
        "<span class=\"{class} {class}--{kind}\" {MARKER_ID_ATTR}=\"{id}\" data-marker-kind=\"{kind}\" data-marker-hint=\"{hint}\"",
        class = escape_attr(&style.class),
        id = escape_attr(annotation.id.as_str()),
        hint = annotation.hint.as_str(),
    );
    if let RenderHint::Color(color) = &annotation.hint {
        tag.push_str(&format!(
            " style=\"background-color: {}\"",
            escape_attr(color)
        ));
    }
    tag.push('>');
    tag
}

/// Decides whether a candidate match can be wrapped, returning the range to wrap.
fn accept(html: &str, tags: &[Tag<'_>], claims: &[Range<usize>], candidate: Range<usize>) -> Option<Range<usize>> {
    if inside_tag(tags, candidate.start)
        || inside_tag(tags, candidate.end)
        || inside_entity(html, candidate.start)
        || inside_entity(html, candidate.end)
    {
        return None;
    }
    let balanced = balance(html, tags, candidate.clone());
    [balanced, candidate]
        .into_iter()
        .find(|range| !claims.iter().any(|claim| overlaps(claim, range)))
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// True when `pos` falls strictly between a tag's `<` and `>`.
fn inside_tag(tags: &[Tag<'_>], pos: usize) -> bool {
    let i = tags.partition_point(|t| t.end <= pos);
    tags.get(i).is_some_and(|t| t.start < pos)
}

/// True when `pos` falls strictly inside a character reference like `&amp;`.
fn inside_entity(html: &str, pos: usize) -> bool {
    let bytes = html.as_bytes();
    let floor = pos.saturating_sub(10);
    let Some(amp) = bytes[floor..pos].iter().rposition(|&b| b == b'&').map(|i| floor + i) else {
        return false;
    };
    let is_ref_byte = |b: &u8| b.is_ascii_alphanumeric() || *b == b'#';
    if !bytes[amp + 1..pos].iter().all(is_ref_byte) {
        return false;
    }
    let tail = bytes[pos..].iter().take_while(|b| is_ref_byte(*b)).count();
    bytes.get(pos + tail) == Some(&b';')
}

fn next_char_boundary(html: &str, pos: usize) -> usize {
    html[pos..]
        .chars()
        .next()
        .map_or(html.len(), |c| pos + c.len_utf8())
}

/// Widens a match so the marker span nests cleanly.
///
/// `the <b>red</b> giant` matched as `red</b> giant` has a closing tag whose
/// opener sits just before the match; the opener is pulled in. Likewise an
/// opening tag inside the match whose close sits just after it pulls the close
/// in. Only whitespace may separate the match from the tags it absorbs.
fn balance(html: &str, tags: &[Tag<'_>], range: Range<usize>) -> Range<usize> {
    let first = tags.partition_point(|t| t.start < range.start);
    let last = tags.partition_point(|t| t.end <= range.end);
    let inner = tags.get(first..last).unwrap_or_default();

    let mut open: Vec<&str> = Vec::new();
    let mut unmatched_close: Vec<&str> = Vec::new();
    for tag in inner {
        match tag.kind {
            TagKind::Open => open.push(tag.name),
            TagKind::Close => {
                if open.last().is_some_and(|name| name.eq_ignore_ascii_case(tag.name)) {
                    open.pop();
                } else {
                    unmatched_close.push(tag.name);
                }
            }
            _ => {}
        }
    }

    let mut start = range.start;
    let mut before = first;
    for name in unmatched_close {
        let Some(tag) = before.checked_sub(1).and_then(|i| tags.get(i)) else {
            break;
        };
        if tag.kind != TagKind::Open || !tag.is(name) || !html[tag.end..start].trim().is_empty() {
            break;
        }
        start = tag.start;
        before -= 1;
    }

    let mut end = range.end;
    let mut after = last;
    while let Some(name) = open.pop() {
        let Some(tag) = tags.get(after) else {
            break;
        };
        if tag.kind != TagKind::Close || !tag.is(name) || !html[end..tag.start].trim().is_empty() {
            break;
        }
        end = tag.end;
        after += 1;
    }

    start..end
}

/// Splits a wrap range at every tag whose partner lies outside it, so each
/// piece can carry its own span without crossing tags. A range that is already
/// balanced comes back whole. Whitespace at the edges of a piece stays outside
/// the span, and pieces without text are skipped.
fn segments(html: &str, tags: &[Tag<'_>], range: Range<usize>) -> Vec<Range<usize>> {
    let first = tags.partition_point(|t| t.start < range.start);
    let last = tags.partition_point(|t| t.end <= range.end);
    let inner = tags.get(first..last).unwrap_or_default();

    let mut open: Vec<usize> = Vec::new();
    let mut cuts: Vec<usize> = Vec::new();
    for (i, tag) in inner.iter().enumerate() {
        match tag.kind {
            TagKind::Open => open.push(i),
            TagKind::Close => {
                if open.last().is_some_and(|&o| inner[o].is(tag.name)) {
                    open.pop();
                } else {
                    cuts.push(i);
                }
            }
            _ => {}
        }
    }
    if cuts.is_empty() && open.is_empty() {
        return vec![range];
    }
    cuts.extend(open);
    cuts.sort_unstable();

    let mut pieces = Vec::new();
    let mut start = range.start;
    for i in cuts {
        push_piece(html, &mut pieces, start..inner[i].start);
        start = inner[i].end;
    }
    push_piece(html, &mut pieces, start..range.end);
    pieces
}

fn push_piece(html: &str, pieces: &mut Vec<Range<usize>>, range: Range<usize>) {
    let text = &html[range.clone()];
    let start = range.start + (text.len() - text.trim_start().len());
    let end = range.end - (text.len() - text.trim_end().len());
    if start < end && !plain_text(&html[start..end]).is_empty() {
        pieces.push(start..end);
    }
}
