//! Finding and removing marker spans.
//!
//! A marker is any `<span>` carrying a `data-marker-id` attribute. Its region
//! runs from the `<` of the opening tag to the `>` of its matching `</span>`.

use folio_content::{Tag, TagKind, scan_tags};
use folio_types::AnnotationId;
use std::ops::Range;

/// Attribute that identifies a span as an annotation marker.
pub const MARKER_ID_ATTR: &str = "data-marker-id";

fn marker_id<'a>(tag: &Tag<'a>) -> Option<&'a str> {
    if tag.kind == TagKind::Open && tag.is("span") {
        tag.attr(MARKER_ID_ATTR)
    } else {
        None
    }
}

/// Byte ranges of the outermost marker spans in `html`, with their ids.
///
/// An unclosed marker extends to the end of the string.
pub fn marker_regions(html: &str) -> Vec<(Range<usize>, AnnotationId)> {
    let mut regions = Vec::new();
    // (start, id) of the outermost open marker and the span depth inside it.
    let mut open: Option<(usize, &str)> = None;
    let mut depth = 0usize;

    for tag in scan_tags(html) {
        if !tag.is("span") {
            continue;
        }
        match (open, tag.kind) {
            (None, TagKind::Open) => {
                if let Some(id) = marker_id(&tag) {
                    open = Some((tag.start, id));
                    depth = 1;
                }
            }
            (Some(_), TagKind::Open) => depth += 1,
            (Some((start, id)), TagKind::Close) => {
                depth -= 1;
                if depth == 0 {
                    regions.push((start..tag.end, AnnotationId::from(id)));
                    open = None;
                }
            }
            _ => {}
        }
    }

    if let Some((start, id)) = open {
        regions.push((start..html.len(), AnnotationId::from(id)));
    }
    regions
}

/// Ids of every marker in `html`, nested ones included, in document order and
/// without duplicates.
pub fn marker_ids(html: &str) -> Vec<AnnotationId> {
    let mut ids: Vec<AnnotationId> = Vec::new();
    for tag in scan_tags(html) {
        if let Some(id) = marker_id(&tag) {
            if !ids.iter().any(|known| known.as_str() == id) {
                ids.push(AnnotationId::from(id));
            }
        }
    }
    ids
}

/// Removes every marker span, keeping the content it wraps.
pub fn strip_markers(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    // One entry per open span: whether it is a marker.
    let mut spans: Vec<bool> = Vec::new();
    let mut copied_to = 0usize;

    for tag in scan_tags(html) {
        if !tag.is("span") {
            continue;
        }
        let drop_tag = match tag.kind {
            TagKind::Open => {
                let is_marker = marker_id(&tag).is_some();
                spans.push(is_marker);
                is_marker
            }
            TagKind::Close => spans.pop().unwrap_or(false),
            _ => false,
        };
        if drop_tag {
            out.push_str(&html[copied_to..tag.start]);
            copied_to = tag.end;
        }
    }
    out.push_str(&html[copied_to..]);
    out
}
