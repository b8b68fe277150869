//! A minimal HTML tag scanner.
//!
//! Chapter content is "HTML-ish" rich text: paragraphs, emphasis, links,
//! superscripts. Nothing here builds a tree. The scanner only finds tag
//! boundaries so callers can tell markup bytes from text bytes and track
//! nesting depth. Quoted attribute values may contain `>`; comments are
//! skipped whole. A `<` that does not start a tag is plain text.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Open,
    Close,
    /// `<br>`, `<img ...>`, `<x/>`: opens nothing.
    SelfClosing,
    /// Comments, doctypes and processing instructions.
    Other,
}

/// One tag, borrowed from the scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub kind: TagKind,
    /// Byte offset of the `<`.
    pub start: usize,
    /// Byte offset just past the `>`.
    pub end: usize,
    raw: &'a str,
}

impl<'a> Tag<'a> {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Case-insensitive tag name comparison.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_block(&self) -> bool {
        is_block_element(self.name)
    }

    /// Looks up an attribute value on an opening tag. Attributes without a
    /// value yield `Some("")`.
    pub fn attr(&self, wanted: &str) -> Option<&'a str> {
        if !matches!(self.kind, TagKind::Open | TagKind::SelfClosing) {
            return None;
        }
        let raw = self.raw;
        let bytes = raw.as_bytes();
        let end = raw.len().saturating_sub(1);
        let mut i = 1 + self.name.len();

        while i < end {
            while i < end && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
                i += 1;
            }
            let name_start = i;
            while i < end && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' && bytes[i] != b'/' {
                i += 1;
            }
            if i == name_start {
                i += 1;
                continue;
            }
            let name = &raw[name_start..i];

            while i < end && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            let mut value = "";
            if i < end && bytes[i] == b'=' {
                i += 1;
                while i < end && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                if i < end && (bytes[i] == b'"' || bytes[i] == b'\'') {
                    let quote = bytes[i];
                    i += 1;
                    let value_start = i;
                    while i < end && bytes[i] != quote {
                        i += 1;
                    }
                    value = &raw[value_start..i];
                    i += 1;
                } else {
                    let value_start = i;
                    while i < end && !bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    value = &raw[value_start..i];
                }
            }

            if name.eq_ignore_ascii_case(wanted) {
                return Some(value);
            }
        }
        None
    }
}

/// Check if a tag is a block-level element that can stand as a paragraph on its own.
pub fn is_block_element(tag: &str) -> bool {
    const BLOCKS: &[&str] = &[
        "p", "div", "section", "article", "header", "footer", "aside", "h1", "h2", "h3", "h4",
        "h5", "h6", "figure", "figcaption", "blockquote", "ul", "ol", "li", "dl", "table", "pre",
        "hr", "address", "main",
    ];
    BLOCKS.iter().any(|b| tag.eq_ignore_ascii_case(b))
}

/// Elements that never have a closing tag.
pub fn is_void_element(tag: &str) -> bool {
    const VOIDS: &[&str] = &[
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
        "track", "wbr",
    ];
    VOIDS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

/// Finds the `>` that closes a tag starting before `from`, skipping quoted values.
fn tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i + 1),
            None => {}
        }
    }
    None
}

fn tag_name(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b':') {
        i += 1;
    }
    i
}

/// Finds the next tag at or after byte offset `pos`.
fn find_tag(html: &str, mut pos: usize) -> Option<Tag<'_>> {
    let bytes = html.as_bytes();
    while pos < bytes.len() {
        let start = pos + html[pos..].find('<')?;
        match bytes.get(start + 1) {
            Some(b'!') | Some(b'?') => {
                let end = if html[start..].starts_with("<!--") {
                    html[start + 4..].find("-->").map(|i| start + 4 + i + 3)
                } else {
                    tag_end(bytes, start + 2)
                }?;
                return Some(Tag {
                    name: "",
                    kind: TagKind::Other,
                    start,
                    end,
                    raw: &html[start..end],
                });
            }
            Some(b'/') if bytes.get(start + 2).is_some_and(|b| b.is_ascii_alphabetic()) => {
                let name_end = tag_name(bytes, start + 2);
                let end = tag_end(bytes, name_end)?;
                return Some(Tag {
                    name: &html[start + 2..name_end],
                    kind: TagKind::Close,
                    start,
                    end,
                    raw: &html[start..end],
                });
            }
            Some(b) if b.is_ascii_alphabetic() => {
                let name_end = tag_name(bytes, start + 1);
                let end = tag_end(bytes, name_end)?;
                let name = &html[start + 1..name_end];
                let raw = &html[start..end];
                let kind = if raw.ends_with("/>") || is_void_element(name) {
                    TagKind::SelfClosing
                } else {
                    TagKind::Open
                };
                return Some(Tag {
                    name,
                    kind,
                    start,
                    end,
                    raw,
                });
            }
            _ => pos = start + 1,
        }
    }
    None
}

/// Iterator over the tags of a string, in order.
#[derive(Debug, Clone)]
pub struct TagIter<'a> {
    html: &'a str,
    pos: usize,
}

impl<'a> Iterator for TagIter<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = find_tag(self.html, self.pos)?;
        self.pos = tag.end;
        Some(tag)
    }
}

pub fn scan_tags(html: &str) -> TagIter<'_> {
    TagIter { html, pos: 0 }
}

/// A run of text or a single tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text { start: usize, text: &'a str },
    Tag(Tag<'a>),
}

/// Iterator splitting a string into alternating text runs and tags.
#[derive(Debug, Clone)]
pub struct TokenIter<'a> {
    html: &'a str,
    pos: usize,
    pending: Option<Tag<'a>>,
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tag) = self.pending.take() {
            return Some(Token::Tag(tag));
        }
        if self.pos >= self.html.len() {
            return None;
        }
        let start = self.pos;
        match find_tag(self.html, start) {
            Some(tag) => {
                self.pos = tag.end;
                if tag.start > start {
                    self.pending = Some(tag);
                    Some(Token::Text {
                        start,
                        text: &self.html[start..tag.start],
                    })
                } else {
                    Some(Token::Tag(tag))
                }
            }
            None => {
                self.pos = self.html.len();
                Some(Token::Text {
                    start,
                    text: &self.html[start..],
                })
            }
        }
    }
}

pub fn tokens(html: &str) -> TokenIter<'_> {
    TokenIter {
        html,
        pos: 0,
        pending: None,
    }
}
