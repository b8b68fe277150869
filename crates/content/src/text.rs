//! Plain-text views of chapter HTML.

use crate::html::{Token, is_block_element, tokens};
use std::borrow::Cow;

/// Extracts the visible text of an HTML fragment.
///
/// Tags are dropped, block boundaries and `<br>` become spaces, entities are
/// decoded and whitespace runs collapse to a single space. Two fragments that
/// differ only in markup therefore have the same plain text.
pub fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut pending_space = false;

    for token in tokens(html) {
        match token {
            Token::Tag(tag) => {
                if tag.is_block() || tag.is("br") {
                    pending_space = true;
                }
            }
            Token::Text { text, .. } => {
                for ch in decode_entities(text).chars() {
                    if ch.is_whitespace() {
                        pending_space = true;
                        continue;
                    }
                    if pending_space && !out.is_empty() {
                        out.push(' ');
                    }
                    pending_space = false;
                    out.push(ch);
                }
            }
        }
    }
    out
}

/// Decodes the character references that occur in authored chapter text.
///
/// Unknown named references are left untouched.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match candidate.find(';').filter(|&semi| semi <= 10) {
            Some(semi) => match decode_reference(&candidate[1..semi]) {
                Some(ch) => {
                    out.push(ch);
                    rest = &candidate[semi + 1..];
                }
                None => {
                    out.push('&');
                    rest = &candidate[1..];
                }
            },
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "mdash" => Some('\u{2014}'),
        "ndash" => Some('\u{2013}'),
        "hellip" => Some('\u{2026}'),
        "lsquo" => Some('\u{2018}'),
        "rsquo" => Some('\u{2019}'),
        "ldquo" => Some('\u{201c}'),
        "rdquo" => Some('\u{201d}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Escapes text for use as HTML character data.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    escape(text, false)
}

/// Escapes text for use inside a double-quoted attribute value.
pub fn escape_attr(text: &str) -> Cow<'_, str> {
    escape(text, true)
}

fn escape(text: &str, quotes: bool) -> Cow<'_, str> {
    let needs = |c: char| matches!(c, '&' | '<' | '>') || (quotes && matches!(c, '"' | '\''));
    if !text.contains(needs) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            '\'' if quotes => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// True when `html` starts with a block-level element.
pub(crate) fn starts_with_block(html: &str) -> bool {
    match tokens(html.trim_start()).next() {
        Some(Token::Tag(tag)) => tag.start == 0 && is_block_element(tag.name),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_strips_tags_and_collapses_space() {
        assert_eq!(plain_text("<p>the <b>red</b>\n  giant</p>"), "the red giant");
        assert_eq!(plain_text("<p>one</p><p>two</p>"), "one two");
        assert_eq!(plain_text("line<br>break"), "line break");
        assert_eq!(plain_text("  "), "");
    }

    #[test]
    fn markup_does_not_change_plain_text() {
        let bare = "<p>la estrella muerta brilla</p>";
        let marked = r#"<p>la <span class="m" data-marker-id="h1">estrella muerta</span> brilla</p>"#;
        assert_eq!(plain_text(bare), plain_text(marked));
    }

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&#233;t&#xE9;"), "été");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{a0}b");
        assert_eq!(decode_entities("AT&T &bogus; x"), "AT&T &bogus; x");
        assert!(matches!(decode_entities("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn nbsp_collapses_like_whitespace() {
        assert_eq!(plain_text("a&nbsp;&nbsp;b"), "a b");
    }

    #[test]
    fn escaping() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_html(r#"say "hi""#), r#"say "hi""#);
    }

    #[test]
    fn block_detection() {
        assert!(starts_with_block("  <blockquote>x</blockquote>"));
        assert!(!starts_with_block("<em>x</em>"));
        assert!(!starts_with_block("text <p>x</p>"));
    }
}
