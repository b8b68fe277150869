//! Trigger text → search pattern.
//!
//! The compilation rules, applied word by word:
//!
//! - regex metacharacters are matched literally,
//! - a whitespace run between words matches one or more whitespace characters
//!   (`&nbsp;` included), and any tags before, between or after them,
//! - characters HTML escapes (`& < > " '`) also match their entity forms, and a
//!   straight apostrophe matches a typographic one. A literal `<` only matches
//!   where it cannot start a tag, i.e. when the trigger does not continue with a
//!   letter, `/`, `!` or `?`,
//! - matching is case-insensitive.

use regex::Regex;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Trigger text is empty")]
    EmptyTrigger,
    #[error("Failed to compile trigger pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// Zero or more tags, one whitespace, then any mix of whitespace and tags.
const WORD_SEPARATOR: &str = r"(?:<[^>]*>)*(?:\s|&nbsp;|&#160;)(?:\s|&nbsp;|&#160;|<[^>]*>)*";

/// A compiled trigger.
#[derive(Debug, Clone)]
pub struct TriggerPattern {
    regex: Regex,
}

impl TriggerPattern {
    /// Leftmost match starting at or after byte offset `start`.
    pub fn find_at(&self, haystack: &str, start: usize) -> Option<Range<usize>> {
        self.regex.find_at(haystack, start).map(|m| m.range())
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Compiles trigger text into a pattern.
pub fn build_pattern(trigger: &str) -> Result<TriggerPattern, PatternError> {
    let source = pattern_source(trigger).ok_or(PatternError::EmptyTrigger)?;
    Ok(TriggerPattern {
        regex: Regex::new(&source)?,
    })
}

/// The regex source for a trigger, or `None` if the trigger has no words.
pub fn pattern_source(trigger: &str) -> Option<String> {
    let mut words = trigger.split(char::is_whitespace).filter(|w| !w.is_empty()).peekable();
    words.peek()?;

    let mut source = String::from("(?i)");
    for (i, word) in words.enumerate() {
        if i > 0 {
            source.push_str(WORD_SEPARATOR);
        }
        let mut chars = word.chars().peekable();
        while let Some(ch) = chars.next() {
            push_char(&mut source, ch, chars.peek().copied());
        }
    }
    Some(source)
}

/// `next` is the following character of the same word, `None` at a word end.
fn push_char(source: &mut String, ch: char, next: Option<char>) {
    match ch {
        '&' => source.push_str("(?:&amp;|&#38;|&)"),
        '<' if next.is_some_and(starts_tag) => source.push_str("(?:&lt;|&#60;)"),
        '<' => source.push_str("(?:&lt;|&#60;|<)"),
        '>' => source.push_str("(?:&gt;|&#62;|>)"),
        '"' => source.push_str("(?:&quot;|&#34;|\")"),
        '\'' | '\u{2019}' => source.push_str("(?:&#39;|&#x27;|&apos;|&rsquo;|'|\u{2019})"),
        _ => {
            let mut buf = [0u8; 4];
            source.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }
}

/// Characters that turn a preceding `<` into markup for the tag scanner.
fn starts_tag(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, '/' | '!' | '?')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched<'a>(trigger: &str, haystack: &'a str) -> Option<&'a str> {
        let pattern = build_pattern(trigger).unwrap();
        pattern.find_at(haystack, 0).map(|r| &haystack[r])
    }

    #[test]
    fn empty_trigger_is_rejected() {
        assert!(pattern_source("").is_none());
        assert!(pattern_source(" \t\n").is_none());
        assert!(matches!(build_pattern("  "), Err(PatternError::EmptyTrigger)));
    }

    #[test]
    fn metacharacters_match_literally() {
        assert_eq!(matched("(a+b)*?", "x (a+b)*? y"), Some("(a+b)*?"));
        assert_eq!(matched("1.5", "1x5 or 1.5"), Some("1.5"));
        assert_eq!(matched("[sic]", "s"), None);
    }

    #[test]
    fn whitespace_runs_are_flexible() {
        assert_eq!(matched("red giant", "a red \n\t giant"), Some("red \n\t giant"));
        assert_eq!(matched("red   giant", "a red giant"), Some("red giant"));
        assert_eq!(matched("red giant", "redgiant"), None);
        assert_eq!(matched("red giant", "red&nbsp;giant"), Some("red&nbsp;giant"));
    }

    #[test]
    fn tags_between_words_are_skipped() {
        assert_eq!(matched("red giant", "the <b>red</b> giant"), Some("red</b> giant"));
        assert_eq!(matched("red giant", "red <i class=\"x\">giant</i>"), Some("red <i class=\"x\">giant"));
        assert_eq!(matched("red giant", "red</b><i> \n</i>giant"), Some("red</b><i> \n</i>giant"));
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(matched("Estrella Muerta", "la ESTRELLA muerta"), Some("ESTRELLA muerta"));
        assert_eq!(matched("ÁRBOL", "el árbol"), Some("árbol"));
    }

    #[test]
    fn entities_match_their_characters() {
        assert_eq!(matched("Tom & Jerry", "Tom &amp; Jerry"), Some("Tom &amp; Jerry"));
        assert_eq!(matched("don't", "don&#39;t stop"), Some("don&#39;t"));
        assert_eq!(matched("don't", "don\u{2019}t stop"), Some("don\u{2019}t"));
        assert_eq!(matched("a<b", "a&lt;b"), Some("a&lt;b"));
    }

    #[test]
    fn literal_less_than_matches_only_outside_tags() {
        assert_eq!(matched("3 < 4", "<p>3 < 4 ok</p>"), Some("3 < 4"));
        assert_eq!(matched("x<2", "if x<2 then"), Some("x<2"));
        assert_eq!(matched("a<b", "a<b>bold</b>"), None);
        assert_eq!(matched("</p", "x</p>"), None);
    }

    #[test]
    fn find_at_respects_offset() {
        let pattern = build_pattern("star").unwrap();
        let hay = "star, star";
        assert_eq!(pattern.find_at(hay, 0), Some(0..4));
        assert_eq!(pattern.find_at(hay, 1), Some(6..10));
        assert!(pattern.is_match(hay));
        assert!(pattern.as_str().starts_with("(?i)"));
    }
}
