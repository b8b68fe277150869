/// Number of lines `text` occupies when greedily word-wrapped at `max_chars`
/// characters per line.
///
/// Words are separated by whitespace and joined by a single space. A word
/// longer than a line is broken across as many lines as it needs. Text with no
/// words occupies zero lines.
pub fn count_lines(text: &str, max_chars: usize) -> usize {
    let max_chars = max_chars.max(1);
    let mut lines = 0;
    let mut used = 0;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        if used > 0 && used + 1 + len <= max_chars {
            used += 1 + len;
            continue;
        }
        if used > 0 {
            lines += 1;
        }
        let full = (len - 1) / max_chars;
        lines += full;
        used = len - full * max_chars;
    }

    if used > 0 {
        lines += 1;
    }
    lines
}
