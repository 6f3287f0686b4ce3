//! Plain-text helpers for HTML section bodies
//!
//! Section content is raw HTML. Nothing here renders or sanitizes it; tags
//! are only removed so the text can be matched and excerpted.

use std::sync::LazyLock;

use regex::Regex;

/// Marker appended to every excerpt
pub const ELLIPSIS: &str = "...";

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Remove every `<...>` tag from an HTML fragment
///
/// Entities such as `&amp;` are left as they are.
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Take the first `max_chars` characters of `text` and append [`ELLIPSIS`]
///
/// The cut is made on a character boundary, never inside a multi-byte
/// character. The marker is appended even when nothing was cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let end = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(idx, _)| idx);
    let mut out = String::with_capacity(end + ELLIPSIS.len());
    out.push_str(&text[..end]);
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<p>A closure captures <code>variables</code>.</p>"),
            "A closure captures variables."
        );
        assert_eq!(strip_tags("no tags"), "no tags");
        assert_eq!(strip_tags("a &amp; b<br/>"), "a &amp; b");
    }

    #[test]
    fn test_strip_tags_unclosed_bracket_is_kept() {
        assert_eq!(strip_tags("1 < 2 and 3"), "1 < 2 and 3");
    }

    #[test]
    fn test_excerpt_short_text_keeps_marker() {
        assert_eq!(excerpt("short", 200), "short...");
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let text = "é".repeat(10);
        let cut = excerpt(&text, 4);
        assert_eq!(cut, "éééé...");
    }

    #[test]
    fn test_excerpt_exact_length() {
        let text = "x".repeat(150);
        let cut = excerpt(&text, 150);
        assert_eq!(cut.len(), 153);
    }
}
