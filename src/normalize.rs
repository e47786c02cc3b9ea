use once_cell::sync::Lazy;
use regex::Regex;

// Permissive on purpose: unbalanced or malformed tags still match and the
// text between them survives.
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<]+?>").unwrap());

/// Strips storage-format markup down to plain text: every tag becomes a
/// single space, newlines become spaces, and the ends are trimmed. Internal
/// whitespace runs are left alone.
pub fn strip_markup(html: &str) -> String {
    TAG.replace_all(html, " ").replace('\n', " ").trim().to_string()
}

/// Truncates to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_become_single_spaces() {
        // trim only, no internal collapse
        assert_eq!(strip_markup("<p>Hello <b>world</b></p>"), "Hello  world");
    }

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(strip_markup("line one\nline two"), "line one line two");
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(strip_markup("  already plain  "), "already plain");
    }

    #[test]
    fn malformed_markup_degrades_gracefully() {
        assert_eq!(strip_markup("<p>unclosed <b>bold"), "unclosed  bold");
        // the permissive pattern also eats bare angle-bracket spans
        assert_eq!(strip_markup("a < b and c > d"), "a   d");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }
}
