//! Plain-text helpers for embed content.

use scraper::Html;

/// Strip markup from a fragment and decode HTML entities, returning the
/// text content.
#[must_use]
pub fn strip_markup(input: &str) -> String {
    let fragment = Html::parse_fragment(input);
    let text: String = fragment.root_element().text().collect();
    text.trim().to_string()
}

/// Truncate to at most `limit` words, appending `more` when anything was
/// cut. Runs of whitespace collapse to single spaces.
#[must_use]
pub fn trim_words(input: &str, limit: usize, more: &str) -> String {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.len() <= limit {
        words.join(" ")
    } else {
        let mut out = words[..limit].join(" ");
        out.push_str(more);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup_removes_tags() {
        assert_eq!(strip_markup("<p>Hello <em>world</em></p>"), "Hello world");
    }

    #[test]
    fn test_strip_markup_decodes_entities() {
        assert_eq!(strip_markup("Fish &amp; Chips &ndash; a review"), "Fish & Chips \u{2013} a review");
    }

    #[test]
    fn test_strip_markup_plain_text_unchanged() {
        assert_eq!(strip_markup("just text"), "just text");
    }

    #[test]
    fn test_trim_words_under_limit() {
        assert_eq!(trim_words("one two three", 5, " ..."), "one two three");
    }

    #[test]
    fn test_trim_words_over_limit() {
        assert_eq!(trim_words("one two three four", 2, " ..."), "one two ...");
    }

    #[test]
    fn test_trim_words_collapses_whitespace() {
        assert_eq!(trim_words("one\n two   three", 5, " ..."), "one two three");
    }
}
