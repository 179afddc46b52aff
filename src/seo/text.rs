//! Text helpers shared by the generators.
//!
//! All lengths are counted in Unicode scalar values (`char`s).

use regex::Regex;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Shorten to at most `max` chars, ending with `...` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let keep = max.saturating_sub(3);
    let head: String = text.chars().take(keep).collect();
    format!("{}...", head.trim_end())
}

/// Cut to at most `max` chars, no ellipsis.
pub fn hard_truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Remove HTML tags and collapse whitespace.
pub fn strip_html(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Drop empty and repeated entries, keeping first-seen order.
///
/// Entries are trimmed; comparison is exact, so `"dominica"` and
/// `"Dominica"` are both kept.
pub fn dedupe_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::<String>::new();
    for keyword in keywords {
        let keyword = keyword.as_ref().trim();
        if !keyword.is_empty() && !out.iter().any(|k| k == keyword) {
            out.push(keyword.to_owned());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("hello world again", 10), "hello w...");
        assert_eq!(truncate("hello world again", 10).chars().count(), 10);
        // trailing space before the ellipsis is trimmed
        assert_eq!(truncate("abcd efghij", 8), "abcd...");
    }

    #[test]
    fn test_truncate_counts_chars() {
        let text = "Soufrière Soufrière Soufrière";
        let cut = truncate(text, 12);
        assert_eq!(cut.chars().count(), 12);
        assert_eq!(cut, "Soufrière...");
    }

    #[test]
    fn test_hard_truncate() {
        assert_eq!(hard_truncate("abcdef", 3), "abc");
        assert_eq!(hard_truncate("ab", 3), "ab");
        assert_eq!(hard_truncate("éèê", 2), "éè");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Heavy <b>rain</b> in\n Roseau</p><p>today</p>"),
            "Heavy rain in Roseau today"
        );
        assert_eq!(word_count(&strip_html("<p>one two</p><br/>three")), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_dedupe_keywords() {
        let out = dedupe_keywords(["Dominica", " Dominica ", "", "Weather", "Roseau", "Weather"]);
        assert_eq!(out, vec!["Dominica", "Weather", "Roseau"]);
    }

    #[test]
    fn test_dedupe_keywords_is_case_sensitive() {
        let out = dedupe_keywords(["Dominica", "dominica", "DOMINICA"]);
        assert_eq!(out, vec!["Dominica", "dominica", "DOMINICA"]);
    }
}
