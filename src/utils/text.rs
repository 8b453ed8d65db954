use once_cell::sync::Lazy;
use regex::Regex;

static BREAK_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("break tag regex"));
static HTML_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("html tag regex"));
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Replaces `<br>` variants and line breaks with single spaces.
pub fn normalize_line_breaks(value: &str) -> String {
    let replaced = BREAK_TAGS.replace_all(value, " ");
    replaced.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Plain-text rendering of a short HTML fragment: tags dropped, entities decoded,
/// whitespace collapsed and trimmed.
pub fn html_to_text(value: &str) -> String {
    let without_breaks = normalize_line_breaks(value);
    let stripped = HTML_TAGS.replace_all(&without_breaks, "");
    let decoded = decode_basic_entities(&stripped);
    WHITESPACE_RUNS
        .replace_all(&decoded, " ")
        .trim()
        .to_string()
}

fn decode_basic_entities(value: &str) -> String {
    value
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
