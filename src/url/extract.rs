use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Absolute http(s) URL up to the first whitespace or close-paren
const URL_PATTERN: &str = r"https?://[^\s)]+";

/// Characters left behind by prose or markdown around a link
const TRAILING_PUNCTUATION: &[char] = &[',', ';', '.', ')'];

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"))
}

/// Extracts candidate links from raw document text
///
/// Matches `http://` or `https://` followed by any run of characters other
/// than whitespace and `)`, strips trailing `,` `;` `.` `)` and removes
/// duplicates while keeping first-seen order. Matches that are nothing but
/// a scheme once trimmed are dropped.
///
/// # Examples
///
/// ```
/// use link_catalog::url::extract_links;
///
/// let links = extract_links("See [docs](https://docs.rs). Also https://crates.io, https://docs.rs");
/// assert_eq!(links, vec!["https://docs.rs", "https://crates.io"]);
/// ```
pub fn extract_links(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for m in url_regex().find_iter(text) {
        let trimmed = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if trimmed.ends_with("://") {
            continue;
        }
        if seen.insert(trimmed) {
            links.push(trimmed.to_string());
        }
    }

    links
}
