//! Social-preview extraction from HTML
//!
//! Each field is read through an ordered list of strategies; the first one
//! yielding a non-empty value wins. This is best-effort scraping of
//! semi-structured markup, not a validation of the document.

use scraper::{Html, Selector};
use url::Url;

/// One place a preview value can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaStrategy {
    /// `<meta property="..." content="...">`
    Property(&'static str),
    /// `<meta name="..." content="...">`
    Name(&'static str),
    /// Text of the `<title>` element
    TitleTag,
}

pub const TITLE_STRATEGIES: &[MetaStrategy] = &[
    MetaStrategy::Property("og:title"),
    MetaStrategy::Name("og:title"),
    MetaStrategy::Name("twitter:title"),
    MetaStrategy::TitleTag,
];

pub const IMAGE_STRATEGIES: &[MetaStrategy] = &[
    MetaStrategy::Property("og:image"),
    MetaStrategy::Name("og:image"),
    MetaStrategy::Name("twitter:image"),
];

pub const DESCRIPTION_STRATEGIES: &[MetaStrategy] = &[
    MetaStrategy::Property("og:description"),
    MetaStrategy::Name("og:description"),
    MetaStrategy::Name("description"),
];

/// Preview fields extracted from a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagePreview {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Parses `html` and extracts title, image and description
///
/// Relative image references are resolved against `page_url`; images that
/// do not resolve to an http(s) URL are dropped.
///
/// # Example
///
/// ```
/// use link_catalog::metadata::parse_preview;
/// use url::Url;
///
/// let html = r#"<html><head>
///     <meta property="og:title" content="Rust">
///     <meta property="og:image" content="/logo.png">
///     <title>ignored</title>
/// </head></html>"#;
/// let page = Url::parse("https://www.rust-lang.org/").unwrap();
/// let preview = parse_preview(html, &page);
/// assert_eq!(preview.title.as_deref(), Some("Rust"));
/// assert_eq!(preview.image.as_deref(), Some("https://www.rust-lang.org/logo.png"));
/// ```
pub fn parse_preview(html: &str, page_url: &Url) -> PagePreview {
    let document = Html::parse_document(html);

    PagePreview {
        title: first_match(&document, TITLE_STRATEGIES),
        image: first_match(&document, IMAGE_STRATEGIES)
            .and_then(|raw| resolve_image_url(page_url, &raw)),
        description: first_match(&document, DESCRIPTION_STRATEGIES),
    }
}

/// Runs the strategies in order and returns the first non-empty value
pub fn first_match(document: &Html, strategies: &[MetaStrategy]) -> Option<String> {
    strategies
        .iter()
        .find_map(|strategy| apply_strategy(document, *strategy))
}

fn apply_strategy(document: &Html, strategy: MetaStrategy) -> Option<String> {
    let value = match strategy {
        MetaStrategy::Property(key) => meta_content(document, "property", key),
        MetaStrategy::Name(key) => meta_content(document, "name", key),
        MetaStrategy::TitleTag => {
            let selector = Selector::parse("title").ok()?;
            document
                .select(&selector)
                .next()
                .map(|element| element.text().collect::<String>())
        }
    }?;

    let value = collapse_whitespace(&value);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn meta_content(document: &Html, attribute: &str, key: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[{}="{}"][content]"#, attribute, key)).ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("content"))
        .find(|content| !content.trim().is_empty())
        .map(str::to_string)
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves an image reference against the page it was found on
pub fn resolve_image_url(page: &Url, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = Url::parse(trimmed).or_else(|_| page.join(trimmed)).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.com/articles/1").unwrap()
    }

    #[test]
    fn test_open_graph_tags() {
        let html = r#"<html><head>
            <meta property="og:title" content="Rust in Production">
            <meta property="og:image" content="https://cdn.example.com/card.png">
            <meta property="og:description" content="How teams ship Rust.">
            <title>Fallback Title</title>
        </head><body></body></html>"#;

        let preview = parse_preview(html, &page());
        assert_eq!(preview.title.as_deref(), Some("Rust in Production"));
        assert_eq!(preview.image.as_deref(), Some("https://cdn.example.com/card.png"));
        assert_eq!(preview.description.as_deref(), Some("How teams ship Rust."));
    }

    #[test]
    fn test_content_before_property() {
        let html = r#"<head><meta content="Reversed" property="og:title"></head>"#;
        let preview = parse_preview(html, &page());
        assert_eq!(preview.title.as_deref(), Some("Reversed"));
    }

    #[test]
    fn test_falls_back_to_title_tag_and_meta_description() {
        let html = r#"<html><head>
            <title>
                Plain   Title
            </title>
            <meta name="description" content="Standard description">
        </head></html>"#;

        let preview = parse_preview(html, &page());
        assert_eq!(preview.title.as_deref(), Some("Plain Title"));
        assert_eq!(preview.description.as_deref(), Some("Standard description"));
        assert_eq!(preview.image, None);
    }

    #[test]
    fn test_empty_og_value_falls_through() {
        let html = r#"<head>
            <meta property="og:title" content="   ">
            <title>Real Title</title>
        </head>"#;
        let preview = parse_preview(html, &page());
        assert_eq!(preview.title.as_deref(), Some("Real Title"));
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = r#"<head><meta property="og:title" content="Tom &amp; Jerry"></head>"#;
        let preview = parse_preview(html, &page());
        assert_eq!(preview.title.as_deref(), Some("Tom & Jerry"));
    }

    #[test]
    fn test_relative_image_is_resolved() {
        let html = r#"<head><meta property="og:image" content="../img/card.jpg"></head>"#;
        let preview = parse_preview(html, &page());
        assert_eq!(preview.image.as_deref(), Some("https://example.com/img/card.jpg"));
    }

    #[test]
    fn test_non_http_image_dropped() {
        assert_eq!(resolve_image_url(&page(), "data:image/png;base64,AAAA"), None);
        assert_eq!(resolve_image_url(&page(), "  "), None);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse_preview("", &page()), PagePreview::default());
    }
}
