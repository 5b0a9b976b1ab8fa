use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use link_catalog::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses `raw` and returns its lowercase hostname
///
/// Returns `None` when the string is not an absolute URL with a host.
pub fn hostname_of(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    extract_domain(&url).filter(|host| !host.is_empty())
}
