/// Checks if a host matches a wildcard pattern
///
/// Two pattern shapes are supported:
/// 1. Exact match: "youtu.be" matches only "youtu.be"
/// 2. Wildcard match: "*.youtube.com" matches the bare domain
///    ("youtube.com") and any subdomain ("www.youtube.com", "m.youtube.com")
///
/// Hosts should be lowercased before matching; comparison is exact.
///
/// # Examples
///
/// ```
/// use link_catalog::url::matches_wildcard;
///
/// assert!(matches_wildcard("youtu.be", "youtu.be"));
/// assert!(!matches_wildcard("youtu.be", "www.youtu.be"));
///
/// assert!(matches_wildcard("*.youtube.com", "youtube.com"));
/// assert!(matches_wildcard("*.youtube.com", "music.youtube.com"));
/// assert!(!matches_wildcard("*.youtube.com", "fakeyoutube.com"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            candidate == base
                || candidate
                    .strip_suffix(base)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => candidate == pattern,
    }
}
