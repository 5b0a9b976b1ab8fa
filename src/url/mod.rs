//! URL handling module for Link-Catalog
//!
//! This module provides link extraction from document text, hostname
//! extraction, wildcard host matching, link classification and video
//! identifier extraction.

mod domain;
mod extract;
mod matcher;
mod video;

use crate::catalog::LinkKind;

// Re-export main functions
pub use domain::{extract_domain, hostname_of};
pub use extract::extract_links;
pub use matcher::matches_wildcard;
pub use video::{extract_video_id, VIDEO_ID_LEN};

/// Classifies a URL as a video or a generic website
///
/// A URL is a video when its (lowercased) host matches any of the
/// configured video host patterns. URLs that fail to parse are websites.
///
/// # Examples
///
/// ```
/// use link_catalog::catalog::LinkKind;
/// use link_catalog::url::classify_url;
///
/// let hosts = vec!["*.youtube.com".to_string(), "youtu.be".to_string()];
/// assert_eq!(classify_url("https://youtu.be/dQw4w9WgXcQ", &hosts), LinkKind::Video);
/// assert_eq!(classify_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ", &hosts), LinkKind::Video);
/// assert_eq!(classify_url("https://example.com/", &hosts), LinkKind::Website);
/// ```
pub fn classify_url(url: &str, video_hosts: &[String]) -> LinkKind {
    let Some(host) = hostname_of(url) else {
        return LinkKind::Website;
    };

    if video_hosts
        .iter()
        .any(|pattern| matches_wildcard(pattern, &host))
    {
        LinkKind::Video
    } else {
        LinkKind::Website
    }
}
