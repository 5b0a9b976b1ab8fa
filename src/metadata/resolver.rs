//! Metadata resolver
//!
//! Turns a single URL into a catalog record. Videos are identified by host
//! and described through an oEmbed lookup; everything else is fetched and
//! scraped for social-preview tags. Failures degrade to fallback records.

use crate::catalog::{Link, LinkKind};
use crate::config::MetadataConfig;
use crate::metadata::fetcher::{FetchResult, PageFetcher};
use crate::metadata::html::parse_preview;
use crate::url::{classify_url, extract_video_id, hostname_of};
use chrono::Utc;
use serde::Deserialize;
use url::Url;

/// Title used when a video's oEmbed lookup fails
pub const VIDEO_PLACEHOLDER_TITLE: &str = "YouTube Video";

/// Title used when a website URL has no parseable hostname
pub const UNTITLED_PLACEHOLDER: &str = "Untitled";

/// Settings for the resolver, taken from `[metadata]`
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub oembed_endpoint: String,
    pub thumbnail_base: String,
    pub video_hosts: Vec<String>,
}

impl From<&MetadataConfig> for ResolverSettings {
    fn from(config: &MetadataConfig) -> Self {
        Self {
            oembed_endpoint: config.oembed_endpoint.clone(),
            thumbnail_base: config.thumbnail_base.clone(),
            video_hosts: config.video_hosts.clone(),
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from(&MetadataConfig::default())
    }
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
    author_name: Option<String>,
}

/// Resolves URLs into catalog records
pub struct MetadataResolver<F> {
    fetcher: F,
    settings: ResolverSettings,
}

impl<F: PageFetcher> MetadataResolver<F> {
    pub fn new(fetcher: F, settings: ResolverSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Resolves `url` into a record
    ///
    /// Returns `None` only for video URLs without an extractable
    /// identifier. Every other outcome, including network failures, yields
    /// a record stamped with the resolution time.
    pub async fn resolve(&self, url: &str) -> Option<Link> {
        match classify_url(url, &self.settings.video_hosts) {
            LinkKind::Video => self.resolve_video(url).await,
            LinkKind::Website => Some(self.resolve_website(url).await),
        }
    }

    async fn resolve_video(&self, url: &str) -> Option<Link> {
        let Some(video_id) = extract_video_id(url) else {
            tracing::debug!("No video identifier in {}, skipping", url);
            return None;
        };

        let thumbnail = thumbnail_url(&self.settings.thumbnail_base, &video_id);
        let (title, author) = match self.lookup_video(&video_id).await {
            Some(found) => found,
            None => (VIDEO_PLACEHOLDER_TITLE.to_string(), None),
        };

        Some(Link::video(url, title, thumbnail, author, Utc::now()))
    }

    /// oEmbed lookup; `None` on any transport or payload failure
    async fn lookup_video(&self, video_id: &str) -> Option<(String, Option<String>)> {
        let endpoint = oembed_url(&self.settings.oembed_endpoint, video_id)?;

        let body = match self.fetcher.fetch(&endpoint).await {
            FetchResult::Success { body, .. } => body,
            failed => {
                tracing::warn!(
                    "oEmbed lookup failed for {}: {}",
                    video_id,
                    failed.failure_reason().unwrap_or_default()
                );
                return None;
            }
        };

        let parsed: OEmbedResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Malformed oEmbed response for {}: {}", video_id, e);
                return None;
            }
        };

        let title = parsed
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| VIDEO_PLACEHOLDER_TITLE.to_string());
        let author = parsed
            .author_name
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        Some((title, author))
    }

    async fn resolve_website(&self, url: &str) -> Link {
        let fallback_title = hostname_of(url).unwrap_or_else(|| UNTITLED_PLACEHOLDER.to_string());

        let (body, final_url) = match self.fetcher.fetch(url).await {
            FetchResult::Success {
                body, final_url, ..
            } if !body.trim().is_empty() => (body, final_url),
            FetchResult::Success { .. } => {
                tracing::warn!("Empty page at {}, using hostname", url);
                return Link::website(url, fallback_title, None, None, Utc::now());
            }
            failed => {
                tracing::warn!(
                    "Fetch failed for {}: {}, using hostname",
                    url,
                    failed.failure_reason().unwrap_or_default()
                );
                return Link::website(url, fallback_title, None, None, Utc::now());
            }
        };

        let preview = match Url::parse(&final_url).or_else(|_| Url::parse(url)) {
            Ok(base) => parse_preview(&body, &base),
            Err(_) => Default::default(),
        };

        Link::website(
            url,
            preview.title.unwrap_or(fallback_title),
            preview.image,
            preview.description,
            Utc::now(),
        )
    }
}

/// Thumbnail path for a video identifier: `{base}/{id}/maxresdefault.jpg`
pub fn thumbnail_url(base: &str, video_id: &str) -> String {
    format!("{}/{}/maxresdefault.jpg", base.trim_end_matches('/'), video_id)
}

/// Canonical watch URL for a video identifier
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// oEmbed request URL for a video identifier
pub fn oembed_url(endpoint: &str, video_id: &str) -> Option<String> {
    Url::parse_with_params(
        endpoint,
        &[("url", watch_url(video_id).as_str()), ("format", "json")],
    )
    .ok()
    .map(|url| url.to_string())
}
