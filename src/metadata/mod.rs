//! Metadata module: turns a URL into a normalized catalog record
//!
//! This module contains:
//! - HTTP fetching behind the `PageFetcher` seam
//! - Social-preview extraction from HTML
//! - The resolver that classifies a URL and picks the video or website branch

mod fetcher;
mod html;
mod resolver;

pub use fetcher::{
    build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher, MAX_BODY_BYTES,
};
pub use html::{
    first_match, parse_preview, resolve_image_url, MetaStrategy, PagePreview,
    DESCRIPTION_STRATEGIES, IMAGE_STRATEGIES, TITLE_STRATEGIES,
};
pub use resolver::{
    oembed_url, thumbnail_url, watch_url, MetadataResolver, ResolverSettings,
    UNTITLED_PLACEHOLDER, VIDEO_PLACEHOLDER_TITLE,
};
