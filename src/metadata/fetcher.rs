//! HTTP fetcher for metadata resolution
//!
//! This module handles the outbound requests made while resolving link
//! metadata:
//! - Building the HTTP client with the configured user agent
//! - GET requests returning status and body text, capped at a byte limit
//! - Error classification (HTTP status vs. network failure)
//!
//! No retries are made here; callers substitute fallback data instead.

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, Response};
use std::time::Duration;

/// Bytes of a response body kept for parsing; preview tags live in `<head>`
pub const MAX_BODY_BYTES: usize = 512 * 1024;

/// Result of a fetch operation
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Received a 2xx response
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Response body as text
        body: String,
    },

    /// Received a non-2xx response
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Short description of a failed fetch, for log lines
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Seam over the generic page fetch used by the metadata resolver
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its status and body text
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Example
///
/// ```no_run
/// use link_catalog::config::UserAgentConfig;
/// use link_catalog::metadata::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     name: "LinkCatalog".to_string(),
///     version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url, self.max_body_bytes).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// At most `max_body_bytes` of the body are read; the rest is dropped
/// unread and the kept prefix is decoded as lossy UTF-8.
pub async fn fetch_url(client: &Client, url: &str, max_body_bytes: usize) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match read_capped(response, max_body_bytes).await {
        Ok(bytes) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

async fn read_capped(mut response: Response, limit: usize) -> Result<Vec<u8>, reqwest::Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - bytes.len();
        if chunk.len() >= room {
            bytes.extend_from_slice(&chunk[..room]);
            tracing::debug!("Body of {} truncated at {} bytes", response.url(), limit);
            break;
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}
