//! Link-Catalog: a persisted catalog of the links found in a README
//!
//! This crate keeps a JSON catalog of every hyperlink in a tracked markdown
//! document, enriched with metadata fetched from the linked resources and
//! annotated with the date each link first appeared in the document's
//! revision history.
//!
//! Two independent passes share the persisted catalog:
//! - the sync pass ([`sync`]) reconciles the catalog against the current
//!   document, resolving metadata only for unseen links;
//! - the dates pass ([`history`]) backfills `addedAt` from revision diffs.

pub mod catalog;
pub mod config;
pub mod history;
pub mod metadata;
pub mod output;
pub mod source;
pub mod sync;
pub mod url;

use thiserror::Error;

/// Main error type for Link-Catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Catalog store error: {0}")]
    Store(#[from] StoreError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No catalog found at {path}; run a sync first")]
    MissingCatalog { path: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised by the document and revision-history collaborators
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Malformed response from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    #[error("Failed to decode document content: {0}")]
    Decode(String),
}

/// Errors raised while loading or saving the catalog file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Result type alias for Link-Catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for collaborator calls
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type alias for catalog persistence
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// Re-export commonly used types
pub use catalog::{Catalog, Link, LinkKind};
pub use config::Config;
pub use crate::url::{classify_url, extract_links, extract_video_id};
