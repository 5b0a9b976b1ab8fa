use serde::Deserialize;

/// Main configuration structure for Link-Catalog
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Location of the tracked document
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Repository owner (user or organisation)
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Path of the tracked document inside the repository
    #[serde(default = "default_document_path")]
    pub path: String,

    /// Base URL of the REST API
    #[serde(rename = "api-base", default = "default_api_base")]
    pub api_base: String,

    /// Branch to read from (repository default branch when unset)
    #[serde(default)]
    pub branch: Option<String>,
}

/// Persisted catalog location
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to the JSON catalog file
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,

    /// URL with information about the tool
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.name, self.version, self.contact_url, self.contact_email
        )
    }
}

/// Metadata resolution settings
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    #[serde(rename = "oembed-endpoint", default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,

    /// Base URL for video thumbnails; `{base}/{id}/maxresdefault.jpg`
    #[serde(rename = "thumbnail-base", default = "default_thumbnail_base")]
    pub thumbnail_base: String,

    /// Host patterns (e.g. "youtu.be" or "*.youtube.com") classified as video
    #[serde(rename = "video-hosts", default = "default_video_hosts")]
    pub video_hosts: Vec<String>,

    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            oembed_endpoint: default_oembed_endpoint(),
            thumbnail_base: default_thumbnail_base(),
            video_hosts: default_video_hosts(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Fixed delays used as a crude rate-limit guard (milliseconds)
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Pause after each metadata resolution in the sync pass
    #[serde(rename = "link-delay-ms", default = "default_link_delay_ms")]
    pub link_delay_ms: u64,

    /// Pause after each per-revision diff lookup
    #[serde(rename = "revision-delay-ms", default = "default_revision_delay_ms")]
    pub revision_delay_ms: u64,

    /// Pause after each URL handled by the dates pass
    #[serde(rename = "date-delay-ms", default = "default_date_delay_ms")]
    pub date_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            link_delay_ms: default_link_delay_ms(),
            revision_delay_ms: default_revision_delay_ms(),
            date_delay_ms: default_date_delay_ms(),
        }
    }
}

/// Revision-history scanning settings
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Size of the revision window fetched per URL (API maximum is 100)
    #[serde(rename = "per-page", default = "default_per_page")]
    pub per_page: u32,

    /// Re-scan entries whose `addedAt` is a wall-clock fallback
    #[serde(rename = "revisit-provisional", default = "default_true")]
    pub revisit_provisional: bool,

    /// Memoize revision lists and diffs for the duration of a run
    #[serde(rename = "cache-revisions", default = "default_true")]
    pub cache_revisions: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            revisit_provisional: true,
            cache_revisions: true,
        }
    }
}

fn default_document_path() -> String {
    "README.md".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_catalog_path() -> String {
    "links-data.json".to_string()
}

fn default_oembed_endpoint() -> String {
    "https://www.youtube.com/oembed".to_string()
}

fn default_thumbnail_base() -> String {
    "https://i.ytimg.com/vi".to_string()
}

fn default_video_hosts() -> Vec<String> {
    vec!["*.youtube.com".to_string(), "youtu.be".to_string()]
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_link_delay_ms() -> u64 {
    1000
}

fn default_revision_delay_ms() -> u64 {
    100
}

fn default_date_delay_ms() -> u64 {
    1000
}

fn default_per_page() -> u32 {
    100
}

fn default_true() -> bool {
    true
}
