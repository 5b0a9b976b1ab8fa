//! Integration tests for the sync and dates passes
//!
//! These tests use wiremock to stand in for the repository API, the oEmbed
//! endpoint and linked pages, and run each pass end-to-end against a
//! catalog file in a temporary directory.

mod history_tests;
mod sync_tests;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use link_catalog::config::{load_config, Config};
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OWNER: &str = "octo";
pub const REPO: &str = "notes";

/// Writes a config pointing every collaborator at `server` and loads it
pub fn test_config(server: &MockServer, dir: &TempDir, extra: &str) -> Config {
    let catalog_path = dir.path().join("links-data.json");
    let content = format!(
        r#"
[source]
owner = "{owner}"
repo = "{repo}"
api-base = "{uri}"

[catalog]
path = "{catalog}"

[user-agent]
name = "CatalogTest"
version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[metadata]
oembed-endpoint = "{uri}/oembed"
thumbnail-base = "{uri}/vi"
request-timeout-secs = 5

[pacing]
link-delay-ms = 0
revision-delay-ms = 0
date-delay-ms = 0
{extra}
"#,
        owner = OWNER,
        repo = REPO,
        uri = server.uri(),
        catalog = catalog_path.display(),
        extra = extra,
    );

    let config_path = dir.path().join("catalog.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    load_config(&config_path).expect("Failed to load test config")
}

pub fn catalog_path(config: &Config) -> PathBuf {
    PathBuf::from(&config.catalog.path)
}

/// Reads the persisted catalog as raw JSON
pub fn read_catalog(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("Catalog file missing");
    serde_json::from_str(&text).expect("Catalog is not valid JSON")
}

/// Serves `text` as the tracked README through the contents endpoint
pub async fn mount_document(server: &MockServer, text: &str) {
    let encoded = STANDARD.encode(text);
    // The API wraps base64 content at 60 columns
    let wrapped: Vec<String> = encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/contents/README.md", OWNER, REPO)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "README.md",
            "content": wrapped.join("\n"),
            "encoding": "base64",
        })))
        .mount(server)
        .await;
}
