//! REST client for the document and revision-history collaborators
//!
//! Endpoints used:
//! - `GET /repos/{owner}/{repo}/contents/{path}` → base64 document content
//! - `GET /repos/{owner}/{repo}/commits?path=..&per_page=..` → revisions, newest first
//! - `GET /repos/{owner}/{repo}/commits/{sha}` → changed files with patches

use crate::config::SourceConfig;
use crate::source::types::{ChangedFile, DocumentSource, Revision, RevisionSource};
use crate::{SourceError, SourceResult};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const RATE_LIMIT_HEADER: &str = "x-ratelimit-remaining";

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitSummary {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<GitActor>,
    committer: Option<GitActor>,
}

#[derive(Debug, Deserialize)]
struct GitActor {
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CommitWithFiles {
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    filename: String,
    #[serde(default)]
    patch: Option<String>,
}

/// Client for a GitHub-compatible REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    branch: Option<String>,
    per_page: u32,
}

impl GitHubClient {
    pub fn new(client: Client, source: &SourceConfig, per_page: u32) -> Self {
        Self {
            client,
            api_base: source.api_base.trim_end_matches('/').to_string(),
            owner: source.owner.clone(),
            repo: source.repo.clone(),
            branch: source.branch.clone(),
            per_page,
        }
    }

    fn repo_url(&self, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base,
            self.owner,
            self.repo,
            suffix.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> SourceResult<T> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .query(query)
            .send()
            .await
            .map_err(|source| SourceError::Http {
                url: url.to_string(),
                source,
            })?;

        if let Some(remaining) = response
            .headers()
            .get(RATE_LIMIT_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            tracing::debug!("API calls remaining: {}", remaining);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| SourceError::Json {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DocumentSource for GitHubClient {
    async fn fetch_document(&self, path: &str) -> SourceResult<String> {
        let url = self.repo_url(&format!("contents/{}", path.trim_start_matches('/')));
        let mut query = Vec::new();
        if let Some(branch) = &self.branch {
            query.push(("ref", branch.clone()));
        }

        let response: ContentResponse = self.get_json(&url, &query).await?;
        if let Some(encoding) = response.encoding.as_deref() {
            if encoding != "base64" {
                return Err(SourceError::Decode(format!(
                    "unsupported content encoding '{}'",
                    encoding
                )));
            }
        }

        decode_content(&response.content)
    }
}

#[async_trait]
impl RevisionSource for GitHubClient {
    async fn list_revisions(&self, path: &str) -> SourceResult<Vec<Revision>> {
        let url = self.repo_url("commits");
        let mut query = vec![
            ("path", path.trim_start_matches('/').to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(branch) = &self.branch {
            query.push(("sha", branch.clone()));
        }

        let commits: Vec<CommitSummary> = self.get_json(&url, &query).await?;

        let revisions = commits
            .into_iter()
            .filter_map(|c| {
                let date = c.commit.author.or(c.commit.committer).map(|a| a.date);
                if date.is_none() {
                    tracing::warn!("Revision {} has no timestamp, ignoring", c.sha);
                }
                date.map(|authored_at| Revision {
                    id: c.sha,
                    authored_at,
                })
            })
            .collect();

        Ok(revisions)
    }

    async fn revision_files(&self, id: &str) -> SourceResult<Vec<ChangedFile>> {
        let url = self.repo_url(&format!("commits/{}", id));
        let commit: CommitWithFiles = self.get_json(&url, &[]).await?;

        Ok(commit
            .files
            .into_iter()
            .map(|f| ChangedFile {
                filename: f.filename,
                patch: f.patch,
            })
            .collect())
    }
}

/// Decodes base64 document content as UTF-8 text
///
/// The API wraps the encoded payload at 60 columns, so whitespace is
/// stripped before decoding.
///
/// # Example
///
/// ```
/// use link_catalog::source::decode_content;
///
/// assert_eq!(decode_content("aGVsbG8g\nd29ybGQ=\n").unwrap(), "hello world");
/// ```
pub fn decode_content(encoded: &str) -> SourceResult<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| SourceError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SourceError::Decode(e.to_string()))
}
