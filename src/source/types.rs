use crate::SourceResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A single historical revision of the tracked document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// Revision identifier (commit sha)
    pub id: String,

    /// Authorship timestamp
    pub authored_at: DateTime<Utc>,
}

/// One file touched by a revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub filename: String,

    /// Unified-diff hunk body; absent for binary or oversized changes
    pub patch: Option<String>,
}

impl ChangedFile {
    /// Lines the patch marks as added, without their `+` marker
    ///
    /// File header lines (`+++ b/...`) are not additions and are skipped.
    pub fn added_lines(&self) -> impl Iterator<Item = &str> {
        self.patch
            .as_deref()
            .unwrap_or_default()
            .lines()
            .filter(|line| !line.starts_with("+++"))
            .filter_map(|line| line.strip_prefix('+'))
    }

    /// Returns true if an added line contains `needle` literally
    pub fn adds_text(&self, needle: &str) -> bool {
        self.added_lines().any(|line| line.contains(needle))
    }
}

/// Provides the current content of a document
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Returns the decoded text of the document at `path`
    async fn fetch_document(&self, path: &str) -> SourceResult<String>;
}

/// Provides the revision history of a document
#[async_trait]
pub trait RevisionSource: Send + Sync {
    /// Revisions touching `path`, newest first, bounded by the page size
    async fn list_revisions(&self, path: &str) -> SourceResult<Vec<Revision>>;

    /// Files changed by revision `id`, with their patches
    async fn revision_files(&self, id: &str) -> SourceResult<Vec<ChangedFile>>;

    /// Returns true if `revision_files(id)` will be answered without a
    /// network round-trip
    fn has_cached_files(&self, _id: &str) -> bool {
        false
    }
}
