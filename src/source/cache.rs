//! Run-scoped memoization of revision lookups
//!
//! The dates pass scans the same revision window once per URL. Wrapping the
//! revision source in `CachingRevisionSource` turns repeated scans into
//! memory reads. Only successful responses are remembered, so a failed
//! lookup is retried the next time it is needed.

use crate::source::types::{ChangedFile, Revision, RevisionSource};
use crate::SourceResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct CachingRevisionSource<S> {
    inner: S,
    revisions: Mutex<HashMap<String, Vec<Revision>>>,
    files: Mutex<HashMap<String, Vec<ChangedFile>>>,
}

impl<S: RevisionSource> CachingRevisionSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            revisions: Mutex::new(HashMap::new()),
            files: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<S: RevisionSource> RevisionSource for CachingRevisionSource<S> {
    async fn list_revisions(&self, path: &str) -> SourceResult<Vec<Revision>> {
        if let Some(hit) = self
            .revisions
            .lock()
            .ok()
            .and_then(|cache| cache.get(path).cloned())
        {
            return Ok(hit);
        }

        let fetched = self.inner.list_revisions(path).await?;
        if let Ok(mut cache) = self.revisions.lock() {
            cache.insert(path.to_string(), fetched.clone());
        }
        Ok(fetched)
    }

    async fn revision_files(&self, id: &str) -> SourceResult<Vec<ChangedFile>> {
        if let Some(hit) = self
            .files
            .lock()
            .ok()
            .and_then(|cache| cache.get(id).cloned())
        {
            tracing::trace!("Revision {} served from cache", id);
            return Ok(hit);
        }

        let fetched = self.inner.revision_files(id).await?;
        if let Ok(mut cache) = self.files.lock() {
            cache.insert(id.to_string(), fetched.clone());
        }
        Ok(fetched)
    }

    fn has_cached_files(&self, id: &str) -> bool {
        self.files
            .lock()
            .map(|files| files.contains_key(id))
            .unwrap_or(false)
    }
}
