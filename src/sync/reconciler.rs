//! Catalog reconciler - merges the current document's links into the catalog
//!
//! For each run:
//! 1. Extract the current link set from the document text
//! 2. Queue every link not already in the catalog
//! 3. Resolve queued links one at a time, pausing between resolutions
//! 4. Prune entries whose URL no longer appears in the document
//!
//! Known URLs are never re-resolved; repairing an entry requires deleting it.

use crate::catalog::Catalog;
use crate::metadata::{MetadataResolver, PageFetcher};
use crate::sync::scheduler::{Pacer, ResolveQueue};
use crate::url::extract_links;
use std::collections::HashSet;
use std::convert::Infallible;

/// Counters describing one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Distinct links found in the document
    pub extracted: usize,

    /// Links that were not yet in the catalog
    pub new_links: usize,

    /// New links that produced a record and were inserted
    pub inserted: usize,

    /// New links the resolver declined (video URLs without an identifier)
    pub skipped: Vec<String>,

    /// Catalog entries removed because their URL left the document
    pub removed: Vec<String>,
}

impl ReconcileReport {
    /// Returns true if the run changed the catalog
    pub fn changed(&self) -> bool {
        self.inserted > 0 || !self.removed.is_empty()
    }
}

/// Drives link extraction and metadata resolution against a catalog
pub struct Reconciler<F> {
    resolver: MetadataResolver<F>,
    pacer: Pacer,
}

impl<F: PageFetcher> Reconciler<F> {
    pub fn new(resolver: MetadataResolver<F>, pacer: Pacer) -> Self {
        Self { resolver, pacer }
    }

    /// Reconciles `catalog` against `document_text`
    pub async fn reconcile(
        &self,
        document_text: &str,
        catalog: Catalog,
    ) -> (Catalog, ReconcileReport) {
        match self
            .reconcile_with(document_text, catalog, |_| Ok::<(), Infallible>(()))
            .await
        {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }

    /// Reconciles and calls `checkpoint` after every inserted link
    ///
    /// The checkpoint sees the catalog before pruning; callers persist the
    /// returned catalog once more after this returns. A checkpoint error
    /// aborts the run.
    pub async fn reconcile_with<C, E>(
        &self,
        document_text: &str,
        mut catalog: Catalog,
        mut checkpoint: C,
    ) -> Result<(Catalog, ReconcileReport), E>
    where
        C: FnMut(&Catalog) -> Result<(), E>,
    {
        let links = extract_links(document_text);
        let mut report = ReconcileReport {
            extracted: links.len(),
            ..Default::default()
        };

        let new_links: Vec<String> = links
            .iter()
            .filter(|url| !catalog.contains(url))
            .cloned()
            .collect();
        report.new_links = new_links.len();

        tracing::info!(
            "Found {} links, {} new, {} already cataloged",
            links.len(),
            new_links.len(),
            links.len() - new_links.len()
        );

        let mut queue = ResolveQueue::new(new_links);
        while let Some(task) = queue.next_task() {
            tracing::info!(
                "[{}/{}] Resolving {}",
                task.position,
                queue.total(),
                truncate_for_log(&task.url)
            );

            match self.resolver.resolve(&task.url).await {
                Some(link) => {
                    tracing::debug!("Resolved {} as {}: {}", task.url, link.kind, link.title);
                    catalog.insert(link);
                    report.inserted += 1;
                    checkpoint(&catalog)?;
                }
                None => {
                    tracing::info!("Skipping {} (no video identifier)", task.url);
                    report.skipped.push(task.url);
                }
            }

            if !queue.is_empty() {
                self.pacer.pause().await;
            }
        }

        let current: HashSet<&str> = links.iter().map(String::as_str).collect();
        report.removed = catalog.retain_urls(&current);
        for url in &report.removed {
            tracing::info!("Removed {} (no longer in document)", truncate_for_log(url));
        }

        Ok((catalog, report))
    }
}

/// Shortens long URLs for progress lines
pub fn truncate_for_log(url: &str) -> String {
    const MAX: usize = 60;
    if url.chars().count() <= MAX {
        url.to_string()
    } else {
        format!("{}...", url.chars().take(MAX).collect::<String>())
    }
}
