//! Sync module: keeps the catalog in step with the tracked document
//!
//! This module contains the reconciliation pass:
//! - Fetching the current document text
//! - Extracting links and resolving metadata for unseen ones
//! - Pruning entries whose links were removed
//! - Persisting after every inserted link and once at the end

mod reconciler;
mod scheduler;

pub use reconciler::{truncate_for_log, ReconcileReport, Reconciler};
pub use scheduler::{Pacer, ResolveQueue, ResolveTask};

use crate::catalog::{CatalogStore, JsonCatalogStore};
use crate::config::Config;
use crate::metadata::{
    build_http_client, HttpFetcher, MetadataResolver, PageFetcher, ResolverSettings,
};
use crate::source::{DocumentSource, GitHubClient};
use crate::CatalogError;
use std::time::Duration;

/// Runs one sync pass against the given collaborators
///
/// # Errors
///
/// Failing to fetch the document is fatal, as is any catalog load or save
/// failure. Per-link metadata failures never surface here.
pub async fn sync_catalog<D, F, S>(
    source: &D,
    document_path: &str,
    reconciler: &Reconciler<F>,
    store: &S,
) -> Result<ReconcileReport, CatalogError>
where
    D: DocumentSource,
    F: PageFetcher,
    S: CatalogStore,
{
    let text = source.fetch_document(document_path).await?;
    tracing::debug!("Fetched {} ({} bytes)", document_path, text.len());

    let catalog = match store.load()? {
        Some(catalog) => {
            tracing::info!("Loaded {} links from {}", catalog.len(), store.location());
            catalog
        }
        None => {
            tracing::info!("No catalog at {}, starting fresh", store.location());
            Default::default()
        }
    };

    let (catalog, report) = reconciler
        .reconcile_with(&text, catalog, |snapshot| store.save(snapshot))
        .await?;
    store.save(&catalog)?;

    tracing::info!(
        "Sync complete: {} links in document, {} added, {} skipped, {} removed, {} in catalog",
        report.extracted,
        report.inserted,
        report.skipped.len(),
        report.removed.len(),
        catalog.len()
    );

    Ok(report)
}

/// Runs the sync pass with production collaborators built from `config`
pub async fn run_sync(config: &Config) -> Result<ReconcileReport, CatalogError> {
    let client = build_http_client(
        &config.user_agent,
        Duration::from_secs(config.metadata.request_timeout_secs),
    )?;

    let source = GitHubClient::new(client.clone(), &config.source, config.history.per_page);
    let resolver = MetadataResolver::new(
        HttpFetcher::new(client),
        ResolverSettings::from(&config.metadata),
    );
    let reconciler = Reconciler::new(resolver, Pacer::from_millis(config.pacing.link_delay_ms));
    let store = JsonCatalogStore::new(&config.catalog.path);

    sync_catalog(&source, &config.source.path, &reconciler, &store).await
}
