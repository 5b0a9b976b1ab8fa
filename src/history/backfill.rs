//! Batch driver for the dates pass
//!
//! Walks the persisted catalog, resolves an introduction date for every
//! entry that needs one, and saves after each resolution so an interrupted
//! run keeps its progress.

use crate::catalog::CatalogStore;
use crate::history::resolver::HistoryDateResolver;
use crate::source::RevisionSource;
use crate::sync::{truncate_for_log, Pacer, ResolveQueue};
use crate::{CatalogError, Result};

/// Options for one backfill run
#[derive(Debug, Clone)]
pub struct BackfillOptions {
    /// Recompute dates previously recorded as fallbacks
    pub revisit_provisional: bool,

    /// Pause between consecutive URLs
    pub pacer: Pacer,
}

/// Counters describing one backfill run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    /// Catalog entries examined
    pub processed: usize,

    /// Entries left alone because their date was already final
    pub skipped: usize,

    /// Entries dated from a revision
    pub from_history: usize,

    /// Entries given a provisional fallback date
    pub provisional: usize,
}

impl BackfillReport {
    /// Entries whose `addedAt` was written this run
    pub fn updated(&self) -> usize {
        self.from_history + self.provisional
    }
}

/// Fills in `addedAt` for catalog entries that need it
///
/// # Errors
///
/// Returns `CatalogError::MissingCatalog` when nothing has been persisted
/// yet, and propagates store failures. Revision-source failures only
/// produce provisional dates.
pub async fn backfill_dates<R, S>(
    resolver: &HistoryDateResolver<R>,
    store: &S,
    options: &BackfillOptions,
) -> Result<BackfillReport>
where
    R: RevisionSource,
    S: CatalogStore,
{
    let mut catalog = store.load()?.ok_or_else(|| CatalogError::MissingCatalog {
        path: store.location(),
    })?;

    let mut report = BackfillReport {
        processed: catalog.len(),
        ..Default::default()
    };

    let pending: Vec<String> = catalog
        .iter()
        .filter(|link| link.needs_added_date(options.revisit_provisional))
        .map(|link| link.url.clone())
        .collect();
    report.skipped = catalog.len() - pending.len();

    tracing::info!(
        "Dating {} of {} links ({} already dated)",
        pending.len(),
        catalog.len(),
        report.skipped
    );

    let mut queue = ResolveQueue::new(pending);
    while let Some(task) = queue.next_task() {
        tracing::info!(
            "[{}/{}] Dating {}",
            task.position,
            queue.total(),
            truncate_for_log(&task.url)
        );

        let date = resolver.resolve_added_date(&task.url).await;
        let provisional = date.is_provisional();

        if let Some(link) = catalog.get_mut(&task.url) {
            link.record_added_at(date.at, provisional);
        }
        if provisional {
            report.provisional += 1;
            tracing::info!("  no introducing revision, using {}", date.at.to_rfc3339());
        } else {
            report.from_history += 1;
            tracing::info!("  added {}", date.at.to_rfc3339());
        }

        store.save(&catalog)?;

        if !queue.is_empty() {
            options.pacer.pause().await;
        }
    }

    tracing::info!(
        "Dates complete: {} processed, {} skipped, {} from history, {} provisional",
        report.processed,
        report.skipped,
        report.from_history,
        report.provisional
    );

    Ok(report)
}
