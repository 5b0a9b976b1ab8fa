//! History module: dates each catalog entry from the document's revisions
//!
//! This module contains:
//! - The per-URL scan over revision diffs (`HistoryDateResolver`)
//! - The scan state machine used while walking revisions
//! - The batch driver that backfills `addedAt` across the catalog

mod backfill;
mod resolver;
mod scan_state;

pub use backfill::{backfill_dates, BackfillOptions, BackfillReport};
pub use resolver::{AddedDate, DateOrigin, HistoryDateResolver};
pub use scan_state::ScanState;

use crate::catalog::JsonCatalogStore;
use crate::config::Config;
use crate::metadata::build_http_client;
use crate::source::{CachingRevisionSource, GitHubClient, RevisionSource};
use crate::sync::Pacer;
use crate::Result;
use std::time::Duration;

/// Runs the dates pass with production collaborators built from `config`
pub async fn run_dates(config: &Config) -> Result<BackfillReport> {
    let client = build_http_client(
        &config.user_agent,
        Duration::from_secs(config.metadata.request_timeout_secs),
    )?;
    let github = GitHubClient::new(client, &config.source, config.history.per_page);

    if config.history.cache_revisions {
        tracing::debug!("Revision lookups are cached for this run");
        run_with_source(config, CachingRevisionSource::new(github)).await
    } else {
        run_with_source(config, github).await
    }
}

async fn run_with_source<R: RevisionSource>(config: &Config, source: R) -> Result<BackfillReport> {
    let resolver = HistoryDateResolver::new(
        source,
        config.source.path.clone(),
        Pacer::from_millis(config.pacing.revision_delay_ms),
    );
    let store = JsonCatalogStore::new(&config.catalog.path);
    let options = BackfillOptions {
        revisit_provisional: config.history.revisit_provisional,
        pacer: Pacer::from_millis(config.pacing.date_delay_ms),
    };

    backfill_dates(&resolver, &store, &options).await
}
