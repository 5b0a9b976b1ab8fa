//! Statistics over a persisted catalog
//!
//! This module provides functionality for summarizing the catalog for the
//! `--stats` mode: totals by link type, how many entries carry a final,
//! provisional, or missing introduction date, and the dated range.

use crate::catalog::{Catalog, LinkKind};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Catalog statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStatistics {
    /// Total number of entries
    pub total_links: u64,

    /// Count of entries by link type
    pub links_by_kind: HashMap<LinkKind, u64>,

    /// Entries dated from a revision
    pub dated: u64,

    /// Entries carrying a fallback date
    pub provisional: u64,

    /// Entries with no `addedAt` at all
    pub undated: u64,

    /// Entries with neither a thumbnail nor an image
    pub without_preview: u64,

    /// Earliest recorded `addedAt`
    pub oldest_added: Option<DateTime<Utc>>,

    /// Latest recorded `addedAt`
    pub newest_added: Option<DateTime<Utc>>,
}

impl CatalogStatistics {
    pub fn count(&self, kind: LinkKind) -> u64 {
        self.links_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Computes statistics for `catalog`
pub fn load_statistics(catalog: &Catalog) -> CatalogStatistics {
    let mut stats = CatalogStatistics::default();

    for link in catalog.iter() {
        stats.total_links += 1;
        *stats.links_by_kind.entry(link.kind).or_insert(0) += 1;

        if link.preview_image().is_none() {
            stats.without_preview += 1;
        }

        match link.added_at {
            None => stats.undated += 1,
            Some(at) => {
                if link.added_at_provisional {
                    stats.provisional += 1;
                } else {
                    stats.dated += 1;
                }
                stats.oldest_added = Some(stats.oldest_added.map_or(at, |o| o.min(at)));
                stats.newest_added = Some(stats.newest_added.map_or(at, |n| n.max(at)));
            }
        }
    }

    stats
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CatalogStatistics) {
    println!("=== Catalog Statistics ===\n");

    println!("Overview:");
    println!("  Total links: {}", stats.total_links);
    for kind in [LinkKind::Video, LinkKind::Website] {
        let count = stats.count(kind);
        println!("  {}: {} ({:.1}%)", kind, count, percentage(count, stats.total_links));
    }
    println!("  Without preview image: {}", stats.without_preview);
    println!();

    println!("Added Dates:");
    println!("  From history: {}", stats.dated);
    println!("  Provisional: {}", stats.provisional);
    println!("  Missing: {}", stats.undated);
    if let (Some(oldest), Some(newest)) = (stats.oldest_added, stats.newest_added) {
        println!("  Range: {} to {}", oldest.to_rfc3339(), newest.to_rfc3339());
    }
    println!();

    println!(
        "Dating Coverage: {:.1}% ({} / {} links dated from history)",
        percentage(stats.dated, stats.total_links),
        stats.dated,
        stats.total_links
    );
}

fn percentage(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
