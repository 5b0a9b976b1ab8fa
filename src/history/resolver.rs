//! History date resolver - finds the revision that introduced a URL
//!
//! The revision list arrives newest first. Revisions are inspected oldest
//! first, and the first one whose patch to the tracked document adds a line
//! containing the URL supplies the date. When no revision in the window
//! matches, or the list itself cannot be fetched, the resolver falls back to
//! the current time and marks the result provisional.

use crate::history::scan_state::ScanState;
use crate::source::RevisionSource;
use crate::sync::Pacer;
use chrono::{DateTime, Utc};

/// Where a resolved date came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOrigin {
    /// Authorship time of the introducing revision
    Revision(String),

    /// No revision in the scanned window added the URL
    WindowExhausted,

    /// The revision list could not be fetched
    HistoryUnavailable,
}

/// Result of one date resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedDate {
    pub at: DateTime<Utc>,
    pub origin: DateOrigin,
}

impl AddedDate {
    fn fallback(origin: DateOrigin) -> Self {
        Self {
            at: Utc::now(),
            origin,
        }
    }

    /// Returns true if the date is a fallback rather than a revision time
    pub fn is_provisional(&self) -> bool {
        !matches!(self.origin, DateOrigin::Revision(_))
    }
}

/// Resolves introduction dates against a revision source
pub struct HistoryDateResolver<R> {
    source: R,
    document_path: String,
    pacer: Pacer,
}

impl<R: RevisionSource> HistoryDateResolver<R> {
    /// `pacer` is applied after each inspected revision that needed a
    /// round-trip to the source. A leading `/` on `document_path` is
    /// dropped, matching the repository-relative names revisions report.
    pub fn new(source: R, document_path: impl Into<String>, pacer: Pacer) -> Self {
        let document_path: String = document_path.into();
        Self {
            source,
            document_path: document_path.trim_start_matches('/').to_string(),
            pacer,
        }
    }

    /// Returns the date `url` was first added to the tracked document
    ///
    /// Never fails: source errors degrade to a provisional date.
    pub async fn resolve_added_date(&self, url: &str) -> AddedDate {
        let mut state = ScanState::ScanningRevisions;

        let revisions = match self.source.list_revisions(&self.document_path).await {
            Ok(revisions) => revisions,
            Err(e) => {
                tracing::warn!("Could not list revisions of {}: {}", self.document_path, e);
                advance(&mut state, ScanState::Exhausted);
                return AddedDate::fallback(DateOrigin::HistoryUnavailable);
            }
        };

        tracing::debug!(
            "Scanning {} revisions of {} for {}",
            revisions.len(),
            self.document_path,
            url
        );

        for revision in revisions.iter().rev() {
            advance(&mut state, ScanState::InspectingDiff);
            let cached = self.source.has_cached_files(&revision.id);

            match self.source.revision_files(&revision.id).await {
                Ok(files) => {
                    let introduced = files
                        .iter()
                        .any(|f| f.filename == self.document_path && f.adds_text(url));
                    if introduced {
                        advance(&mut state, ScanState::Found);
                        tracing::debug!("{} introduced by {}", url, revision.id);
                        return AddedDate {
                            at: revision.authored_at,
                            origin: DateOrigin::Revision(revision.id.clone()),
                        };
                    }
                }
                Err(e) => {
                    tracing::debug!("Skipping revision {}: {}", revision.id, e);
                }
            }

            if !cached {
                self.pacer.pause().await;
            }
        }

        advance(&mut state, ScanState::Exhausted);
        tracing::debug!("No revision in window introduced {}", url);
        AddedDate::fallback(DateOrigin::WindowExhausted)
    }
}

fn advance(state: &mut ScanState, next: ScanState) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid scan transition {} -> {}",
        state,
        next
    );
    tracing::trace!("Scan state {} -> {}", state, next);
    *state = next;
}
