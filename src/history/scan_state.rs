/// Scan state definitions for the history date resolver
///
/// A resolution starts in `ScanningRevisions`, moves to `InspectingDiff`
/// once per visited revision, and ends in `Found` or `Exhausted`.
use std::fmt;

/// Represents where a single date resolution currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanState {
    // ===== Active States =====
    /// Fetching or walking the revision list
    ScanningRevisions,

    /// Examining one revision's patch for the tracked document
    InspectingDiff,

    // ===== Terminal States =====
    /// An introducing revision was found
    Found,

    /// No revision in the window introduced the URL, or history was unavailable
    Exhausted,
}

impl ScanState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: ScanState) -> bool {
        use ScanState::*;
        matches!(
            (self, next),
            (ScanningRevisions, InspectingDiff)
                | (ScanningRevisions, Exhausted)
                | (InspectingDiff, InspectingDiff)
                | (InspectingDiff, Found)
                | (InspectingDiff, Exhausted)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScanningRevisions => "scanning-revisions",
            Self::InspectingDiff => "inspecting-diff",
            Self::Found => "found",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
