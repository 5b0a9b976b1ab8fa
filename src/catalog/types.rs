use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Classification tag of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Hosted on a known video-sharing domain
    Video,
    /// Any other web page
    Website,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Website => "website",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog record keyed by its URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub url: String,

    #[serde(rename = "type")]
    pub kind: LinkKind,

    /// Always populated; falls back to the hostname or a placeholder
    pub title: String,

    /// Representative image of a video, derived from its identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Social-preview image of a website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// When metadata was last resolved
    pub fetched_at: DateTime<Utc>,

    /// Authorship time of the revision that introduced this URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,

    /// `added_at` is a wall-clock fallback rather than a revision date
    #[serde(default, skip_serializing_if = "is_false")]
    pub added_at_provisional: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Link {
    /// Builds a video record; the thumbnail is always present
    pub fn video(
        url: impl Into<String>,
        title: impl Into<String>,
        thumbnail: impl Into<String>,
        author: Option<String>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            url: url.into(),
            kind: LinkKind::Video,
            title: title.into(),
            thumbnail: Some(thumbnail.into()),
            image: None,
            description: None,
            author,
            fetched_at,
            added_at: None,
            added_at_provisional: false,
        }
    }

    /// Builds a website record
    pub fn website(
        url: impl Into<String>,
        title: impl Into<String>,
        image: Option<String>,
        description: Option<String>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            url: url.into(),
            kind: LinkKind::Website,
            title: title.into(),
            thumbnail: None,
            image,
            description,
            author: None,
            fetched_at,
            added_at: None,
            added_at_provisional: false,
        }
    }

    /// Image to show for this entry, whichever field carries it
    pub fn preview_image(&self) -> Option<&str> {
        self.thumbnail.as_deref().or(self.image.as_deref())
    }

    /// Returns true when the dates pass should (re)compute `added_at`
    ///
    /// A revision-derived date is final. A provisional date is revisited
    /// only when `revisit_provisional` is set.
    pub fn needs_added_date(&self, revisit_provisional: bool) -> bool {
        match self.added_at {
            None => true,
            Some(_) => self.added_at_provisional && revisit_provisional,
        }
    }

    /// Records the introduction date of this link
    pub fn record_added_at(&mut self, at: DateTime<Utc>, provisional: bool) {
        self.added_at = Some(at);
        self.added_at_provisional = provisional;
    }
}

/// The full persisted URL → Link mapping
///
/// Keys are unique; iteration order is by URL and carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    links: BTreeMap<String, Link>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.links.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&Link> {
        self.links.get(url)
    }

    pub fn get_mut(&mut self, url: &str) -> Option<&mut Link> {
        self.links.get_mut(url)
    }

    /// Inserts a link under its own URL, replacing any previous entry
    pub fn insert(&mut self, link: Link) -> Option<Link> {
        self.links.insert(link.url.clone(), link)
    }

    pub fn remove(&mut self, url: &str) -> Option<Link> {
        self.links.remove(url)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Removes every entry whose URL is not in `keep`
    ///
    /// Returns the removed URLs in key order.
    pub fn retain_urls(&mut self, keep: &HashSet<&str>) -> Vec<String> {
        let stale: Vec<String> = self
            .links
            .keys()
            .filter(|url| !keep.contains(url.as_str()))
            .cloned()
            .collect();

        for url in &stale {
            self.links.remove(url);
        }

        stale
    }
}
