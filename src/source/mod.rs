//! Source module: the tracked document and its revision history
//!
//! The collaborators are traits so the passes can run against the REST
//! API client in production and in-memory fakes in tests.

mod cache;
mod github;
mod types;

pub use cache::CachingRevisionSource;
pub use github::{decode_content, GitHubClient};
pub use types::{ChangedFile, DocumentSource, Revision, RevisionSource};
