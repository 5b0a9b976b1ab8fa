//! Catalog persistence
//!
//! The catalog lives in a single pretty-printed JSON object. Every save
//! replaces the file atomically so a reader never observes a partial write.

use crate::catalog::Catalog;
use crate::{StoreError, StoreResult};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Trait for catalog persistence backends
pub trait CatalogStore {
    /// Loads the catalog; `Ok(None)` when nothing has been persisted yet
    fn load(&self) -> StoreResult<Option<Catalog>>;

    /// Persists the whole catalog
    fn save(&self, catalog: &Catalog) -> StoreResult<()>;

    /// Human-readable location, used in log lines and errors
    fn location(&self) -> String;
}

/// Catalog stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.location(),
            source,
        }
    }
}

impl CatalogStore for JsonCatalogStore {
    fn load(&self) -> StoreResult<Option<Catalog>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let catalog = serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: self.location(),
            source,
        })?;

        Ok(Some(catalog))
    }

    fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(catalog).map_err(|source| StoreError::Json {
            path: self.location(),
            source,
        })?;

        write_atomic(&self.path, &bytes).map_err(|e| self.io_error(e))?;
        tracing::trace!("Saved {} links to {}", catalog.len(), self.location());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn tmp_path_for(dest: &Path) -> io::Result<PathBuf> {
    let file_name = dest
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no filename"))?;

    let tmp_name = format!(".{}.tmp.{}", file_name.to_string_lossy(), std::process::id());
    Ok(dest.with_file_name(tmp_name))
}

/// Writes `bytes` to a sibling temp file, syncs it and renames it over `dest`
pub fn write_atomic(dest: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let tmp = tmp_path_for(dest)?;
    {
        let mut f = File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }

    if let Err(e) = std::fs::rename(&tmp, dest) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }

    Ok(())
}
