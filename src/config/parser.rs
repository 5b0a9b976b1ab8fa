//! Reading the catalog's TOML config file
//!
//! The file is read once; the same text is parsed and hashed so the hash
//! logged at startup always describes the config that was actually used.

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and validates the config at `path`
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use link_catalog::config::load_config;
///
/// let config = load_config(Path::new("catalog.toml")).unwrap();
/// println!("Catalog file: {}", config.catalog.path);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_hash(path).map(|(config, _)| config)
}

/// Loads the config at `path` along with the hex SHA-256 of its text
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let config = parse_config(&text)?;
    Ok((config, content_hash(&text)))
}

/// Parses config text, normalizes the document path and validates the result
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(text)?;
    config.source.path = normalize_document_path(&config.source.path);
    validate(&config)?;
    Ok(config)
}

/// Repository paths are relative: `/README.md` and `README.md` name the same file
fn normalize_document_path(path: &str) -> String {
    path.trim().trim_start_matches('/').to_string()
}

fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
