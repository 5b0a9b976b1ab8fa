//! Configuration module for Link-Catalog
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use link_catalog::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("catalog.toml")).unwrap();
//! println!("Tracking {}/{}:{}", config.source.owner, config.source.repo, config.source.path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogConfig, Config, HistoryConfig, MetadataConfig, PacingConfig, SourceConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{load_config, load_config_with_hash, parse_config};
