//! Output module for catalog reports
//!
//! This module handles:
//! - Summarizing a persisted catalog
//! - Printing the summary for the `--stats` mode

pub mod stats;

pub use stats::{load_statistics, print_statistics, CatalogStatistics};
