//! Indexer options and their TOML loader.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Options controlling a [`PinIndexer`](crate::PinIndexer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexOptions {
    /// Memoize the per-tile cumulative walk on first use.
    pub cache_layouts: bool,
    /// Validate the tables when the indexer is created.
    pub validate_tables: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            cache_layouts: true,
            validate_tables: false,
        }
    }
}

/// Loads index options from a TOML file.
pub fn load_options(path: &Path) -> Result<IndexOptions, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_options_from_str(&content)
}

/// Parses index options from a TOML string. Missing keys take their defaults.
pub fn load_options_from_str(content: &str) -> Result<IndexOptions, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}
