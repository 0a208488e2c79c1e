//! Store configuration for gavel
//!
//! Configuration lives in `<store>/config.toml` with sensible defaults for
//! every field, so a missing or partial file is never an error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Store format version written at init time
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Leaderboard visibility settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Whether leaderboard output is enabled for this store. Organizers can
    /// flip this off while judging is still underway; the flag is surfaced
    /// in leaderboard output for downstream dashboards.
    pub enabled: bool,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Top-level store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub format_version: u32,
    pub leaderboard: LeaderboardConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            format_version: STORE_FORMAT_VERSION,
            leaderboard: LeaderboardConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::GavelError::Other(format!("serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}
