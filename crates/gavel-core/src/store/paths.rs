use crate::error::{GavelError, Result};
use std::path::{Path, PathBuf};

/// Default store directory name (hidden)
pub const DEFAULT_STORE_DIR: &str = ".gavel";

/// Visible store directory name
pub const VISIBLE_STORE_DIR: &str = "gavel";

/// Configuration filename
pub const CONFIG_FILE: &str = "config.toml";

/// Database filename
pub const DB_FILE: &str = "gavel.db";

pub fn discover_store(root: &Path) -> Result<PathBuf> {
    let mut current = root.to_path_buf();

    loop {
        // Check for default hidden store
        let store_path = current.join(DEFAULT_STORE_DIR);
        if store_path.is_dir() {
            return Ok(store_path);
        }

        // Check for visible store
        let visible_path = current.join(VISIBLE_STORE_DIR);
        if visible_path.is_dir() {
            return Ok(visible_path);
        }

        // Move up to parent directory
        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                // Reached filesystem root
                return Err(GavelError::StoreNotFound {
                    search_root: root.to_path_buf(),
                });
            }
        }
    }
}
