//! `gavel init` command - initialize a new store

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use gavel_core::error::Result;
use gavel_core::store::{InitOptions, Store};

/// Execute the init command
pub fn execute(cli: &Cli, root: &Path, visible: bool) -> Result<()> {
    let store = match &cli.store {
        Some(path) => Store::init_at(path)?,
        None => Store::init(root, InitOptions { visible })?,
    };

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "store": store.root(),
                "config": store.config_path(),
                "database": store.db_path(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("Initialized gavel store at {}", store.root().display());
        }
        OutputFormat::Records => {
            println!(
                "{}",
                gavel_core::records::format_header(&store.root().display().to_string(), "init")
            );
        }
    }

    Ok(())
}
