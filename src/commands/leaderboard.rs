//! `gavel leaderboard` command - compute the ranked leaderboard
//!
//! The board is recomputed in full from persisted rubric, submission, and
//! score rows on every invocation; there is no cached leaderboard state.

use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use gavel_core::error::Result;
use gavel_core::records::{format_entry_line, format_header};
use gavel_core::store::Store;

/// Execute the leaderboard command
pub fn execute(cli: &Cli, store: &Store, event: &str, start: Instant) -> Result<()> {
    let board = store.leaderboard(event)?;

    if cli.verbose {
        debug!(
            event,
            entries = board.entries.len(),
            elapsed = ?start.elapsed(),
            "leaderboard_computed"
        );
    }

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&board)?);
        }
        OutputFormat::Human => {
            if board.entries.is_empty() {
                if !cli.quiet {
                    println!("no scored submissions for event {}", event);
                }
            } else {
                for entry in &board.entries {
                    println!(
                        "{:>3}. {}  {:.2}%  ({})",
                        entry.rank, entry.team_name, entry.percentage, entry.submission_id
                    );
                }
            }
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(&store.root().display().to_string(), "leaderboard")
            );
            println!(
                "L {} enabled={} entries={}",
                board.event_id,
                board.enabled,
                board.entries.len()
            );
            for entry in &board.entries {
                println!("{}", format_entry_line(entry));
            }
        }
    }

    Ok(())
}
