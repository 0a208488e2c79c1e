//! Utilities for records output format
//!
//! Records output is line-oriented: one `H` header line per command, then
//! one tagged line per row (`R` rubric, `C` criterion, `S` submission,
//! `A` assignment, `E` leaderboard entry).

use crate::leaderboard::LeaderboardEntry;
use crate::rubric::Criterion;

/// Escape double quotes in a string for records format.
/// Replaces `"` with `\"` to allow safe embedding in quoted fields.
pub fn escape_quotes(s: &str) -> String {
    s.replace('\"', r#"\""#)
}

/// Format the records header line
pub fn format_header(store: &str, mode: &str) -> String {
    format!("H gavel=1 records=1 store={} mode={}", store, mode)
}

/// Format a criterion line: `C <id> weight=<w> max=<m> "<name>"`
pub fn format_criterion_line(criterion: &Criterion) -> String {
    format!(
        "C {} weight={} max={} \"{}\"",
        criterion.id,
        criterion.weight,
        criterion.max_score,
        escape_quotes(&criterion.name)
    )
}

/// Format a leaderboard entry line: `E <rank> <submission-id> <pct> "<team>"`
pub fn format_entry_line(entry: &LeaderboardEntry) -> String {
    format!(
        "E {} {} {:.2} \"{}\"",
        entry.rank,
        entry.submission_id,
        entry.percentage,
        escape_quotes(&entry.team_name)
    )
}
