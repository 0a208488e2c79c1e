//! `gavel score` commands - record and inspect judge scores

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::parse_scores;
use gavel_core::error::Result;
use gavel_core::records::format_header;
use gavel_core::scoring::normalize_judge_score;
use gavel_core::store::{ScoreSubmission, Store};

/// Execute `score start`: assigned -> in_progress
pub fn start(cli: &Cli, store: &Store, assignment_id: &str) -> Result<()> {
    let assignment = store.start_assignment(assignment_id)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "assignment": assignment });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{} {}", assignment.id, assignment.status);
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(&store.root().display().to_string(), "score-start")
            );
            println!(
                "A {} judge={} submission={} status={}",
                assignment.id, assignment.judge_id, assignment.submission_id, assignment.status
            );
        }
    }

    Ok(())
}

/// Execute `score submit`
pub fn submit(
    cli: &Cli,
    store: &Store,
    assignment_id: &str,
    score_args: &[String],
    comments: Option<String>,
    private_notes: Option<String>,
) -> Result<()> {
    let raw_scores = parse_scores(score_args)?;

    let score = store.submit_score(ScoreSubmission {
        assignment_id: assignment_id.to_string(),
        raw_scores,
        comments,
        private_notes,
    })?;

    if cli.verbose {
        debug!(score_id = %score.id, criteria = score.raw_scores.len(), "score_submitted");
    }

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "score": score });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", score.id);
            if !cli.quiet {
                // Running total for this judge alone; rounding happens only
                // here, never in the persisted computation path.
                let rubric = store.rubric(&score.rubric_id)?;
                let total = normalize_judge_score(&rubric, &score.raw_scores);
                println!("  weighted total: {:.1}%", total);
            }
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(&store.root().display().to_string(), "score-submit")
            );
            println!(
                "O {} assignment={} judge={} submission={} rubric={}",
                score.id, score.assignment_id, score.judge_id, score.submission_id, score.rubric_id
            );
        }
    }

    Ok(())
}

/// Execute `score show`. Private notes are redacted unless requested;
/// they are visible only to the judge who wrote them.
pub fn show(cli: &Cli, store: &Store, assignment_id: &str, with_private: bool) -> Result<()> {
    let mut score = store.score_for_assignment(assignment_id)?;
    if !with_private {
        score.private_notes = None;
    }

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "score": score });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", score.id);
            let mut entries: Vec<_> = score.raw_scores.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (cid, value) in entries {
                println!("  {} = {}", cid, value);
            }
            if let Some(comments) = &score.comments {
                println!("  comments: {}", comments);
            }
            if let Some(notes) = &score.private_notes {
                println!("  private: {}", notes);
            }
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(&store.root().display().to_string(), "score-show")
            );
            println!(
                "O {} assignment={} judge={} submission={} rubric={}",
                score.id, score.assignment_id, score.judge_id, score.submission_id, score.rubric_id
            );
        }
    }

    Ok(())
}
