//! `gavel submission` commands - register and list competing entries

use crate::cli::{Cli, OutputFormat};
use gavel_core::error::Result;
use gavel_core::records::{escape_quotes, format_header};
use gavel_core::store::{NewSubmission, Store};
use gavel_core::submission::Submission;

pub struct AddArgs {
    pub event: String,
    pub team: String,
    pub track: Option<String>,
    pub table: Option<i64>,
    pub repo: Option<String>,
    pub demo: Option<String>,
    pub rubric: Option<String>,
}

/// Execute `submission add`
pub fn add(cli: &Cli, store: &Store, args: AddArgs) -> Result<()> {
    let submission = store.add_submission(NewSubmission {
        event_id: args.event,
        team_name: args.team,
        rubric_id: args.rubric,
        track: args.track,
        table_number: args.table,
        repo_url: args.repo,
        demo_url: args.demo,
    })?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "submission": submission });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", submission.id);
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(&store.root().display().to_string(), "submission-add")
            );
            println!("{}", submission_line(&submission));
        }
    }

    Ok(())
}

/// Execute `submission list`
pub fn list(cli: &Cli, store: &Store, event: &str) -> Result<()> {
    let submissions = store.list_submissions(event)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "submissions": submissions });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            for submission in &submissions {
                println!("{}  {}", submission.id, submission.team_name);
            }
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(&store.root().display().to_string(), "submission-list")
            );
            for submission in &submissions {
                println!("{}", submission_line(submission));
            }
        }
    }

    Ok(())
}

/// Records line: `S <id> event=<e> rubric=<r> "<team>"`
fn submission_line(submission: &Submission) -> String {
    format!(
        "S {} event={} rubric={} \"{}\"",
        submission.id,
        submission.event_id,
        submission.rubric_id,
        escape_quotes(&submission.team_name)
    )
}
