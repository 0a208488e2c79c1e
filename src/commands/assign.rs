//! `gavel assign` commands - bind judges to submissions

use crate::cli::{Cli, OutputFormat};
use gavel_core::assignment::{AssignmentStatus, JudgeAssignment};
use gavel_core::error::Result;
use gavel_core::records::format_header;
use gavel_core::store::Store;

/// Execute `assign add`
pub fn add(cli: &Cli, store: &Store, judge: &str, submission: &str) -> Result<()> {
    let assignment = store.assign_judge(judge, submission)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "assignment": assignment });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", assignment.id);
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(&store.root().display().to_string(), "assign-add")
            );
            println!("{}", assignment_line(&assignment));
        }
    }

    Ok(())
}

/// Execute `assign list`
pub fn list(
    cli: &Cli,
    store: &Store,
    event: &str,
    judge: Option<&str>,
    status: Option<AssignmentStatus>,
) -> Result<()> {
    let assignments = store.list_assignments(event, judge, status)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "assignments": assignments });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            for assignment in &assignments {
                println!(
                    "{}  {}  {}  {}",
                    assignment.id, assignment.judge_id, assignment.submission_id, assignment.status
                );
            }
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(&store.root().display().to_string(), "assign-list")
            );
            for assignment in &assignments {
                println!("{}", assignment_line(assignment));
            }
        }
    }

    Ok(())
}

/// Records line: `A <id> judge=<j> submission=<s> status=<st>`
fn assignment_line(assignment: &JudgeAssignment) -> String {
    format!(
        "A {} judge={} submission={} status={}",
        assignment.id, assignment.judge_id, assignment.submission_id, assignment.status
    )
}
