//! `gavel rubric` commands - create, update, and show scoring rubrics

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::read_criteria;
use gavel_core::error::Result;
use gavel_core::records::{format_criterion_line, format_header};
use gavel_core::rubric::Rubric;
use gavel_core::store::Store;

/// Execute `rubric create`
pub fn create(cli: &Cli, store: &Store, event: &str, criteria_file: &str) -> Result<()> {
    let inputs = read_criteria(criteria_file)?;
    let rubric = store.create_rubric(event, &inputs)?;

    if cli.verbose {
        debug!(rubric_id = %rubric.id, criteria = rubric.criteria.len(), "rubric_created");
    }

    output_rubric(cli, store, &rubric, "rubric-create")
}

/// Execute `rubric update`
pub fn update(
    cli: &Cli,
    store: &Store,
    event: &str,
    rubric_id: &str,
    criteria_file: &str,
) -> Result<()> {
    let inputs = read_criteria(criteria_file)?;
    let rubric = store.update_rubric(event, rubric_id, &inputs)?;
    output_rubric(cli, store, &rubric, "rubric-update")
}

/// Execute `rubric show`: the event's active rubric, or the valid empty state
pub fn show(cli: &Cli, store: &Store, event: &str) -> Result<()> {
    match store.latest_rubric(event)? {
        Some(rubric) => output_rubric(cli, store, &rubric, "rubric-show"),
        None => {
            match cli.format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({ "rubric": null }))?
                    );
                }
                OutputFormat::Human => {
                    if !cli.quiet {
                        println!("no rubric for event {}", event);
                    }
                }
                OutputFormat::Records => {
                    println!(
                        "{}",
                        format_header(&store.root().display().to_string(), "rubric-show")
                    );
                }
            }
            Ok(())
        }
    }
}

fn output_rubric(cli: &Cli, store: &Store, rubric: &Rubric, mode: &str) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "rubric": rubric });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", rubric.id);
            if !cli.quiet {
                for criterion in &rubric.criteria {
                    println!(
                        "  {}  weight={} max={}  {}",
                        criterion.id, criterion.weight, criterion.max_score, criterion.name
                    );
                }
            }
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(&store.root().display().to_string(), mode)
            );
            println!(
                "R {} event={} criteria={} created={}",
                rubric.id,
                rubric.event_id,
                rubric.criteria.len(),
                rubric.created.to_rfc3339(),
            );
            for criterion in &rubric.criteria {
                println!("{}", format_criterion_line(criterion));
            }
        }
    }
    Ok(())
}
