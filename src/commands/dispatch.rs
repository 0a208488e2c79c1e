//! Command dispatch logic for gavel

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::{
    AssignCommands, Cli, Commands, RubricCommands, ScoreCommands, SubmissionCommands,
};
use crate::commands;
use crate::commands::helpers::open_store;
use gavel_core::error::{GavelError, Result};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    // Determine the root directory
    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if cli.verbose {
        tracing::debug!(elapsed = ?start.elapsed(), "resolve_root");
    }

    match &cli.command {
        None => Err(GavelError::UsageError(
            "no command given (try `gavel --help`)".to_string(),
        )),

        Some(Commands::Init { visible }) => commands::init::execute(cli, &root, *visible),

        Some(Commands::Rubric { command }) => handle_rubric(cli, &root, command),
        Some(Commands::Submission { command }) => handle_submission(cli, &root, command),
        Some(Commands::Assign { command }) => handle_assign(cli, &root, command),
        Some(Commands::Score { command }) => handle_score(cli, &root, command),

        Some(Commands::Leaderboard { event }) => {
            let store = open_store(cli, &root)?;
            commands::leaderboard::execute(cli, &store, event, start)
        }
    }
}

fn handle_rubric(cli: &Cli, root: &Path, command: &RubricCommands) -> Result<()> {
    let store = open_store(cli, root)?;
    match command {
        RubricCommands::Create(args) => {
            commands::rubric::create(cli, &store, &args.event, &args.criteria_file)
        }
        RubricCommands::Update { write, rubric } => {
            commands::rubric::update(cli, &store, &write.event, rubric, &write.criteria_file)
        }
        RubricCommands::Show { event } => commands::rubric::show(cli, &store, event),
    }
}

fn handle_submission(cli: &Cli, root: &Path, command: &SubmissionCommands) -> Result<()> {
    let store = open_store(cli, root)?;
    match command {
        SubmissionCommands::Add {
            event,
            team,
            track,
            table,
            repo,
            demo,
            rubric,
        } => commands::submission::add(
            cli,
            &store,
            commands::submission::AddArgs {
                event: event.clone(),
                team: team.clone(),
                track: track.clone(),
                table: *table,
                repo: repo.clone(),
                demo: demo.clone(),
                rubric: rubric.clone(),
            },
        ),
        SubmissionCommands::List { event } => commands::submission::list(cli, &store, event),
    }
}

fn handle_assign(cli: &Cli, root: &Path, command: &AssignCommands) -> Result<()> {
    let store = open_store(cli, root)?;
    match command {
        AssignCommands::Add { judge, submission } => {
            commands::assign::add(cli, &store, judge, submission)
        }
        AssignCommands::List {
            event,
            judge,
            status,
        } => commands::assign::list(cli, &store, event, judge.as_deref(), *status),
    }
}

fn handle_score(cli: &Cli, root: &Path, command: &ScoreCommands) -> Result<()> {
    let store = open_store(cli, root)?;
    match command {
        ScoreCommands::Start { assignment } => commands::score::start(cli, &store, assignment),
        ScoreCommands::Submit {
            assignment,
            score,
            comments,
            private_notes,
        } => commands::score::submit(
            cli,
            &store,
            assignment,
            score,
            comments.clone(),
            private_notes.clone(),
        ),
        ScoreCommands::Show {
            assignment,
            with_private,
        } => commands::score::show(cli, &store, assignment, *with_private),
    }
}
