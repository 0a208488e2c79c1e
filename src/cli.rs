//! CLI argument parsing for gavel
//!
//! Uses clap for argument parsing.
//! Supports global flags: --root, --store, --format, --quiet, --verbose

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gavel_core::assignment::AssignmentStatus;
pub use gavel_core::format::OutputFormat;

/// Gavel - event judging and leaderboard CLI
#[derive(Parser, Debug)]
#[command(name = "gavel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format (human, json, or records)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "GAVEL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new gavel store
    Init {
        /// Use visible store directory (gavel/ instead of .gavel/)
        #[arg(long)]
        visible: bool,
    },

    /// Manage scoring rubrics
    Rubric {
        #[command(subcommand)]
        command: RubricCommands,
    },

    /// Manage competing submissions
    Submission {
        #[command(subcommand)]
        command: SubmissionCommands,
    },

    /// Manage judge assignments
    Assign {
        #[command(subcommand)]
        command: AssignCommands,
    },

    /// Record and inspect judge scores
    Score {
        #[command(subcommand)]
        command: ScoreCommands,
    },

    /// Compute the ranked leaderboard for an event
    Leaderboard {
        /// Event id
        #[arg(long, short)]
        event: String,
    },
}

/// Rubric subcommands
#[derive(Subcommand, Debug)]
pub enum RubricCommands {
    /// Create a new rubric version for an event
    Create(RubricWriteArgs),

    /// Replace the criteria of an existing rubric in place
    Update {
        #[command(flatten)]
        write: RubricWriteArgs,

        /// Rubric id to update
        #[arg(long, short)]
        rubric: String,
    },

    /// Show the event's active rubric
    Show {
        /// Event id
        #[arg(long, short)]
        event: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RubricWriteArgs {
    /// Event id
    #[arg(long, short)]
    pub event: String,

    /// JSON file with the criteria array ("-" reads stdin)
    #[arg(long, value_name = "PATH")]
    pub criteria_file: String,
}

/// Submission subcommands
#[derive(Subcommand, Debug)]
pub enum SubmissionCommands {
    /// Register a competing entry
    Add {
        /// Event id
        #[arg(long, short)]
        event: String,

        /// Team name
        #[arg(long, short)]
        team: String,

        /// Track the entry competes in
        #[arg(long)]
        track: Option<String>,

        /// Table number for judging rounds
        #[arg(long)]
        table: Option<i64>,

        /// Repository URL
        #[arg(long)]
        repo: Option<String>,

        /// Demo URL
        #[arg(long)]
        demo: Option<String>,

        /// Judge against this rubric instead of the event's active one
        #[arg(long)]
        rubric: Option<String>,
    },

    /// List an event's submissions
    List {
        /// Event id
        #[arg(long, short)]
        event: String,
    },
}

/// Assignment subcommands
#[derive(Subcommand, Debug)]
pub enum AssignCommands {
    /// Bind a judge to a submission for scoring
    Add {
        /// Judge id
        #[arg(long, short)]
        judge: String,

        /// Submission id
        #[arg(long, short)]
        submission: String,
    },

    /// List assignments for an event
    List {
        /// Event id
        #[arg(long, short)]
        event: String,

        /// Filter by judge
        #[arg(long, short)]
        judge: Option<String>,

        /// Filter by status (assigned, in_progress, completed)
        #[arg(long, value_parser = parse_status)]
        status: Option<AssignmentStatus>,
    },
}

/// Score subcommands
#[derive(Subcommand, Debug)]
pub enum ScoreCommands {
    /// Mark an assignment as in progress
    Start {
        /// Assignment id
        #[arg(long, short)]
        assignment: String,
    },

    /// Submit the raw scores for an assignment
    Submit {
        /// Assignment id
        #[arg(long, short)]
        assignment: String,

        /// Raw score as criterion-id=value (can be repeated)
        #[arg(long, short, value_name = "CID=VALUE", action = clap::ArgAction::Append)]
        score: Vec<String>,

        /// Comments visible to the committee
        #[arg(long)]
        comments: Option<String>,

        /// Notes visible only to the submitting judge
        #[arg(long)]
        private_notes: Option<String>,
    },

    /// Show the recorded score for an assignment
    Show {
        /// Assignment id
        #[arg(long, short)]
        assignment: String,

        /// Include the judge's private notes
        #[arg(long)]
        with_private: bool,
    },
}

/// Parse assignment status from string
fn parse_status(s: &str) -> Result<AssignmentStatus, String> {
    s.parse::<AssignmentStatus>().map_err(|e| e.to_string())
}

/// Parse output format from string
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}
