//! Store management for gavel
//!
//! The store is the root directory containing all gavel data: `config.toml`
//! and the sqlite database. Default location: `.gavel/` (hidden,
//! git-trackable). Commands stay thin; the operations here load consistent
//! rows, run the pure engine functions, and persist the results.

pub mod paths;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;

use crate::assignment::{AssignmentStatus, JudgeAssignment};
use crate::config::StoreConfig;
use crate::db::Database;
use crate::error::{GavelError, Result};
use crate::id;
use crate::leaderboard::{build_leaderboard, Leaderboard};
use crate::rubric::{validate_criteria, CriterionInput, Rubric};
use crate::scoring::Score;
use crate::submission::Submission;
use paths::{CONFIG_FILE, DB_FILE, DEFAULT_STORE_DIR, VISIBLE_STORE_DIR};

/// Options for store initialization
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Use visible store directory (`gavel/` instead of `.gavel/`)
    pub visible: bool,
}

/// A new submission before it is assigned an id and a rubric
#[derive(Debug, Clone, Default)]
pub struct NewSubmission {
    pub event_id: String,
    pub team_name: String,
    /// Explicit rubric; defaults to the event's active rubric
    pub rubric_id: Option<String>,
    pub track: Option<String>,
    pub table_number: Option<i64>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
}

/// A score submission payload from a judge
#[derive(Debug, Clone, Default)]
pub struct ScoreSubmission {
    pub assignment_id: String,
    pub raw_scores: HashMap<String, f64>,
    pub comments: Option<String>,
    pub private_notes: Option<String>,
}

/// The gavel store
#[derive(Debug)]
pub struct Store {
    /// Root path of the store
    root: PathBuf,
    /// Store configuration
    config: StoreConfig,
    /// SQLite database
    db: Database,
}

impl Store {
    /// Discover a store by walking up from the given root directory
    pub fn discover(root: &Path) -> Result<Self> {
        let store_path = paths::discover_store(root)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(GavelError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            // Sensible defaults when the file is missing
            StoreConfig::default()
        };

        let db = Database::open(path)?;

        Ok(Store {
            root: path.to_path_buf(),
            config,
            db,
        })
    }

    /// Initialize a new store under the given project root
    pub fn init(project_root: &Path, options: InitOptions) -> Result<Self> {
        let store_name = if options.visible {
            VISIBLE_STORE_DIR
        } else {
            DEFAULT_STORE_DIR
        };
        Self::init_at(&project_root.join(store_name))
    }

    /// Initialize a store at an explicit store root path (idempotent)
    pub fn init_at(store_root: &Path) -> Result<Self> {
        fs::create_dir_all(store_root)?;

        let config_path = store_root.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            let config = StoreConfig::default();
            config.save(&config_path)?;
            config
        };

        let db = Database::open(store_root)?;

        Ok(Store {
            root: store_root.to_path_buf(),
            config,
            db,
        })
    }

    /// Get the store root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Get the database file path
    pub fn db_path(&self) -> PathBuf {
        self.root.join(DB_FILE)
    }

    /// Get the config
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the database
    pub fn db(&self) -> &Database {
        &self.db
    }
}

// Rubric operations
impl Store {
    /// Validate criteria and persist a new rubric version for the event
    pub fn create_rubric(&self, event_id: &str, inputs: &[CriterionInput]) -> Result<Rubric> {
        let criteria = validate_criteria(inputs)?;
        let now = Utc::now();
        let rubric = Rubric {
            id: id::row_id(id::RUBRIC_PREFIX),
            event_id: event_id.to_string(),
            criteria,
            created: now,
            updated: now,
        };
        self.db.insert_rubric(&rubric)?;
        tracing::debug!(rubric_id = %rubric.id, event_id, "rubric created");
        Ok(rubric)
    }

    /// Validate criteria and replace an existing rubric's criteria in place.
    /// Criterion ids supplied by the caller are preserved.
    pub fn update_rubric(
        &self,
        event_id: &str,
        rubric_id: &str,
        inputs: &[CriterionInput],
    ) -> Result<Rubric> {
        let mut rubric = self
            .db
            .get_rubric(rubric_id)?
            .ok_or_else(|| GavelError::not_found("rubric", rubric_id))?;
        if rubric.event_id != event_id {
            return Err(GavelError::not_found("rubric for event", event_id));
        }

        rubric.criteria = validate_criteria(inputs)?;
        rubric.updated = Utc::now();
        self.db.replace_criteria(&rubric)?;
        Ok(rubric)
    }

    /// The event's active rubric: most recently created, or None
    pub fn latest_rubric(&self, event_id: &str) -> Result<Option<Rubric>> {
        self.db.latest_rubric_for_event(event_id)
    }

    /// Fetch a rubric by id
    pub fn rubric(&self, rubric_id: &str) -> Result<Rubric> {
        self.db
            .get_rubric(rubric_id)?
            .ok_or_else(|| GavelError::not_found("rubric", rubric_id))
    }
}

// Submission operations
impl Store {
    /// Register a competing entry. Without an explicit rubric the event's
    /// active rubric is referenced; an event with no rubric yet is an error.
    pub fn add_submission(&self, new: NewSubmission) -> Result<Submission> {
        let rubric_id = match new.rubric_id {
            Some(rubric_id) => {
                self.db
                    .get_rubric(&rubric_id)?
                    .ok_or_else(|| GavelError::not_found("rubric", &rubric_id))?;
                rubric_id
            }
            None => self
                .latest_rubric(&new.event_id)?
                .ok_or_else(|| GavelError::not_found("rubric for event", &new.event_id))?
                .id,
        };

        let submission = Submission {
            id: id::row_id(id::SUBMISSION_PREFIX),
            event_id: new.event_id,
            team_name: new.team_name,
            rubric_id,
            track: new.track,
            table_number: new.table_number,
            repo_url: new.repo_url,
            demo_url: new.demo_url,
            created: Utc::now(),
        };
        self.db.insert_submission(&submission)?;
        Ok(submission)
    }

    pub fn get_submission(&self, submission_id: &str) -> Result<Submission> {
        self.db
            .get_submission(submission_id)?
            .ok_or_else(|| GavelError::not_found("submission", submission_id))
    }

    pub fn list_submissions(&self, event_id: &str) -> Result<Vec<Submission>> {
        self.db.list_submissions(event_id)
    }
}

// Assignment operations
impl Store {
    /// Bind a judge to a submission for scoring
    pub fn assign_judge(&self, judge_id: &str, submission_id: &str) -> Result<JudgeAssignment> {
        let submission = self.get_submission(submission_id)?;

        if self.db.assignment_exists(judge_id, submission_id)? {
            return Err(GavelError::already_exists(
                "assignment",
                format!("{}/{}", judge_id, submission_id),
            ));
        }

        let now = Utc::now();
        let assignment = JudgeAssignment {
            id: id::row_id(id::ASSIGNMENT_PREFIX),
            event_id: submission.event_id,
            judge_id: judge_id.to_string(),
            submission_id: submission_id.to_string(),
            status: AssignmentStatus::Assigned,
            created: now,
            updated: now,
        };
        self.db.insert_assignment(&assignment)?;
        Ok(assignment)
    }

    pub fn get_assignment(&self, assignment_id: &str) -> Result<JudgeAssignment> {
        self.db
            .get_assignment(assignment_id)?
            .ok_or_else(|| GavelError::not_found("assignment", assignment_id))
    }

    pub fn list_assignments(
        &self,
        event_id: &str,
        judge_id: Option<&str>,
        status: Option<AssignmentStatus>,
    ) -> Result<Vec<JudgeAssignment>> {
        self.db.list_assignments(event_id, judge_id, status)
    }

    /// Mark an assignment as being worked on: `assigned -> in_progress`
    pub fn start_assignment(&self, assignment_id: &str) -> Result<JudgeAssignment> {
        let mut assignment = self.get_assignment(assignment_id)?;
        assignment.transition(AssignmentStatus::InProgress, Utc::now())?;
        self.db.update_assignment_status(&assignment)?;
        Ok(assignment)
    }
}

// Score operations
impl Store {
    /// Record a judge's score for their assignment and complete it.
    ///
    /// Raw values for known criteria must lie in `[0, max_score]` - this is
    /// the input boundary where bounds are enforced; the normalizer itself
    /// never clamps. Unknown criterion ids are carried through with a
    /// warning. One score per (judge, submission); resubmission is rejected.
    pub fn submit_score(&self, payload: ScoreSubmission) -> Result<Score> {
        let mut assignment = self.get_assignment(&payload.assignment_id)?;

        if assignment.status == AssignmentStatus::Completed
            || self
                .db
                .score_exists(&assignment.judge_id, &assignment.submission_id)?
        {
            return Err(GavelError::already_exists(
                "score",
                format!("{}/{}", assignment.judge_id, assignment.submission_id),
            ));
        }

        let submission = self.get_submission(&assignment.submission_id)?;
        let rubric = self
            .db
            .get_rubric(&submission.rubric_id)?
            .ok_or_else(|| GavelError::not_found("rubric", &submission.rubric_id))?;

        for (cid, value) in &payload.raw_scores {
            match rubric.criterion(cid) {
                Some(criterion) => {
                    if !value.is_finite() || *value < 0.0 || *value > criterion.max_score {
                        return Err(GavelError::invalid_value(
                            &format!("score for {} (0..={})", cid, criterion.max_score),
                            value,
                        ));
                    }
                }
                None => warn!(
                    assignment_id = %assignment.id,
                    criterion_id = %cid,
                    "submitted score references a criterion the rubric does not define"
                ),
            }
        }

        let now = Utc::now();
        let score = Score {
            id: id::row_id(id::SCORE_PREFIX),
            assignment_id: assignment.id.clone(),
            judge_id: assignment.judge_id.clone(),
            submission_id: assignment.submission_id.clone(),
            rubric_id: rubric.id,
            raw_scores: payload.raw_scores,
            comments: payload.comments,
            private_notes: payload.private_notes,
            created: now,
        };

        assignment.transition(AssignmentStatus::Completed, now)?;
        self.db.insert_score_completing_assignment(&score, &assignment)?;
        Ok(score)
    }

    pub fn score_for_assignment(&self, assignment_id: &str) -> Result<Score> {
        self.db
            .score_for_assignment(assignment_id)?
            .ok_or_else(|| GavelError::not_found("score for assignment", assignment_id))
    }
}

// Leaderboard
impl Store {
    /// Recompute the full leaderboard for an event from persisted rows.
    /// Zero submissions is a valid empty board, not an error.
    pub fn leaderboard(&self, event_id: &str) -> Result<Leaderboard> {
        let submissions = self.db.list_submissions(event_id)?;
        let scores = self.db.scores_by_submission(event_id)?;

        let mut rubrics = HashMap::new();
        for score in scores.values().flatten() {
            if !rubrics.contains_key(&score.rubric_id) {
                let rubric = self
                    .db
                    .get_rubric(&score.rubric_id)?
                    .ok_or_else(|| GavelError::not_found("rubric", &score.rubric_id))?;
                rubrics.insert(score.rubric_id.clone(), rubric);
            }
        }

        build_leaderboard(
            event_id,
            self.config.leaderboard.enabled,
            &submissions,
            &scores,
            &rubrics,
            Utc::now(),
        )
    }
}
