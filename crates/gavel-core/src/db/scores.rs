use std::collections::HashMap;

use rusqlite::params;

use crate::assignment::JudgeAssignment;
use crate::error::{GavelError, Result};
use crate::scoring::Score;

use super::parse_timestamp;

const SCORE_COLUMNS: &str =
    "id, assignment_id, judge_id, submission_id, rubric_id, raw_scores, comments, private_notes, created";

struct ScoreRow {
    id: String,
    assignment_id: String,
    judge_id: String,
    submission_id: String,
    rubric_id: String,
    raw_scores: String,
    comments: Option<String>,
    private_notes: Option<String>,
    created: String,
}

fn score_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<ScoreRow> {
    Ok(ScoreRow {
        id: r.get(0)?,
        assignment_id: r.get(1)?,
        judge_id: r.get(2)?,
        submission_id: r.get(3)?,
        rubric_id: r.get(4)?,
        raw_scores: r.get(5)?,
        comments: r.get(6)?,
        private_notes: r.get(7)?,
        created: r.get(8)?,
    })
}

impl ScoreRow {
    fn into_score(self) -> Result<Score> {
        let raw_scores: HashMap<String, f64> = serde_json::from_str(&self.raw_scores)?;
        Ok(Score {
            raw_scores,
            created: parse_timestamp("created", &self.created)?,
            id: self.id,
            assignment_id: self.assignment_id,
            judge_id: self.judge_id,
            submission_id: self.submission_id,
            rubric_id: self.rubric_id,
            comments: self.comments,
            private_notes: self.private_notes,
        })
    }
}

impl super::Database {
    /// Insert a score and complete its assignment in one transaction, so a
    /// `completed` status always implies a persisted score.
    pub fn insert_score_completing_assignment(
        &self,
        score: &Score,
        assignment: &JudgeAssignment,
    ) -> Result<()> {
        let raw_json = serde_json::to_string(&score.raw_scores)?;

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| GavelError::db_operation("begin score insert", e))?;

        tx.execute(
            "INSERT INTO scores
             (id, assignment_id, judge_id, submission_id, rubric_id, raw_scores, comments, private_notes, created)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                score.id,
                score.assignment_id,
                score.judge_id,
                score.submission_id,
                score.rubric_id,
                raw_json,
                score.comments,
                score.private_notes,
                score.created.to_rfc3339()
            ],
        )
        .map_err(|e| GavelError::db_operation("insert score", e))?;

        tx.execute(
            "UPDATE assignments SET status = ?2, updated = ?3 WHERE id = ?1",
            params![
                assignment.id,
                assignment.status.to_string(),
                assignment.updated.to_rfc3339()
            ],
        )
        .map_err(|e| GavelError::db_operation("complete assignment", e))?;

        tx.commit()
            .map_err(|e| GavelError::db_operation("commit score insert", e))?;
        Ok(())
    }

    pub fn score_for_assignment(&self, assignment_id: &str) -> Result<Option<Score>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM scores WHERE assignment_id = ?1", SCORE_COLUMNS),
                params![assignment_id],
                score_from_row,
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(GavelError::db_operation("get score", other)),
            })?;

        row.map(ScoreRow::into_score).transpose()
    }

    pub fn score_exists(&self, judge_id: &str, submission_id: &str) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM scores WHERE judge_id = ?1 AND submission_id = ?2",
                params![judge_id, submission_id],
                |r| r.get(0),
            )
            .map_err(|e| GavelError::db_operation("check score", e))?;
        Ok(count > 0)
    }

    /// All scores for an event's submissions, grouped by submission id
    pub fn scores_by_submission(&self, event_id: &str) -> Result<HashMap<String, Vec<Score>>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM scores
                 WHERE submission_id IN (SELECT id FROM submissions WHERE event_id = ?1)
                 ORDER BY created, id",
                SCORE_COLUMNS
            ))
            .map_err(|e| GavelError::db_operation("prepare scores query", e))?;

        let rows = stmt
            .query_map(params![event_id], score_from_row)
            .map_err(|e| GavelError::db_operation("query scores", e))?;

        let mut grouped: HashMap<String, Vec<Score>> = HashMap::new();
        for row in rows {
            let raw = row.map_err(|e| GavelError::db_operation("read score", e))?;
            let score = raw.into_score()?;
            grouped.entry(score.submission_id.clone()).or_default().push(score);
        }
        Ok(grouped)
    }
}
