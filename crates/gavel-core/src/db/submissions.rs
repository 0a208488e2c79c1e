use rusqlite::params;

use crate::error::{GavelError, Result};
use crate::submission::Submission;

use super::parse_timestamp;

const SUBMISSION_COLUMNS: &str =
    "id, event_id, team_name, rubric_id, track, table_number, repo_url, demo_url, created";

struct SubmissionRow {
    id: String,
    event_id: String,
    team_name: String,
    rubric_id: String,
    track: Option<String>,
    table_number: Option<i64>,
    repo_url: Option<String>,
    demo_url: Option<String>,
    created: String,
}

fn submission_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<SubmissionRow> {
    Ok(SubmissionRow {
        id: r.get(0)?,
        event_id: r.get(1)?,
        team_name: r.get(2)?,
        rubric_id: r.get(3)?,
        track: r.get(4)?,
        table_number: r.get(5)?,
        repo_url: r.get(6)?,
        demo_url: r.get(7)?,
        created: r.get(8)?,
    })
}

impl SubmissionRow {
    fn into_submission(self) -> Result<Submission> {
        Ok(Submission {
            created: parse_timestamp("created", &self.created)?,
            id: self.id,
            event_id: self.event_id,
            team_name: self.team_name,
            rubric_id: self.rubric_id,
            track: self.track,
            table_number: self.table_number,
            repo_url: self.repo_url,
            demo_url: self.demo_url,
        })
    }
}

impl super::Database {
    pub fn insert_submission(&self, submission: &Submission) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO submissions
                 (id, event_id, team_name, rubric_id, track, table_number, repo_url, demo_url, created)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    submission.id,
                    submission.event_id,
                    submission.team_name,
                    submission.rubric_id,
                    submission.track,
                    submission.table_number,
                    submission.repo_url,
                    submission.demo_url,
                    submission.created.to_rfc3339()
                ],
            )
            .map_err(|e| GavelError::db_operation("insert submission", e))?;
        Ok(())
    }

    pub fn get_submission(&self, submission_id: &str) -> Result<Option<Submission>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM submissions WHERE id = ?1", SUBMISSION_COLUMNS),
                params![submission_id],
                submission_from_row,
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(GavelError::db_operation("get submission", other)),
            })?;

        row.map(SubmissionRow::into_submission).transpose()
    }

    /// All submissions for an event, ordered by creation time then id.
    /// This ordering is the leaderboard tie-break: earliest-submitted wins.
    pub fn list_submissions(&self, event_id: &str) -> Result<Vec<Submission>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM submissions WHERE event_id = ?1 ORDER BY created, rowid",
                SUBMISSION_COLUMNS
            ))
            .map_err(|e| GavelError::db_operation("prepare submissions query", e))?;

        let rows = stmt
            .query_map(params![event_id], submission_from_row)
            .map_err(|e| GavelError::db_operation("query submissions", e))?;

        let mut submissions = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| GavelError::db_operation("read submission", e))?;
            submissions.push(raw.into_submission()?);
        }
        Ok(submissions)
    }
}
