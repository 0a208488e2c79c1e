use rusqlite::params;

use crate::assignment::{AssignmentStatus, JudgeAssignment};
use crate::error::{GavelError, Result};

use super::parse_timestamp;

const ASSIGNMENT_COLUMNS: &str = "id, event_id, judge_id, submission_id, status, created, updated";

struct AssignmentRow {
    id: String,
    event_id: String,
    judge_id: String,
    submission_id: String,
    status: String,
    created: String,
    updated: String,
}

fn assignment_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<AssignmentRow> {
    Ok(AssignmentRow {
        id: r.get(0)?,
        event_id: r.get(1)?,
        judge_id: r.get(2)?,
        submission_id: r.get(3)?,
        status: r.get(4)?,
        created: r.get(5)?,
        updated: r.get(6)?,
    })
}

impl AssignmentRow {
    fn into_assignment(self) -> Result<JudgeAssignment> {
        Ok(JudgeAssignment {
            status: self.status.parse()?,
            created: parse_timestamp("created", &self.created)?,
            updated: parse_timestamp("updated", &self.updated)?,
            id: self.id,
            event_id: self.event_id,
            judge_id: self.judge_id,
            submission_id: self.submission_id,
        })
    }
}

impl super::Database {
    pub fn insert_assignment(&self, assignment: &JudgeAssignment) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO assignments (id, event_id, judge_id, submission_id, status, created, updated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    assignment.id,
                    assignment.event_id,
                    assignment.judge_id,
                    assignment.submission_id,
                    assignment.status.to_string(),
                    assignment.created.to_rfc3339(),
                    assignment.updated.to_rfc3339()
                ],
            )
            .map_err(|e| GavelError::db_operation("insert assignment", e))?;
        Ok(())
    }

    pub fn get_assignment(&self, assignment_id: &str) -> Result<Option<JudgeAssignment>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM assignments WHERE id = ?1", ASSIGNMENT_COLUMNS),
                params![assignment_id],
                assignment_from_row,
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(GavelError::db_operation("get assignment", other)),
            })?;

        row.map(AssignmentRow::into_assignment).transpose()
    }

    pub fn assignment_exists(&self, judge_id: &str, submission_id: &str) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM assignments WHERE judge_id = ?1 AND submission_id = ?2",
                params![judge_id, submission_id],
                |r| r.get(0),
            )
            .map_err(|e| GavelError::db_operation("check assignment", e))?;
        Ok(count > 0)
    }

    pub fn update_assignment_status(&self, assignment: &JudgeAssignment) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE assignments SET status = ?2, updated = ?3 WHERE id = ?1",
                params![
                    assignment.id,
                    assignment.status.to_string(),
                    assignment.updated.to_rfc3339()
                ],
            )
            .map_err(|e| GavelError::db_operation("update assignment", e))?;
        if changed == 0 {
            return Err(GavelError::not_found("assignment", &assignment.id));
        }
        Ok(())
    }

    pub fn list_assignments(
        &self,
        event_id: &str,
        judge_id: Option<&str>,
        status: Option<AssignmentStatus>,
    ) -> Result<Vec<JudgeAssignment>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM assignments WHERE event_id = ?1
                 AND (?2 IS NULL OR judge_id = ?2)
                 AND (?3 IS NULL OR status = ?3)
                 ORDER BY created, id",
                ASSIGNMENT_COLUMNS
            ))
            .map_err(|e| GavelError::db_operation("prepare assignments query", e))?;

        let rows = stmt
            .query_map(
                params![event_id, judge_id, status.map(|s| s.to_string())],
                assignment_from_row,
            )
            .map_err(|e| GavelError::db_operation("query assignments", e))?;

        let mut assignments = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| GavelError::db_operation("read assignment", e))?;
            assignments.push(raw.into_assignment()?);
        }
        Ok(assignments)
    }
}
