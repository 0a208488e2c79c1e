use rusqlite::params;

use crate::error::{GavelError, Result};
use crate::rubric::{Criterion, Rubric};

use super::parse_timestamp;

impl super::Database {
    pub fn insert_rubric(&self, rubric: &Rubric) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| GavelError::db_operation("begin rubric insert", e))?;

        tx.execute(
            "INSERT INTO rubrics (id, event_id, created, updated) VALUES (?1, ?2, ?3, ?4)",
            params![
                rubric.id,
                rubric.event_id,
                rubric.created.to_rfc3339(),
                rubric.updated.to_rfc3339()
            ],
        )
        .map_err(|e| GavelError::db_operation("insert rubric", e))?;

        insert_criteria(&tx, &rubric.id, &rubric.criteria)?;

        tx.commit()
            .map_err(|e| GavelError::db_operation("commit rubric insert", e))?;
        Ok(())
    }

    /// Replace a rubric's criteria array in place, bumping `updated`
    pub fn replace_criteria(&self, rubric: &Rubric) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| GavelError::db_operation("begin rubric update", e))?;

        let changed = tx
            .execute(
                "UPDATE rubrics SET updated = ?2 WHERE id = ?1",
                params![rubric.id, rubric.updated.to_rfc3339()],
            )
            .map_err(|e| GavelError::db_operation("update rubric", e))?;
        if changed == 0 {
            return Err(GavelError::not_found("rubric", &rubric.id));
        }

        tx.execute("DELETE FROM criteria WHERE rubric_id = ?1", params![rubric.id])
            .map_err(|e| GavelError::db_operation("clear criteria", e))?;
        insert_criteria(&tx, &rubric.id, &rubric.criteria)?;

        tx.commit()
            .map_err(|e| GavelError::db_operation("commit rubric update", e))?;
        Ok(())
    }

    pub fn get_rubric(&self, rubric_id: &str) -> Result<Option<Rubric>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, event_id, created, updated FROM rubrics WHERE id = ?1",
                params![rubric_id],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                        r.get::<_, String>(3)?,
                    ))
                },
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(GavelError::db_operation("get rubric", other)),
            })?;

        match row {
            None => Ok(None),
            Some((id, event_id, created, updated)) => {
                let criteria = self.criteria_for_rubric(&id)?;
                Ok(Some(Rubric {
                    created: parse_timestamp("created", &created)?,
                    updated: parse_timestamp("updated", &updated)?,
                    id,
                    event_id,
                    criteria,
                }))
            }
        }
    }

    /// The most recently created rubric for an event, or None
    pub fn latest_rubric_for_event(&self, event_id: &str) -> Result<Option<Rubric>> {
        let id: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM rubrics WHERE event_id = ?1 ORDER BY created DESC, rowid DESC LIMIT 1",
                params![event_id],
                |r| r.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(GavelError::db_operation("get latest rubric", other)),
            })?;

        match id {
            None => Ok(None),
            Some(id) => self.get_rubric(&id),
        }
    }

    fn criteria_for_rubric(&self, rubric_id: &str) -> Result<Vec<Criterion>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, description, weight, max_score FROM criteria
                 WHERE rubric_id = ?1 ORDER BY position",
            )
            .map_err(|e| GavelError::db_operation("prepare criteria query", e))?;

        let rows = stmt
            .query_map(params![rubric_id], |r| {
                Ok(Criterion {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    description: r.get(2)?,
                    weight: r.get(3)?,
                    max_score: r.get(4)?,
                })
            })
            .map_err(|e| GavelError::db_operation("query criteria", e))?;

        let mut criteria = Vec::new();
        for row in rows {
            criteria.push(row.map_err(|e| GavelError::db_operation("read criterion", e))?);
        }
        Ok(criteria)
    }
}

fn insert_criteria(
    conn: &rusqlite::Connection,
    rubric_id: &str,
    criteria: &[Criterion],
) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "INSERT INTO criteria (rubric_id, id, name, description, weight, max_score, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(|e| GavelError::db_operation("prepare criterion insert", e))?;

    for (position, criterion) in criteria.iter().enumerate() {
        stmt.execute(params![
            rubric_id,
            criterion.id,
            criterion.name,
            criterion.description,
            criterion.weight,
            criterion.max_score,
            position as i64
        ])
        .map_err(|e| GavelError::db_operation("insert criterion", e))?;
    }
    Ok(())
}
