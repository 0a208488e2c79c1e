//! SQLite database schema for gavel

use rusqlite::{Connection, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
-- Rubric versions per event; latest by creation time is active
CREATE TABLE IF NOT EXISTS rubrics (
    id TEXT PRIMARY KEY,
    event_id TEXT NOT NULL,
    created TEXT NOT NULL,
    updated TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_rubrics_event ON rubrics(event_id, created);

-- Criteria owned by their rubric; position preserves display order
CREATE TABLE IF NOT EXISTS criteria (
    rubric_id TEXT NOT NULL REFERENCES rubrics(id) ON DELETE CASCADE,
    id TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    weight REAL NOT NULL,
    max_score REAL NOT NULL,
    position INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (rubric_id, id)
);

-- Competing entries
CREATE TABLE IF NOT EXISTS submissions (
    id TEXT PRIMARY KEY,
    event_id TEXT NOT NULL,
    team_name TEXT NOT NULL,
    rubric_id TEXT NOT NULL REFERENCES rubrics(id),
    track TEXT,
    table_number INTEGER,
    repo_url TEXT,
    demo_url TEXT,
    created TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_submissions_event ON submissions(event_id, created);

-- Judge/submission bindings with status state machine
CREATE TABLE IF NOT EXISTS assignments (
    id TEXT PRIMARY KEY,
    event_id TEXT NOT NULL,
    judge_id TEXT NOT NULL,
    submission_id TEXT NOT NULL REFERENCES submissions(id),
    status TEXT NOT NULL DEFAULT 'assigned',
    created TEXT NOT NULL,
    updated TEXT NOT NULL,
    UNIQUE (judge_id, submission_id)
);
CREATE INDEX IF NOT EXISTS idx_assignments_event ON assignments(event_id);
CREATE INDEX IF NOT EXISTS idx_assignments_judge ON assignments(judge_id);

-- One score row per (judge, submission); immutable once written
CREATE TABLE IF NOT EXISTS scores (
    id TEXT PRIMARY KEY,
    assignment_id TEXT NOT NULL REFERENCES assignments(id),
    judge_id TEXT NOT NULL,
    submission_id TEXT NOT NULL REFERENCES submissions(id),
    rubric_id TEXT NOT NULL REFERENCES rubrics(id),
    raw_scores TEXT NOT NULL DEFAULT '{}',
    comments TEXT,
    private_notes TEXT,
    created TEXT NOT NULL,
    UNIQUE (judge_id, submission_id)
);
CREATE INDEX IF NOT EXISTS idx_scores_submission ON scores(submission_id);

-- Store metadata
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

/// Outcome of schema creation
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaState {
    /// Schema present at the current version
    Ok,
    /// Database was written by an incompatible gavel version
    Incompatible { found: i32 },
}

/// Create or verify the schema. Unlike an index that can be rebuilt from
/// files, this database is the source of truth, so an unknown version is
/// surfaced rather than dropped and recreated.
pub fn create_schema(conn: &Connection) -> Result<SchemaState> {
    let current_version: Option<i32> = conn
        .query_row("SELECT value FROM meta WHERE key = 'schema_version'", [], |r| {
            r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0))
        })
        .ok();

    match current_version {
        None => {
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "INSERT OR REPLACE INTO meta (key, value) VALUES ('schema_version', ?1)",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )?;
            Ok(SchemaState::Ok)
        }
        Some(v) if v == CURRENT_SCHEMA_VERSION => Ok(SchemaState::Ok),
        Some(v) => {
            // Known upgrade steps go here as the schema evolves.
            tracing::error!(found = v, expected = CURRENT_SCHEMA_VERSION, "schema version mismatch");
            Ok(SchemaState::Incompatible { found: v })
        }
    }
}
