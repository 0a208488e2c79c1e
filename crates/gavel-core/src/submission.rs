//! Competing entries
//!
//! A submission's descriptive metadata (track, table number, links) is
//! carried through to leaderboard display but never touches the scoring
//! math.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One competing entry in an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub event_id: String,
    pub team_name: String,
    /// The rubric this submission is judged against
    pub rubric_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    pub created: DateTime<Utc>,
}
