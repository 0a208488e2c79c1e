//! Leaderboard ranking
//!
//! The ranker is a pure function over its input list. Entries are sorted
//! descending by aggregated percentage; rank is 1-based and dense, and equal
//! percentages keep their input order. Callers supply submissions ordered by
//! creation time, so the documented tie-break is earliest-submitted-wins.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GavelError, Result};
use crate::rubric::Rubric;
use crate::scoring::{aggregate_scores, normalize_judge_score, Score};
use crate::submission::Submission;

/// Percentage scale ceiling; entries are already normalized to 0-100
pub const MAX_POSSIBLE_SCORE: f64 = 100.0;

/// Input to the ranker: one aggregated submission
#[derive(Debug, Clone, PartialEq)]
pub struct RankInput {
    pub submission_id: String,
    pub team_name: String,
    pub percentage: f64,
}

/// One ranked leaderboard row (derived, recomputed on demand)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub submission_id: String,
    pub team_name: String,
    pub total_score: f64,
    pub max_possible_score: f64,
    pub percentage: f64,
    pub rank: u32,
    pub last_updated: DateTime<Utc>,
}

/// The full ranked leaderboard for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    pub event_id: String,
    pub enabled: bool,
    pub entries: Vec<LeaderboardEntry>,
    pub last_updated: DateTime<Utc>,
}

/// Sort descending by percentage and assign dense 1-based ranks.
///
/// The sort is stable, so equal percentages resolve to input order. `now` is
/// the single computation timestamp stamped on every entry.
pub fn rank_entries(mut inputs: Vec<RankInput>, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
    inputs.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| LeaderboardEntry {
            id: input.submission_id.clone(),
            submission_id: input.submission_id,
            team_name: input.team_name,
            total_score: input.percentage,
            max_possible_score: MAX_POSSIBLE_SCORE,
            percentage: input.percentage,
            rank: index as u32 + 1,
            last_updated: now,
        })
        .collect()
}

/// Compute the full leaderboard from loaded rows.
///
/// `submissions` must be ordered by creation time (the tie-break order).
/// Each score is normalized against the rubric it references - the rubric in
/// effect when the judge scored. Submissions with no scores are excluded
/// entirely rather than ranked at zero; incomplete judging should not
/// penalize an entry against fully-judged peers.
pub fn build_leaderboard(
    event_id: &str,
    enabled: bool,
    submissions: &[Submission],
    scores_by_submission: &HashMap<String, Vec<Score>>,
    rubrics: &HashMap<String, Rubric>,
    now: DateTime<Utc>,
) -> Result<Leaderboard> {
    let mut inputs = Vec::new();

    for submission in submissions {
        let scores = scores_by_submission
            .get(&submission.id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut percentages = Vec::with_capacity(scores.len());
        for score in scores {
            let rubric = rubrics.get(&score.rubric_id).ok_or_else(|| {
                GavelError::not_found("rubric", &score.rubric_id)
            })?;
            percentages.push(normalize_judge_score(rubric, &score.raw_scores));
        }

        if let Some(percentage) = aggregate_scores(&percentages) {
            inputs.push(RankInput {
                submission_id: submission.id.clone(),
                team_name: submission.team_name.clone(),
                percentage,
            });
        }
    }

    Ok(Leaderboard {
        event_id: event_id.to_string(),
        enabled,
        entries: rank_entries(inputs, now),
        last_updated: now,
    })
}
