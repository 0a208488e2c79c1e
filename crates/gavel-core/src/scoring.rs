//! Score normalization and cross-judge aggregation
//!
//! The math here is rubric-driven and pure: storage access stays at the
//! command boundary so every property of the scoring path is unit-testable
//! without a database.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::rubric::Rubric;

/// One judge's raw per-criterion ratings for one submission.
///
/// Immutable once submitted; references the rubric in effect at scoring time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub id: String,
    pub assignment_id: String,
    pub judge_id: String,
    pub submission_id: String,
    pub rubric_id: String,
    /// Criterion id -> raw value. A missing entry means "not scored".
    pub raw_scores: HashMap<String, f64>,
    /// Visible to the committee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Visible only to the submitting judge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_notes: Option<String>,
    pub created: DateTime<Utc>,
}

/// Convert one judge's raw scores into a weighted percentage for the rubric.
///
/// Iteration walks `rubric.criteria`: a present raw value contributes
/// `(raw / max_score) * 100 * (weight / 100)`; an absent criterion
/// contributes exactly zero. Skipped criteria are NOT excluded from the
/// denominator - a judge who skips one zeroes it out rather than reweighting
/// the rest. Raw values are not clamped here; bounds are enforced where
/// scores enter the system.
///
/// Criterion ids in `raw` that the rubric does not know are ignored for the
/// computation but logged, since they would otherwise vanish silently.
pub fn normalize_judge_score(rubric: &Rubric, raw: &HashMap<String, f64>) -> f64 {
    for cid in raw.keys() {
        if rubric.criterion(cid).is_none() {
            warn!(
                rubric_id = %rubric.id,
                criterion_id = %cid,
                "score references unknown criterion, ignoring"
            );
        }
    }

    rubric
        .criteria
        .iter()
        .map(|c| match raw.get(&c.id) {
            Some(value) => (value / c.max_score) * 100.0 * (c.weight / 100.0),
            None => 0.0,
        })
        .sum()
}

/// Average the normalized percentages of every judge who scored a
/// submission. Every judge carries equal weight; no outlier rejection, no
/// minimum count beyond one. `None` for an empty slice - callers drop
/// unscored submissions from the leaderboard instead of ranking them at
/// zero.
pub fn aggregate_scores(percentages: &[f64]) -> Option<f64> {
    if percentages.is_empty() {
        return None;
    }
    Some(percentages.iter().sum::<f64>() / percentages.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::Criterion;
    use chrono::Utc;

    fn rubric(criteria: Vec<(&str, f64, f64)>) -> Rubric {
        Rubric {
            id: "rub-test".to_string(),
            event_id: "ev-test".to_string(),
            criteria: criteria
                .into_iter()
                .map(|(id, weight, max_score)| Criterion {
                    id: id.to_string(),
                    name: id.to_string(),
                    description: String::new(),
                    weight,
                    max_score,
                })
                .collect(),
            created: Utc::now(),
            updated: Utc::now(),
        }
    }

    fn raw(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_all_max_scores_normalize_to_100() {
        let r = rubric(vec![("c1", 60.0, 10.0), ("c2", 40.0, 10.0)]);
        let pct = normalize_judge_score(&r, &raw(&[("c1", 10.0), ("c2", 10.0)]));
        assert_eq!(pct, 100.0);
    }

    #[test]
    fn test_all_zero_scores_normalize_to_0() {
        let r = rubric(vec![("c1", 60.0, 10.0), ("c2", 40.0, 10.0)]);
        let pct = normalize_judge_score(&r, &raw(&[("c1", 0.0), ("c2", 0.0)]));
        assert_eq!(pct, 0.0);
    }

    #[test]
    fn test_weighted_partial_score() {
        // (5/10 * 100) * 0.6 + 0 * 0.4 = 30
        let r = rubric(vec![("c1", 60.0, 10.0), ("c2", 40.0, 10.0)]);
        let pct = normalize_judge_score(&r, &raw(&[("c1", 5.0), ("c2", 0.0)]));
        assert_eq!(pct, 30.0);
    }

    #[test]
    fn test_missing_criterion_contributes_zero() {
        // Omitting c2 must equal scoring it 0, not reweighting c1 to 100%.
        let r = rubric(vec![("c1", 60.0, 10.0), ("c2", 40.0, 10.0)]);
        let omitted = normalize_judge_score(&r, &raw(&[("c1", 10.0)]));
        let zeroed = normalize_judge_score(&r, &raw(&[("c1", 10.0), ("c2", 0.0)]));
        assert_eq!(omitted, 60.0);
        assert_eq!(omitted, zeroed);
    }

    #[test]
    fn test_unknown_criterion_ids_ignored() {
        let r = rubric(vec![("c1", 100.0, 10.0)]);
        let pct = normalize_judge_score(&r, &raw(&[("c1", 10.0), ("bogus", 10.0)]));
        assert_eq!(pct, 100.0);
    }

    #[test]
    fn test_no_clamping_of_out_of_range_raw_values() {
        // The engine trusts its input; bounds are enforced at entry.
        let r = rubric(vec![("c1", 100.0, 10.0)]);
        let pct = normalize_judge_score(&r, &raw(&[("c1", 20.0)]));
        assert_eq!(pct, 200.0);
    }

    #[test]
    fn test_uneven_max_scores() {
        // (3/5 * 100) * 0.5 + (40/100 * 100) * 0.5 = 30 + 20 = 50
        let r = rubric(vec![("c1", 50.0, 5.0), ("c2", 50.0, 100.0)]);
        let pct = normalize_judge_score(&r, &raw(&[("c1", 3.0), ("c2", 40.0)]));
        assert_eq!(pct, 50.0);
    }

    #[test]
    fn test_aggregate_is_a_pure_mean() {
        assert_eq!(aggregate_scores(&[80.0, 100.0]), Some(90.0));
    }

    #[test]
    fn test_aggregate_single_judge() {
        assert_eq!(aggregate_scores(&[73.5]), Some(73.5));
    }

    #[test]
    fn test_aggregate_empty_is_none() {
        assert_eq!(aggregate_scores(&[]), None);
    }

    #[test]
    fn test_aggregate_three_judges() {
        assert_eq!(aggregate_scores(&[60.0, 70.0, 80.0]), Some(70.0));
    }
}
