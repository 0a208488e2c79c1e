//! Weighted scoring rubrics
//!
//! A rubric is the weighted set of criteria submissions are judged against.
//! Weights are percentages and must sum to exactly 100 across the rubric;
//! anything else is rejected before a write reaches the store.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GavelError, Result};
use crate::id;

/// Maximum number of criteria in a rubric
pub const MAX_CRITERIA: usize = 20;

/// Maximum criterion name length
pub const MAX_NAME_LEN: usize = 100;

/// Maximum criterion description length
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// One named, weighted, max-scored dimension of evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Percentage share of the total score, 0-100
    pub weight: f64,
    /// Highest raw score a judge may award, 1-100
    pub max_score: f64,
}

/// Raw criterion payload as it arrives at the boundary, before validation.
/// `id` is absent for newly created criteria and preserved on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriterionInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub weight: f64,
    pub max_score: f64,
}

/// A validated rubric bound to an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    pub id: String,
    pub event_id: String,
    pub criteria: Vec<Criterion>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Rubric {
    /// Look up a criterion by id
    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }
}

/// Validate raw criterion payloads and assign ids where missing.
///
/// Field-level constraints are checked first; the weight-sum invariant is
/// evaluated only once every field passes. The sum must equal exactly 100 -
/// 99.9 and 100.1 are both rejected.
pub fn validate_criteria(inputs: &[CriterionInput]) -> Result<Vec<Criterion>> {
    if inputs.is_empty() || inputs.len() > MAX_CRITERIA {
        return Err(GavelError::CriteriaCount {
            count: inputs.len(),
            max: MAX_CRITERIA,
        });
    }

    for (index, input) in inputs.iter().enumerate() {
        if input.name.trim().is_empty() {
            return Err(GavelError::InvalidCriterion {
                index,
                reason: "name must not be empty".to_string(),
            });
        }
        if input.name.chars().count() > MAX_NAME_LEN {
            return Err(GavelError::InvalidCriterion {
                index,
                reason: format!("name exceeds {} characters", MAX_NAME_LEN),
            });
        }
        if input.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(GavelError::InvalidCriterion {
                index,
                reason: format!("description exceeds {} characters", MAX_DESCRIPTION_LEN),
            });
        }
        if !input.weight.is_finite() || input.weight < 0.0 || input.weight > 100.0 {
            return Err(GavelError::InvalidCriterion {
                index,
                reason: format!("weight {} outside [0, 100]", input.weight),
            });
        }
        if !input.max_score.is_finite() || input.max_score < 1.0 || input.max_score > 100.0 {
            return Err(GavelError::InvalidCriterion {
                index,
                reason: format!("max_score {} outside [1, 100]", input.max_score),
            });
        }
    }

    let total: f64 = inputs.iter().map(|c| c.weight).sum();
    if total != 100.0 {
        return Err(GavelError::WeightSumMismatch { total });
    }

    // Ids provided by the caller (update path) are preserved; the rest are
    // generated from the criterion name, uniquified within this rubric.
    let mut taken: HashSet<String> = inputs.iter().filter_map(|c| c.id.clone()).collect();

    let mut criteria = Vec::with_capacity(inputs.len());
    for input in inputs {
        let cid = match &input.id {
            Some(existing) => existing.clone(),
            None => {
                let generated = id::criterion_id(&input.name, &taken);
                taken.insert(generated.clone());
                generated
            }
        };
        criteria.push(Criterion {
            id: cid,
            name: input.name.clone(),
            description: input.description.clone(),
            weight: input.weight,
            max_score: input.max_score,
        });
    }

    Ok(criteria)
}
