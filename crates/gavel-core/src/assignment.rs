//! Judge assignments
//!
//! An assignment binds a judge to a submission they are responsible for
//! scoring. Status moves `assigned -> in_progress -> completed`, forward
//! only; `completed` is terminal and implies a recorded score.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GavelError, Result};

/// Assignment status state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Assigned,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    fn order(self) -> u8 {
        match self {
            AssignmentStatus::Assigned => 0,
            AssignmentStatus::InProgress => 1,
            AssignmentStatus::Completed => 2,
        }
    }

    /// Forward-only transitions; no state transitions to itself
    pub fn can_transition_to(self, next: AssignmentStatus) -> bool {
        next.order() > self.order()
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentStatus::Assigned => write!(f, "assigned"),
            AssignmentStatus::InProgress => write!(f, "in_progress"),
            AssignmentStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = GavelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "assigned" => Ok(AssignmentStatus::Assigned),
            "in_progress" => Ok(AssignmentStatus::InProgress),
            "completed" => Ok(AssignmentStatus::Completed),
            other => Err(GavelError::invalid_value("assignment status", other)),
        }
    }
}

/// The binding of a judge to a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeAssignment {
    pub id: String,
    pub event_id: String,
    pub judge_id: String,
    pub submission_id: String,
    pub status: AssignmentStatus,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl JudgeAssignment {
    /// Move the assignment to `next`, rejecting backward or repeated
    /// transitions.
    pub fn transition(&mut self, next: AssignmentStatus, now: DateTime<Utc>) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(GavelError::InvalidTransition {
                id: self.id.clone(),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        self.updated = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(status: AssignmentStatus) -> JudgeAssignment {
        JudgeAssignment {
            id: "asn-1".to_string(),
            event_id: "ev-1".to_string(),
            judge_id: "judge-1".to_string(),
            submission_id: "sub-1".to_string(),
            status,
            created: Utc::now(),
            updated: Utc::now(),
        }
    }

    #[test]
    fn test_forward_transitions_allowed() {
        let mut a = assignment(AssignmentStatus::Assigned);
        a.transition(AssignmentStatus::InProgress, Utc::now()).unwrap();
        assert_eq!(a.status, AssignmentStatus::InProgress);
        a.transition(AssignmentStatus::Completed, Utc::now()).unwrap();
        assert_eq!(a.status, AssignmentStatus::Completed);
    }

    #[test]
    fn test_assigned_straight_to_completed() {
        // A judge may score without an explicit start.
        let mut a = assignment(AssignmentStatus::Assigned);
        a.transition(AssignmentStatus::Completed, Utc::now()).unwrap();
        assert_eq!(a.status, AssignmentStatus::Completed);
    }

    #[test]
    fn test_no_reverse_transitions() {
        let mut a = assignment(AssignmentStatus::Completed);
        assert!(matches!(
            a.transition(AssignmentStatus::InProgress, Utc::now()).unwrap_err(),
            GavelError::InvalidTransition { .. }
        ));
        assert_eq!(a.status, AssignmentStatus::Completed);
    }

    #[test]
    fn test_no_self_transition() {
        let mut a = assignment(AssignmentStatus::InProgress);
        assert!(a
            .transition(AssignmentStatus::InProgress, Utc::now())
            .is_err());
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            AssignmentStatus::Assigned,
            AssignmentStatus::InProgress,
            AssignmentStatus::Completed,
        ] {
            assert_eq!(status.to_string().parse::<AssignmentStatus>().unwrap(), status);
        }
        assert!("done".parse::<AssignmentStatus>().is_err());
    }
}
