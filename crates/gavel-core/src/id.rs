//! Identifier generation for gavel entities
//!
//! Two schemes:
//! - Criterion ids: `cr-<slug>` derived from the criterion name, extended
//!   with an adaptive-length hash suffix on collision. Stable across rubric
//!   updates so persisted scores keep resolving.
//! - Row ids: `<prefix>-<ulid>` for rubrics, submissions, assignments and
//!   scores. Time-ordered, collision-resistant for concurrent writers.

use std::collections::HashSet;

use sha2::{Digest, Sha256};
use ulid::Ulid;

/// Prefix for rubric row ids
pub const RUBRIC_PREFIX: &str = "rub";
/// Prefix for submission row ids
pub const SUBMISSION_PREFIX: &str = "sub";
/// Prefix for assignment row ids
pub const ASSIGNMENT_PREFIX: &str = "asn";
/// Prefix for score row ids
pub const SCORE_PREFIX: &str = "sco";

/// Minimum hash suffix length (4 hex chars)
const MIN_HASH_LEN: usize = 4;

/// Maximum hash suffix length (64 hex chars for SHA256)
const MAX_HASH_LEN: usize = 64;

/// Generate a time-ordered row id with the given entity prefix
pub fn row_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new().to_string().to_lowercase())
}

/// Generate a stable id for a criterion from its name.
///
/// The base form is `cr-<slug>`. If that collides with an id already in
/// `existing` (two criteria named the same, or a slug collision), a hash
/// suffix is appended, growing from 4 hex chars until the id is unique.
pub fn criterion_id(name: &str, existing: &HashSet<String>) -> String {
    let slug = slug::slugify(name);
    let base = if slug.is_empty() {
        "cr-criterion".to_string()
    } else {
        format!("cr-{}", slug)
    };

    if !existing.contains(&base) {
        return base;
    }

    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(existing.len().to_le_bytes());
    let digest = hex::encode(hasher.finalize());

    let mut len = MIN_HASH_LEN;
    loop {
        let candidate = format!("{}-{}", base, &digest[..len]);
        if !existing.contains(&candidate) {
            return candidate;
        }
        if len >= MAX_HASH_LEN {
            // Full digest collided; fall back to a ulid suffix
            return format!("{}-{}", base, Ulid::new().to_string().to_lowercase());
        }
        len += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_id_prefix_and_uniqueness() {
        let a = row_id(SUBMISSION_PREFIX);
        let b = row_id(SUBMISSION_PREFIX);
        assert!(a.starts_with("sub-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_criterion_id_slugs_name() {
        let existing = HashSet::new();
        assert_eq!(criterion_id("Technical Merit", &existing), "cr-technical-merit");
    }

    #[test]
    fn test_criterion_id_empty_name_falls_back() {
        let existing = HashSet::new();
        assert_eq!(criterion_id("", &existing), "cr-criterion");
    }

    #[test]
    fn test_criterion_id_collision_gets_suffix() {
        let mut existing = HashSet::new();
        existing.insert(criterion_id("Design", &existing));

        let second = criterion_id("Design", &existing);
        assert_ne!(second, "cr-design");
        assert!(second.starts_with("cr-design-"));

        existing.insert(second.clone());
        let third = criterion_id("Design", &existing);
        assert_ne!(third, second);
    }
}
