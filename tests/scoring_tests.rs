//! Integration tests for the judging flow: submissions, assignments, scores

mod common;

use common::{
    add_submission, assign_judge, gavel, run_for_json, setup_event, submit_scores,
};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_full_judging_flow() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");

    let submission = add_submission(dir.path(), "ev-1", "Rustaceans");
    assert!(submission.starts_with("sub-"));

    let assignment = assign_judge(dir.path(), "judge-1", &submission);
    assert!(assignment.starts_with("asn-"));

    // assigned -> in_progress
    gavel()
        .current_dir(dir.path())
        .args(["score", "start", "--assignment", &assignment])
        .assert()
        .success()
        .stdout(predicate::str::contains("in_progress"));

    // in_progress -> completed via submission
    submit_scores(dir.path(), &assignment, &[("cr-technical", 8.0), ("cr-design", 6.0)]);

    let json = run_for_json(
        dir.path(),
        &["assign", "list", "--event", "ev-1", "--status", "completed"],
    );
    let assignments = json["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["id"], assignment.as_str());
    assert_eq!(assignments[0]["status"], "completed");
}

#[test]
fn test_submission_add_without_rubric_fails() {
    let dir = tempdir().unwrap();
    gavel().current_dir(dir.path()).arg("init").assert().success();

    gavel()
        .current_dir(dir.path())
        .args(["submission", "add", "--event", "ev-1", "--team", "Early Birds"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_submission_metadata_round_trips() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");

    gavel()
        .current_dir(dir.path())
        .args(["submission", "add", "--event", "ev-1", "--team", "Rustaceans"])
        .args(["--track", "ai", "--table", "12"])
        .args(["--repo", "https://example.com/repo"])
        .assert()
        .success();

    let json = run_for_json(dir.path(), &["submission", "list", "--event", "ev-1"]);
    let submissions = json["submissions"].as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["team_name"], "Rustaceans");
    assert_eq!(submissions[0]["track"], "ai");
    assert_eq!(submissions[0]["table_number"], 12);
    assert_eq!(submissions[0]["repo_url"], "https://example.com/repo");
}

#[test]
fn test_duplicate_assignment_rejected() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");
    let submission = add_submission(dir.path(), "ev-1", "Team A");

    assign_judge(dir.path(), "judge-1", &submission);
    gavel()
        .current_dir(dir.path())
        .args(["assign", "add", "--judge", "judge-1", "--submission", &submission])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_assignment_for_unknown_submission_rejected() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");

    gavel()
        .current_dir(dir.path())
        .args(["assign", "add", "--judge", "judge-1", "--submission", "sub-missing"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("submission not found"));
}

#[test]
fn test_score_out_of_range_rejected() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");
    let submission = add_submission(dir.path(), "ev-1", "Team A");
    let assignment = assign_judge(dir.path(), "judge-1", &submission);

    // max_score for cr-technical is 10
    gavel()
        .current_dir(dir.path())
        .args(["score", "submit", "--assignment", &assignment])
        .args(["--score", "cr-technical=11"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn test_score_malformed_pair_rejected() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");
    let submission = add_submission(dir.path(), "ev-1", "Team A");
    let assignment = assign_judge(dir.path(), "judge-1", &submission);

    gavel()
        .current_dir(dir.path())
        .args(["score", "submit", "--assignment", &assignment])
        .args(["--score", "cr-technical"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected criterion-id=value"));
}

#[test]
fn test_unknown_criterion_accepted_with_warning() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");
    let submission = add_submission(dir.path(), "ev-1", "Team A");
    let assignment = assign_judge(dir.path(), "judge-1", &submission);

    // A typo'd criterion id does not fail the submission; it is carried
    // through and ignored by the scoring math.
    gavel()
        .current_dir(dir.path())
        .args(["score", "submit", "--assignment", &assignment])
        .args(["--score", "cr-technical=8", "--score", "cr-typo=5"])
        .assert()
        .success();

    let json = run_for_json(dir.path(), &["score", "show", "--assignment", &assignment]);
    assert_eq!(json["score"]["raw_scores"]["cr-typo"], 5.0);
}

#[test]
fn test_resubmission_rejected() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");
    let submission = add_submission(dir.path(), "ev-1", "Team A");
    let assignment = assign_judge(dir.path(), "judge-1", &submission);

    submit_scores(dir.path(), &assignment, &[("cr-technical", 8.0)]);

    gavel()
        .current_dir(dir.path())
        .args(["score", "submit", "--assignment", &assignment])
        .args(["--score", "cr-technical=9"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_completed_assignment_cannot_restart() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");
    let submission = add_submission(dir.path(), "ev-1", "Team A");
    let assignment = assign_judge(dir.path(), "judge-1", &submission);
    submit_scores(dir.path(), &assignment, &[("cr-technical", 8.0)]);

    gavel()
        .current_dir(dir.path())
        .args(["score", "start", "--assignment", &assignment])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cannot move from completed"));
}

#[test]
fn test_score_show_redacts_private_notes() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");
    let submission = add_submission(dir.path(), "ev-1", "Team A");
    let assignment = assign_judge(dir.path(), "judge-1", &submission);

    gavel()
        .current_dir(dir.path())
        .args(["score", "submit", "--assignment", &assignment])
        .args(["--score", "cr-technical=8"])
        .args(["--comments", "clean build"])
        .args(["--private-notes", "verify claims with team"])
        .assert()
        .success();

    let json = run_for_json(dir.path(), &["score", "show", "--assignment", &assignment]);
    assert_eq!(json["score"]["comments"], "clean build");
    assert!(json["score"].get("private_notes").is_none() || json["score"]["private_notes"].is_null());

    let json = run_for_json(
        dir.path(),
        &["score", "show", "--assignment", &assignment, "--with-private"],
    );
    assert_eq!(json["score"]["private_notes"], "verify claims with team");
}

#[test]
fn test_judge_running_total_displayed() {
    let dir = tempdir().unwrap();
    setup_event(dir.path(), "ev-1");
    let submission = add_submission(dir.path(), "ev-1", "Team A");
    let assignment = assign_judge(dir.path(), "judge-1", &submission);

    // (8/10*100)*0.6 + (6/10*100)*0.4 = 48 + 24 = 72
    gavel()
        .current_dir(dir.path())
        .args(["score", "submit", "--assignment", &assignment])
        .args(["--score", "cr-technical=8", "--score", "cr-design=6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weighted total: 72.0%"));
}
