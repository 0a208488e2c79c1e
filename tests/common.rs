use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn gavel() -> Command {
    cargo_bin_cmd!("gavel")
}

/// First stdout line of a successful command (the id in human format)
#[allow(dead_code)]
pub fn run_for_id(dir: &Path, args: &[&str]) -> String {
    let output = gavel()
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run gavel");
    assert!(
        output.status.success(),
        "gavel {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Parse a successful command's stdout as JSON
#[allow(dead_code)]
pub fn run_for_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = gavel()
        .current_dir(dir)
        .args(["--format", "json"])
        .args(args)
        .output()
        .expect("failed to run gavel");
    assert!(
        output.status.success(),
        "gavel {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout was not valid JSON")
}

/// Write a criteria file: Technical 60% (max 10), Design 40% (max 10)
#[allow(dead_code)]
pub fn write_criteria_60_40(dir: &Path) -> PathBuf {
    write_criteria(
        dir,
        r#"[
            {"name": "Technical", "description": "Engineering quality", "weight": 60, "max_score": 10},
            {"name": "Design", "weight": 40, "max_score": 10}
        ]"#,
    )
}

#[allow(dead_code)]
pub fn write_criteria(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("criteria.json");
    fs::write(&path, json).unwrap();
    path
}

/// Initialize a store and create the standard 60/40 rubric for `event`
#[allow(dead_code)]
pub fn setup_event(dir: &Path, event: &str) -> String {
    gavel().current_dir(dir).arg("init").assert().success();
    let criteria = write_criteria_60_40(dir);
    run_for_id(
        dir,
        &[
            "rubric",
            "create",
            "--event",
            event,
            "--criteria-file",
            criteria.to_str().unwrap(),
        ],
    )
}

/// Register a submission for the event, returning its id
#[allow(dead_code)]
pub fn add_submission(dir: &Path, event: &str, team: &str) -> String {
    run_for_id(
        dir,
        &["submission", "add", "--event", event, "--team", team],
    )
}

/// Assign a judge to a submission, returning the assignment id
#[allow(dead_code)]
pub fn assign_judge(dir: &Path, judge: &str, submission: &str) -> String {
    run_for_id(
        dir,
        &["assign", "add", "--judge", judge, "--submission", submission],
    )
}

/// Submit raw scores for an assignment
#[allow(dead_code)]
pub fn submit_scores(dir: &Path, assignment: &str, scores: &[(&str, f64)]) {
    let mut cmd = gavel();
    cmd.current_dir(dir)
        .args(["score", "submit", "--assignment", assignment]);
    for (cid, value) in scores {
        cmd.args(["--score", &format!("{}={}", cid, value)]);
    }
    cmd.assert().success();
}
