use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn schedguard() -> Command {
    Command::cargo_bin("schedguard").unwrap()
}

const SNAPSHOT: &str = r#"{
    "classA": [{"teacher_id": "T1", "time_spec": "MWF 08:30-09:30", "subject_label": "Math 7"}],
    "classB": [{"teacher_id": "T1", "time_spec": "TTh 08:00-09:00", "subject_label": "Science 7"}]
}"#;

/// Write the shared snapshot to a temp file that is removed on drop.
fn snapshot_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ── overlap ─────────────────────────────────────────────────────────────────

#[test]
fn test_overlap_true() {
    schedguard()
        .args(["overlap", "Mon 07:30-08:30", "Mon 08:00-09:00"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn test_overlap_touching_is_false() {
    schedguard()
        .args(["overlap", "Mon 07:30-08:30", "Mon 08:30-09:30"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn test_overlap_json() {
    let output = schedguard()
        .args(["overlap", "--json", "MWF 07:30-08:30", "Wed 08:00-09:00"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["overlap"], true);
    assert_eq!(v["overlap_minutes"], 30);
    assert_eq!(v["parsed_a"]["days"], serde_json::json!([1, 3, 5]));
    assert_eq!(v["parsed_b"]["start"], 480);
}

// ── parse ───────────────────────────────────────────────────────────────────

#[test]
fn test_parse_outputs_days_and_minutes() {
    let output = schedguard().args(["parse", "TTh 1:00-2:00"]).output().unwrap();
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["days"], serde_json::json!([2, 4]));
    assert_eq!(v["start"], 60);
    assert_eq!(v["end"], 120);
}

#[test]
fn test_parse_miss_is_null() {
    schedguard()
        .args(["parse", "Room 204 TBA"])
        .assert()
        .success()
        .stdout("null\n");
}

// ── check ───────────────────────────────────────────────────────────────────

#[test]
fn test_check_reports_conflict() {
    let snap = snapshot_file();
    let output = schedguard()
        .args(["check", "--teacher", "T1", "--spec", "Wed 09:00-10:00", "--owner", "classC"])
        .arg("--snapshot")
        .arg(snap.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["conflict"]["existing"]["owner_context"], "classA");
    assert_eq!(v["conflict"]["overlap_minutes"], 30);
    assert!(v["conflict"]["message"]
        .as_str()
        .unwrap()
        .contains("Math 7 (classA)"));
}

#[test]
fn test_check_no_conflict() {
    let snap = snapshot_file();
    schedguard()
        .args(["check", "--teacher", "T1", "--spec", "Fri 09:30-10:30", "--owner", "classC"])
        .arg("--snapshot")
        .arg(snap.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"conflict\": null"));
}

#[test]
fn test_check_owner_excludes_itself() {
    let snap = snapshot_file();
    schedguard()
        .args(["check", "--teacher", "T1", "--spec", "MWF 08:30-09:30", "--owner", "classA"])
        .arg("--snapshot")
        .arg(snap.path())
        .assert()
        .success();
}

#[test]
fn test_check_all_from_stdin() {
    let output = schedguard()
        .args(["check", "--snapshot", "-", "--teacher", "T1", "--spec", "08:45-09:15", "--all"])
        .write_stdin(SNAPSHOT)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let conflicts = v["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0]["existing"]["owner_context"], "classA");
    assert_eq!(conflicts[1]["existing"]["owner_context"], "classB");
}

#[test]
fn test_check_missing_snapshot_fails() {
    schedguard()
        .args([
            "check",
            "--snapshot",
            "/nonexistent/snapshot.json",
            "--teacher",
            "T1",
            "--spec",
            "Mon 08:00-09:00",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to open snapshot"));
}

#[test]
fn test_check_rejects_blank_teacher_in_snapshot() {
    schedguard()
        .args(["check", "--snapshot", "-", "--teacher", "T1", "--spec", "Mon 08:00-09:00"])
        .write_stdin(r#"[{"teacher_id": "", "time_spec": "Mon 08:00-09:00"}]"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("has no teacher_id"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    schedguard().assert().failure().code(2);
}
