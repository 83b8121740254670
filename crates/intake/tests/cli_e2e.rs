#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn intake_cmd(data: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("intake"));
    cmd.env("INTAKE_DATA_DIR", data.as_os_str())
        .env("INTAKE_CREDENTIAL_SOURCE", "none")
        .env_remove("RUST_LOG");
    cmd
}

fn set(data: &Path, path: &str, value: &str) {
    intake_cmd(data)
        .args(["set", path, value])
        .assert()
        .success();
}

fn fill_everything(data: &Path, email: &str) {
    for (path, value) in [
        ("contact.firstName", "Amara"),
        ("contact.lastName", "Okafor"),
        ("contact.email", email),
        ("basics.age", "29"),
        ("basics.education", "Master's Degree"),
        ("language.ieltsListening", "8"),
        ("language.ieltsReading", "7.5"),
        ("language.ieltsWriting", "7"),
        ("language.ieltsSpeaking", "7.5"),
        ("work.0.title", "Data Analyst"),
        ("work.0.employer", "Northwind"),
        ("work.0.city", "Lagos"),
        ("work.0.country", "Nigeria"),
        ("interest.program", "Express Entry"),
    ] {
        set(data, path, value);
    }
}

fn walk_to_review(data: &Path) {
    for _ in 0..5 {
        intake_cmd(data).arg("next").assert().success();
    }
}

#[test]
fn test_naked_invocation_shows_first_step() {
    let temp = TempDir::new().unwrap();
    intake_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact (1/6)"))
        .stdout(predicate::str::contains("contact.email"));
}

#[test]
fn test_invalid_email_blocks_next() {
    let temp = TempDir::new().unwrap();
    set(temp.path(), "contact.firstName", "Amara");
    set(temp.path(), "contact.lastName", "Okafor");
    set(temp.path(), "contact.email", "not-an-email");

    intake_cmd(temp.path())
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact needs attention"))
        .stdout(predicate::str::contains("Enter a valid email address"));

    intake_cmd(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact (1/6)"));
}

#[test]
fn test_unknown_field_and_bad_choice_fail() {
    let temp = TempDir::new().unwrap();
    intake_cmd(temp.path())
        .args(["set", "contact.nickname", "Ami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    intake_cmd(temp.path())
        .args(["set", "interest.program", "Golden Visa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_submit_before_review_fails() {
    let temp = TempDir::new().unwrap();
    intake_cmd(temp.path())
        .arg("submit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_full_session_submits_and_exports() {
    let temp = TempDir::new().unwrap();
    let data = temp.path();

    fill_everything(data, "amara@example.com");
    walk_to_review(data);

    intake_cmd(data)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Review (6/6)"))
        .stdout(predicate::str::contains("Express Entry"));

    intake_cmd(data)
        .args(["submit", "--user", "desk-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submitted Amara Okafor"))
        .stdout(predicate::str::contains(".xlsx"));

    assert!(!data.join("draft.json").exists());
    let exports: Vec<_> = fs::read_dir(data.join("exports")).unwrap().collect();
    assert_eq!(exports.len(), 1);

    intake_cmd(data)
        .args(["ledger", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"email\": \"amara@example.com\""))
        .stdout(predicate::str::contains("\"submittedBy\": \"desk-1\""));

    intake_cmd(data)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact (1/6)"));
}

#[test]
fn test_two_submissions_keep_order_and_clear_needs_yes() {
    let temp = TempDir::new().unwrap();
    let data = temp.path();

    for email in ["first@example.com", "second@example.com"] {
        fill_everything(data, email);
        walk_to_review(data);
        intake_cmd(data).arg("submit").assert().success();
    }

    let output = intake_cmd(data)
        .args(["ledger", "list", "--json"])
        .output()
        .unwrap();
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);
    assert_eq!(records[0]["email"], "first@example.com");
    assert_eq!(records[1]["email"], "second@example.com");

    intake_cmd(data)
        .args(["ledger", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    intake_cmd(data)
        .args(["ledger", "clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 records"));
}

#[test]
fn test_back_from_first_step_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    intake_cmd(temp.path())
        .arg("back")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already on the first step."));
}

#[test]
fn test_config_file_is_honoured() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("intake.toml"),
        "artifact_prefix = \"assessments\"\nexport_on_submit = false\n",
    )
    .unwrap();

    intake_cmd(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("assessments"))
        .stdout(predicate::str::contains("none"));

    intake_cmd(temp.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("assessments-"));
}
