//! End-to-end tests for the `alertbot` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn alertbot() -> Command {
    let mut cmd = Command::cargo_bin("alertbot").unwrap();
    for var in [
        "ALERTBOT_CONFIG",
        "ALERTBOT_CREATED_BY",
        "ALERTBOT_COMMENT",
        "ALERTBOT_MAINTENANCE_DEFAULT_HOURS",
        "ALERTBOT_MAINTENANCE_MAX_HOURS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn parse_normalizes() {
    alertbot()
        .args(["parse", r#"{ job = api, env=~"prod|staging", }"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{job="api",env=~"prod|staging"}"#));
}

#[test]
fn parse_rejects_bad_input() {
    alertbot()
        .args(["parse", r#"foo="a"b""#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unescaped double quote"));
}

#[test]
fn parse_json_output() {
    alertbot()
        .args(["--format", "json", "parse", r#"env!="dev""#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""isEqual": false"#))
        .stdout(predicate::str::contains(r#""isRegex": false"#));
}

#[test]
fn match_exit_codes() {
    alertbot()
        .args(["match", r#"alertname="HighCPU""#, "-l", "alertname=HighCPU"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Result:    match"));

    alertbot()
        .args(["match", r#"alertname="HighCPU""#, "-l", "alertname=DiskFull"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("no match"));
}

#[test]
fn match_rejects_bad_label() {
    alertbot()
        .args(["match", "a=b", "-l", "oops"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn state_reports_pending() {
    alertbot()
        .args([
            "state",
            "--starts-at",
            "2026-03-01T10:00:00Z",
            "--ends-at",
            "2026-03-01T12:00:00Z",
            "--now",
            "2026-03-01T09:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("State:      pending"));
}

#[test]
fn maintenance_uses_env_author() {
    alertbot()
        .env("ALERTBOT_CREATED_BY", "night-shift")
        .args(["--format", "json", "maintenance", "--hours", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""createdBy": "night-shift""#))
        .stdout(predicate::str::contains(r#""value": ".+""#));
}

#[test]
fn maintenance_rejects_invalid_config() {
    let config = json_file(r#"{"maintenance_max_hours": 0}"#);
    alertbot()
        .arg("--config")
        .arg(config.path())
        .arg("maintenance")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn maintenance_rejects_huge_bounds() {
    alertbot()
        .args([
            "--maintenance-max-hours",
            "9223372036854775807",
            "maintenance",
            "--hours",
            "100000000000000",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("maintenance_max_hours must be between"));
}

#[test]
fn target_builds_silence() {
    let alerts = json_file(
        r#"[{"fingerprint": "f1", "labels": {"alertname": "DiskFull", "instance": "db-1"}}]"#,
    );
    alertbot()
        .args(["target", "f1", "--preset", "2w", "--alerts"])
        .arg(alerts.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"Matchers:    {alertname="DiskFull",instance="db-1"}"#,
        ))
        .stdout(predicate::str::contains("Created By:  alertmanager-bot"));
}

#[test]
fn target_with_no_alerts() {
    let alerts = json_file("[]");
    alertbot()
        .args(["target", "f1", "--alerts"])
        .arg(alerts.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no alerts found right now"));
}
