// Test module - relaxed lint rules
#![allow(clippy::indexing_slicing)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(missing_docs)]

//! End-to-end tests of `p4conform run` against stand-in broker scripts.
//!
//! The scripts receive the same argument vector the real client would:
//! `-p port -u user access <level> <path>`, so `$6` is the requested level
//! and `$7` the target path.

use p4conform::model::SuiteResult;
use p4conform_fixtures::{fake_broker_script, temp_dir, write_config, write_fixture, CaseBuilder, ConfigBuilder};
use std::path::Path;
use std::process::{Command, Output};

const GRANT_ONE: &str = r#"echo "Access advice:"
echo "Group groupA grants $6 access to the path $7""#;

const GRANT_NONE: &str = r#"echo "No access advice for this path""#;

const REJECT: &str = r#"echo "action: REJECT"
exit 1"#;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_p4conform"))
        .args(args)
        .output()
        .expect("run p4conform")
}

fn run_fixture(dir: &Path, script: &Path, rows: &[String], extra: &[&str]) -> Output {
    let fixture = dir.join("suite.csv");
    write_fixture(&fixture, rows);
    let mut args = vec![
        "run",
        "--json",
        "--fixture",
        fixture.to_str().unwrap(),
        "--broker-command",
        script.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    run_cli(&args)
}

fn parse_report(output: &Output) -> SuiteResult {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("suite result json")
}

#[test]
fn passing_suite_exits_zero() {
    let dir = temp_dir("run-pass");
    let script = fake_broker_script(&dir, "grant.sh", GRANT_ONE);
    let rows = vec![CaseBuilder::new("alice", "read", "//depot/foo")
        .expect_groups(&["groupA"])
        .to_row()];
    let output = run_fixture(&dir, &script, &rows, &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report = parse_report(&output);
    assert_eq!(report.cases.len(), 1);
    assert!(report.cases[0].passed());
}

#[test]
fn none_expectation_passes_when_no_lines_match() {
    let dir = temp_dir("run-none");
    let script = fake_broker_script(&dir, "none.sh", GRANT_NONE);
    let rows = vec![CaseBuilder::new("bob", "write", "//depot/bar").to_row()];
    let output = run_fixture(&dir, &script, &rows, &[]);
    assert!(output.status.success());
}

#[test]
fn error_expectation_passes_on_nonzero_exit() {
    let dir = temp_dir("run-error");
    let script = fake_broker_script(&dir, "reject.sh", REJECT);
    let rows = vec![CaseBuilder::new("dave", "super", "//depot/secret")
        .expect_failure()
        .to_row()];
    let output = run_fixture(&dir, &script, &rows, &[]);
    assert!(output.status.success());
}

#[test]
fn failing_suite_exits_one() {
    let dir = temp_dir("run-fail");
    let script = fake_broker_script(&dir, "grant.sh", GRANT_ONE);
    let rows = vec![CaseBuilder::new("alice", "read", "//depot/foo")
        .expect_groups(&["someOtherGroup"])
        .to_row()];
    let output = run_fixture(&dir, &script, &rows, &[]);
    assert_eq!(output.status.code(), Some(1));
    let report = parse_report(&output);
    assert!(!report.cases[0].passed());
}

#[test]
fn fail_fast_stops_at_first_failure() {
    let dir = temp_dir("run-fail-fast");
    let script = fake_broker_script(&dir, "grant.sh", GRANT_ONE);
    let rows = vec![
        CaseBuilder::new("alice", "read", "//depot/one")
            .expect_groups(&["wrong"])
            .to_row(),
        CaseBuilder::new("alice", "read", "//depot/two")
            .expect_groups(&["groupA"])
            .to_row(),
    ];
    let output = run_fixture(&dir, &script, &rows, &[]);
    assert_eq!(output.status.code(), Some(1));
    let report = parse_report(&output);
    assert_eq!(report.total_cases, 2);
    assert_eq!(report.cases.len(), 1);
}

#[test]
fn continue_on_failure_runs_the_whole_fixture() {
    let dir = temp_dir("run-continue");
    let script = fake_broker_script(&dir, "grant.sh", GRANT_ONE);
    let rows = vec![
        CaseBuilder::new("alice", "read", "//depot/one")
            .expect_groups(&["wrong"])
            .to_row(),
        CaseBuilder::new("alice", "read", "//depot/two")
            .expect_groups(&["groupA"])
            .to_row(),
    ];
    let output = run_fixture(&dir, &script, &rows, &["--continue-on-failure"]);
    assert_eq!(output.status.code(), Some(1));
    let report = parse_report(&output);
    assert_eq!(report.cases.len(), 2);
    assert!(report.cases[1].passed());
}

#[test]
fn missing_fixture_exits_with_fixture_code() {
    let dir = temp_dir("run-missing");
    let script = fake_broker_script(&dir, "grant.sh", GRANT_ONE);
    let output = run_cli(&[
        "run",
        "--json",
        "--fixture",
        dir.join("nope.csv").to_str().unwrap(),
        "--broker-command",
        script.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unspawnable_broker_exits_with_spawn_code() {
    let dir = temp_dir("run-spawn");
    let fixture = dir.join("suite.csv");
    write_fixture(
        &fixture,
        &[CaseBuilder::new("alice", "read", "//depot/foo")
            .expect_groups(&["groupA"])
            .to_row()],
    );
    let output = run_cli(&[
        "run",
        "--json",
        "--fixture",
        fixture.to_str().unwrap(),
        "--broker-command",
        dir.join("does-not-exist").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn invalid_pattern_exits_with_pattern_code() {
    let dir = temp_dir("run-pattern");
    let script = fake_broker_script(&dir, "grant.sh", GRANT_ONE);
    let fixture = dir.join("suite.csv");
    write_fixture(
        &fixture,
        &[CaseBuilder::new("alice", "read", "//depot/foo").to_row()],
    );
    let output = run_cli(&[
        "run",
        "--json",
        "--fixture",
        fixture.to_str().unwrap(),
        "--broker-command",
        script.to_str().unwrap(),
        "--pattern",
        "Group (unclosed",
    ]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn broker_config_file_is_honored() {
    let dir = temp_dir("run-config");
    let script = fake_broker_script(&dir, "grant.sh", GRANT_ONE);
    let config = ConfigBuilder::new(script.to_str().unwrap())
        .with_port("broker:1998")
        .with_user("ci")
        .build();
    let config_path = dir.join("broker.json");
    write_config(&config_path, &config);
    let fixture = dir.join("suite.csv");
    write_fixture(
        &fixture,
        &[CaseBuilder::new("alice", "read", "//depot/foo")
            .expect_groups(&["groupA"])
            .to_row()],
    );
    let output = run_cli(&[
        "run",
        "--json",
        "--fixture",
        fixture.to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn human_mode_prints_case_diagnostics_to_stderr() {
    let dir = temp_dir("run-human");
    let script = fake_broker_script(&dir, "grant.sh", GRANT_ONE);
    let fixture = dir.join("suite.csv");
    write_fixture(
        &fixture,
        &[CaseBuilder::new("alice", "read", "//depot/foo")
            .expect_groups(&["groupA"])
            .to_row()],
    );
    let output = run_cli(&[
        "run",
        "--fixture",
        fixture.to_str().unwrap(),
        "--broker-command",
        script.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("alice | read | //depot/foo"));
    assert!(stderr.contains("PASS"));
    assert!(stderr.contains("suite passed"));
}
