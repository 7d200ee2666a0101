// Test module - relaxed lint rules
#![allow(clippy::indexing_slicing)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(missing_docs)]

use p4conform::fixture::{load_config_file, load_fixture_file, parse_fixture, FixtureError};
use p4conform::model::Expectation;
use std::fs;

#[test]
fn parses_rows_in_order() {
    let text = "\
alice,read,//depot/foo,groupA
bob,write,//depot/bar,NONE
dave,super,//depot/secret,ERROR
";
    let cases = parse_fixture(text).unwrap();
    assert_eq!(cases.len(), 3);
    assert_eq!(cases[0].user, "alice");
    assert_eq!(cases[0].expect, Expectation::parse("groupA"));
    assert_eq!(cases[1].expect, Expectation::Grants(Vec::new()));
    assert!(cases[2].expect.is_failure());
}

#[test]
fn fields_are_trimmed() {
    let cases = parse_fixture("alice , read , //depot/foo , groupA&&groupB\n").unwrap();
    assert_eq!(cases[0].req_access, "read");
    assert_eq!(
        cases[0].expect,
        Expectation::Grants(vec!["groupA".to_string(), "groupB".to_string()])
    );
}

#[test]
fn blank_lines_are_skipped() {
    let text = "\n\nalice,read,//depot/foo,groupA\n\nbob,write,//depot/bar,NONE\n\n";
    let cases = parse_fixture(text).unwrap();
    assert_eq!(cases.len(), 2);
}

#[test]
fn wrong_field_count_reports_line_number() {
    let text = "alice,read,//depot/foo,groupA\nbob,write,//depot/bar\n";
    let err = parse_fixture(text).unwrap_err();
    match err {
        FixtureError::Shape { line, found } => {
            assert_eq!(line, 2);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_field_is_rejected() {
    let err = parse_fixture("alice,,//depot/foo,groupA\n").unwrap_err();
    assert!(err.to_string().contains("reqAccess"));
}

#[test]
fn loads_fixture_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suite.csv");
    fs::write(&path, "alice,read,//depot/foo,groupA\n").unwrap();
    let cases = load_fixture_file(&path).unwrap();
    assert_eq!(cases.len(), 1);
}

#[test]
fn missing_fixture_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_fixture_file(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, FixtureError::Io { .. }));
}

#[test]
fn loads_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broker.json");
    fs::write(
        &path,
        r#"{"command": "p4", "port": "broker:1998", "user": "ci"}"#,
    )
    .unwrap();
    let config = load_config_file(&path).unwrap();
    assert_eq!(config.port, "broker:1998");
    assert_eq!(config.user, "ci");
    assert_eq!(config.client, None);
}

#[test]
fn loads_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broker.yaml");
    fs::write(&path, "port: broker:2002\nclient: ci_ws\n").unwrap();
    let config = load_config_file(&path).unwrap();
    assert_eq!(config.port, "broker:2002");
    assert_eq!(config.client.as_deref(), Some("ci_ws"));
    // Unset fields fall back to defaults.
    assert_eq!(config.command, "p4");
}

#[test]
fn malformed_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broker.json");
    fs::write(&path, "{not json").unwrap();
    assert!(matches!(
        load_config_file(&path).unwrap_err(),
        FixtureError::Config { .. }
    ));
}
