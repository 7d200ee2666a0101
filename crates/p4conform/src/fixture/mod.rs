//! Fixture and config-file loading.
//!
//! Fixtures are comma-delimited rows with no header, one case per row:
//! `user,reqAccess,path,expectedEncoding`. Broker config files are YAML or
//! JSON, chosen by extension.

use crate::model::{BrokerConfig, Expectation, TestCase};
use crate::runner::RunnerError;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected 4 comma-separated fields, got {found}")]
    Shape { line: usize, found: usize },
    #[error("line {line}: empty {field} field")]
    EmptyField { line: usize, field: &'static str },
    #[error("failed to parse config {path}: {message}")]
    Config { path: String, message: String },
}

impl From<FixtureError> for RunnerError {
    fn from(err: FixtureError) -> Self {
        RunnerError::protocol("E_FIXTURE", err.to_string())
    }
}

/// Load and parse a fixture file.
pub fn load_fixture_file(path: &Path) -> Result<Vec<TestCase>, FixtureError> {
    let data = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_fixture(&data)
}

/// Parse fixture text. Blank lines are skipped; fields are trimmed; line
/// numbers in errors are 1-based.
pub fn parse_fixture(text: &str) -> Result<Vec<TestCase>, FixtureError> {
    let mut cases = Vec::new();
    for (index, row) in text.lines().enumerate() {
        if row.trim().is_empty() {
            continue;
        }
        cases.push(parse_row(row, index + 1)?);
    }
    Ok(cases)
}

fn parse_row(row: &str, line: usize) -> Result<TestCase, FixtureError> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    let [user, req_access, path, encoding] = fields.as_slice() else {
        return Err(FixtureError::Shape {
            line,
            found: fields.len(),
        });
    };
    for (field, name) in [
        (user, "user"),
        (req_access, "reqAccess"),
        (path, "path"),
        (encoding, "expectation"),
    ] {
        if field.is_empty() {
            return Err(FixtureError::EmptyField { line, field: name });
        }
    }
    Ok(TestCase {
        user: (*user).to_string(),
        req_access: (*req_access).to_string(),
        path: (*path).to_string(),
        expect: Expectation::parse(encoding),
    })
}

/// Load a broker config from a YAML or JSON file, by extension.
pub fn load_config_file(path: &Path) -> Result<BrokerConfig, FixtureError> {
    let data = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let name = path.display().to_string();
    if name.ends_with(".yaml") || name.ends_with(".yml") {
        serde_yml::from_str(&data).map_err(|err| FixtureError::Config {
            path: name,
            message: err.to_string(),
        })
    } else {
        serde_json::from_str(&data).map_err(|err| FixtureError::Config {
            path: name,
            message: err.to_string(),
        })
    }
}
