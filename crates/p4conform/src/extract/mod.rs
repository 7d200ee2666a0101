//! Decision extraction: scrape ordered grant announcements out of the
//! broker's free-form textual output.
//!
//! The broker prints banners, advice, and support text around the lines that
//! matter. Only lines matching the grant-announcement rule are parsed; every
//! other line is deliberately ignored. The rule is injectable so an alternate
//! broker response template can be supported without touching the verifier.

use crate::model::Decision;
use crate::runner::{RunnerError, RunnerResult};
use regex::Regex;

/// Stock announcement rule, matching the broker's response template.
pub const GRANT_LINE_PATTERN: &str = r"Group (.+?) grants (.+?) access to the path";

/// A compiled grant-announcement rule.
///
/// Capture group 1 is the authorizing group, capture group 2 the granted
/// access level.
#[derive(Clone, Debug)]
pub struct GrantPattern {
    regex: Regex,
}

impl GrantPattern {
    /// Compile a custom announcement rule. The pattern must have at least two
    /// capture groups: group name, then access level.
    pub fn new(pattern: &str) -> RunnerResult<Self> {
        let regex = Regex::new(pattern).map_err(|err| {
            RunnerError::pattern(format!("invalid grant pattern '{pattern}'"), err)
        })?;
        if regex.captures_len() < 3 {
            return Err(RunnerError::protocol(
                "E_PATTERN",
                "grant pattern needs two capture groups (group, access)",
            ));
        }
        Ok(Self { regex })
    }

    /// Compile the stock rule.
    pub fn standard() -> RunnerResult<Self> {
        Self::new(GRANT_LINE_PATTERN)
    }

    /// Scan captured output and collect one [`Decision`] per matching line,
    /// preserving source order. Blank and non-matching lines are skipped.
    #[must_use]
    pub fn extract(&self, output: &str) -> Vec<Decision> {
        output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| self.match_line(line))
            .collect()
    }

    fn match_line(&self, line: &str) -> Option<Decision> {
        let caps = self.regex.captures(line)?;
        let group = caps.get(1)?.as_str().to_string();
        let access = caps.get(2)?.as_str().to_string();
        Some(Decision { group, access })
    }
}
