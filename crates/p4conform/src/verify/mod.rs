//! Order-sensitive comparison of observed grant decisions against the
//! decoded expectation.

use crate::model::Decision;
use serde_json::Value;

/// Outcome of verifying one case's decisions.
#[derive(Clone, Debug)]
pub struct Verdict {
    pub passed: bool,
    pub message: Option<String>,
    pub context: Option<Value>,
}

impl Verdict {
    fn pass() -> Self {
        Self {
            passed: true,
            message: None,
            context: None,
        }
    }

    fn fail(message: String, context: Option<Value>) -> Self {
        Self {
            passed: false,
            message: Some(message),
            context,
        }
    }
}

/// Compare observed decisions against expected ones, position by position.
///
/// Fails on a length mismatch, on the first group disagreement, or on the
/// first decision whose access level is not the requested one. Equality is
/// order-sensitive: the same multiset in a different order fails.
#[must_use]
pub fn verify(observed: &[Decision], expected: &[Decision], req_access: &str) -> Verdict {
    if observed.len() != expected.len() {
        return Verdict::fail(
            format!(
                "expected {} decision(s), got {}",
                expected.len(),
                observed.len()
            ),
            Some(serde_json::json!({
                "expected": expected,
                "observed": observed,
            })),
        );
    }

    for (index, (obs, exp)) in observed.iter().zip(expected.iter()).enumerate() {
        if obs.group != exp.group {
            return Verdict::fail(
                format!(
                    "group at position {index} was '{}', expected '{}'",
                    obs.group, exp.group
                ),
                Some(serde_json::json!({
                    "index": index,
                    "expected": exp,
                    "observed": obs,
                })),
            );
        }
        if obs.access != req_access {
            return Verdict::fail(
                format!(
                    "access at position {index} was '{}', requested '{req_access}'",
                    obs.access
                ),
                Some(serde_json::json!({
                    "index": index,
                    "observed": obs,
                })),
            );
        }
    }

    Verdict::pass()
}
