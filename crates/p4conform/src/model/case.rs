use serde::{Deserialize, Serialize};
use std::fmt;

/// Expectation string meaning "the broker must reject the query outright".
pub const FAILURE_SENTINEL: &str = "ERROR";

/// Expectation string meaning "the broker must announce no grants".
pub const EMPTY_SENTINEL: &str = "NONE";

/// Separator between group names in a multi-grant expectation.
pub const GROUP_SEPARATOR: &str = "&&";

/// One fixture row: a single authorization query and its expected outcome.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestCase {
    pub user: String,
    pub req_access: String,
    pub path: String,
    pub expect: Expectation,
}

/// One grant announcement scraped from broker output: which group granted
/// which access level. Order among decisions is significant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub group: String,
    pub access: String,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.access)
    }
}

/// Decoded form of a fixture row's expectation string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// The query must terminate abnormally (the `ERROR` sentinel).
    Failure,
    /// The query must succeed and announce exactly these groups, in order.
    /// Empty means the `NONE` sentinel: zero announcements.
    Grants(Vec<String>),
}

impl Expectation {
    /// Decode a fixture expectation string.
    ///
    /// `ERROR` and `NONE` are sentinels; anything else is a `&&`-separated
    /// group list. A string without the separator is a single-group list.
    #[must_use]
    pub fn parse(encoding: &str) -> Self {
        match encoding {
            FAILURE_SENTINEL => Self::Failure,
            EMPTY_SENTINEL => Self::Grants(Vec::new()),
            groups => Self::Grants(
                groups
                    .split(GROUP_SEPARATOR)
                    .map(|name| name.to_string())
                    .collect(),
            ),
        }
    }

    /// Expand a grant expectation into the decision sequence the broker must
    /// announce: each listed group grants the requested access level.
    ///
    /// A `Failure` expectation has no decision-list meaning and expands to an
    /// empty sequence; the case runner never verifies decisions for it.
    #[must_use]
    pub fn expected_decisions(&self, req_access: &str) -> Vec<Decision> {
        match self {
            Self::Failure => Vec::new(),
            Self::Grants(groups) => groups
                .iter()
                .map(|group| Decision {
                    group: group.clone(),
                    access: req_access.to_string(),
                })
                .collect(),
        }
    }

    /// True when the query itself is expected to terminate abnormally.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }
}

impl fmt::Display for Expectation {
    /// Re-encode to the fixture form, for diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failure => write!(f, "{FAILURE_SENTINEL}"),
            Self::Grants(groups) if groups.is_empty() => write!(f, "{EMPTY_SENTINEL}"),
            Self::Grants(groups) => write!(f, "{}", groups.join(GROUP_SEPARATOR)),
        }
    }
}
