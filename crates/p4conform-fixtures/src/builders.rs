//! Fluent builder APIs for constructing test fixtures.
//!
//! These builders reduce boilerplate when creating [`TestCase`] and
//! [`BrokerConfig`] objects in integration tests.
//!
//! # Example
//!
//! ```ignore
//! use p4conform_fixtures::{CaseBuilder, ConfigBuilder};
//!
//! let case = CaseBuilder::new("alice", "read", "//depot/foo")
//!     .expect_groups(&["groupA"])
//!     .build();
//!
//! let config = ConfigBuilder::new("/tmp/fake-broker.sh").build();
//! ```

use p4conform::model::{BrokerConfig, Expectation, TestCase};

/// Fluent builder for constructing [`TestCase`] objects in tests.
#[derive(Debug, Clone)]
pub struct CaseBuilder {
    user: String,
    req_access: String,
    path: String,
    expect: Expectation,
}

impl CaseBuilder {
    /// Start a case for `(user, reqAccess, path)`, expecting no grants.
    #[must_use]
    pub fn new(user: &str, req_access: &str, path: &str) -> Self {
        Self {
            user: user.to_string(),
            req_access: req_access.to_string(),
            path: path.to_string(),
            expect: Expectation::Grants(Vec::new()),
        }
    }

    /// Expect grants from exactly these groups, in order.
    #[must_use]
    pub fn expect_groups(mut self, groups: &[&str]) -> Self {
        self.expect = Expectation::Grants(groups.iter().map(|g| (*g).to_string()).collect());
        self
    }

    /// Expect the query itself to terminate abnormally.
    #[must_use]
    pub fn expect_failure(mut self) -> Self {
        self.expect = Expectation::Failure;
        self
    }

    /// Build the [`TestCase`].
    #[must_use]
    pub fn build(self) -> TestCase {
        TestCase {
            user: self.user,
            req_access: self.req_access,
            path: self.path,
            expect: self.expect,
        }
    }

    /// Render the case as one fixture-file row.
    #[must_use]
    pub fn to_row(&self) -> String {
        format!(
            "{},{},{},{}",
            self.user, self.req_access, self.path, self.expect
        )
    }
}

/// Fluent builder for constructing [`BrokerConfig`] objects in tests.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: BrokerConfig,
}

impl ConfigBuilder {
    /// Start from defaults, pointing at the given broker command.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            config: BrokerConfig {
                command: command.to_string(),
                ..BrokerConfig::default()
            },
        }
    }

    /// Set the broker endpoint.
    #[must_use]
    pub fn with_port(mut self, port: &str) -> Self {
        self.config.port = port.to_string();
        self
    }

    /// Set the credential identity.
    #[must_use]
    pub fn with_user(mut self, user: &str) -> Self {
        self.config.user = user.to_string();
        self
    }

    /// Set the client workspace name.
    #[must_use]
    pub fn with_client(mut self, client: &str) -> Self {
        self.config.client = Some(client.to_string());
        self
    }

    /// Build the [`BrokerConfig`].
    #[must_use]
    pub fn build(self) -> BrokerConfig {
        self.config
    }
}
