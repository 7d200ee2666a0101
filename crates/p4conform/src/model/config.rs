use serde::{Deserialize, Serialize};

/// How to reach the broker under test. Passed explicitly into the suite
/// driver so case runs stay testable with a fake backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Client binary fronting the broker.
    pub command: String,
    /// Broker service endpoint, host:port.
    pub port: String,
    /// Credential identity the queries run as.
    pub user: String,
    /// Optional client workspace name.
    pub client: Option<String>,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            command: "p4".to_string(),
            port: "localhost:1998".to_string(),
            user: "perforce".to_string(),
            client: None,
        }
    }
}

/// Suite-level run options.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteOptions {
    /// Run every case instead of aborting at the first failure.
    pub continue_on_failure: bool,
}
