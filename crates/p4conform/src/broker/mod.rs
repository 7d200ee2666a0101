//! Broker invocation: issuing one authorization query per case against the
//! live broker endpoint.
//!
//! The runner only sees the [`Broker`] trait, so tests substitute an
//! in-memory backend and never spawn a process.

use crate::model::BrokerConfig;
use crate::runner::{RunnerError, RunnerResult};
use std::process::Command;

/// Outcome of one broker query: exit disposition plus the combined
/// stdout+stderr text.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub output: String,
}

/// The seam between the runner and the external authorization tool.
pub trait Broker {
    /// Issue the query for `(user, req_access, path)` and capture its output.
    ///
    /// A query the tool rejects (nonzero exit) is still `Ok`: the abnormal
    /// termination is part of the observable behavior under test. `Err` is
    /// reserved for infrastructure failures such as an unspawnable command.
    fn query(&self, user: &str, req_access: &str, path: &str) -> RunnerResult<Invocation>;

    /// Render the query as the command line it runs as, for diagnostics.
    fn describe(&self, user: &str, req_access: &str, path: &str) -> String;
}

/// Real backend: runs `<command> -p <port> -u <user> [-c <client>] access
/// <reqAccess> <path>` and blocks until it exits. No timeout; a hung broker
/// hangs the suite.
#[derive(Clone, Debug)]
pub struct CommandBroker {
    config: BrokerConfig,
}

impl CommandBroker {
    #[must_use]
    pub fn new(config: BrokerConfig) -> Self {
        Self { config }
    }

    fn query_args(&self, user: &str, req_access: &str, path: &str) -> Vec<String> {
        let mut args = vec![
            "-p".to_string(),
            self.config.port.clone(),
            "-u".to_string(),
            user.to_string(),
        ];
        if let Some(client) = &self.config.client {
            args.push("-c".to_string());
            args.push(client.clone());
        }
        args.push("access".to_string());
        args.push(req_access.to_string());
        args.push(path.to_string());
        args
    }
}

impl Broker for CommandBroker {
    fn query(&self, user: &str, req_access: &str, path: &str) -> RunnerResult<Invocation> {
        let args = self.query_args(user, req_access, path);
        tracing::debug!(command = %self.config.command, ?args, "issuing broker query");
        // -u carries the acting user under test; the configured credential
        // identity rides along as the session fallback.
        let output = Command::new(&self.config.command)
            .args(&args)
            .env("P4USER", &self.config.user)
            .output()
            .map_err(|err| {
                RunnerError::io(
                    "E_BROKER_SPAWN",
                    format!("failed to run '{}'", self.config.command),
                    err,
                )
            })?;

        // stderr is appended after stdout so both land in one scrape target.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(Invocation {
            success: output.status.success(),
            exit_code: output.status.code(),
            output: text,
        })
    }

    fn describe(&self, user: &str, req_access: &str, path: &str) -> String {
        let mut rendered = self.config.command.clone();
        for arg in self.query_args(user, req_access, path) {
            rendered.push(' ');
            rendered.push_str(&arg);
        }
        rendered
    }
}
