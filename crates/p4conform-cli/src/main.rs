//! p4conform CLI: conformance testing for a Perforce permission broker.
//!
//! Command-line interface for running fixture suites and single queries
//! against a live broker endpoint.

// CLI-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)] // CLI must print to stdout
#![allow(clippy::print_stderr)] // CLI must print to stderr
#![allow(clippy::exit)] // CLI uses exit codes

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use miette::{IntoDiagnostic, Result};
use p4conform::broker::CommandBroker;
use p4conform::extract::GrantPattern;
use p4conform::fixture::{load_config_file, load_fixture_file};
use p4conform::model::{
    BrokerConfig, CaseResult, Expectation, SuiteOptions, SuiteResult, SuiteStatus, TestCase,
};
use p4conform::runner::{run_case, run_suite, NoopProgress, ProgressCallback, RunnerError};
use std::path::PathBuf;

mod progress;

use progress::CaseProgress;

#[derive(Debug, Parser)]
#[command(name = "p4conform", version, about = "Broker access-decision conformance runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct BrokerArgs {
    #[arg(long, help = "Broker config file (YAML or JSON)")]
    config: Option<PathBuf>,
    #[arg(long, help = "Broker endpoint, host:port")]
    port: Option<String>,
    #[arg(long, help = "Credential identity queries run as")]
    user: Option<String>,
    #[arg(long, help = "Client workspace name")]
    client: Option<String>,
    #[arg(long, help = "Client binary fronting the broker")]
    broker_command: Option<String>,
    #[arg(long, help = "Override the grant-announcement pattern (regex, two captures)")]
    pattern: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run every case in a fixture file, fail-fast.
    Run {
        #[arg(long)]
        json: bool,
        #[arg(long, help = "Comma-delimited fixture: user,reqAccess,path,expectation")]
        fixture: PathBuf,
        #[arg(long, help = "Run all cases instead of stopping at the first failure")]
        continue_on_failure: bool,
        #[arg(long, help = "Log broker queries to stderr")]
        verbose: bool,
        #[command(flatten)]
        broker: BrokerArgs,
    },
    /// Run a single query and check it against an expectation.
    Check {
        #[arg(long)]
        json: bool,
        #[arg(long)]
        verbose: bool,
        #[command(flatten)]
        broker: BrokerArgs,
        /// Acting user.
        case_user: String,
        /// Requested access level.
        access: String,
        /// Target depot path.
        path: String,
        /// Expected outcome: ERROR, NONE, or group1&&group2&&...
        expect: String,
    },
    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            json,
            fixture,
            continue_on_failure,
            verbose,
            broker,
        } => {
            init_tracing(verbose);
            let (config, pattern) = match resolve_broker(&broker) {
                Ok(resolved) => resolved,
                Err(err) => exit_with(emit_runner_error(json, err)),
            };
            let cases = match load_fixture_file(&fixture) {
                Ok(cases) => cases,
                Err(err) => exit_with(emit_runner_error(json, RunnerError::from(err))),
            };
            let broker = CommandBroker::new(config);
            let options = SuiteOptions {
                continue_on_failure,
            };
            let progress: Box<dyn ProgressCallback> = if json {
                Box::new(NoopProgress)
            } else {
                Box::new(CaseProgress::new())
            };
            let result = run_suite(&broker, &pattern, &cases, options, progress.as_ref());
            emit_suite_result(json, result)
        }
        Commands::Check {
            json,
            verbose,
            broker,
            case_user,
            access,
            path,
            expect,
        } => {
            init_tracing(verbose);
            let (config, pattern) = match resolve_broker(&broker) {
                Ok(resolved) => resolved,
                Err(err) => exit_with(emit_runner_error(json, err)),
            };
            let case = TestCase {
                user: case_user,
                req_access: access,
                path,
                expect: Expectation::parse(&expect),
            };
            let broker = CommandBroker::new(config);
            let result = run_case(&broker, &pattern, &case);
            emit_case_result(json, result)
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "p4conform", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn resolve_broker(args: &BrokerArgs) -> Result<(BrokerConfig, GrantPattern), RunnerError> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path).map_err(RunnerError::from)?,
        None => BrokerConfig::default(),
    };
    if let Some(port) = &args.port {
        config.port = port.clone();
    }
    if let Some(user) = &args.user {
        config.user = user.clone();
    }
    if let Some(client) = &args.client {
        config.client = Some(client.clone());
    }
    if let Some(command) = &args.broker_command {
        config.command = command.clone();
    }
    let pattern = match &args.pattern {
        Some(pattern) => GrantPattern::new(pattern)?,
        None => GrantPattern::standard()?,
    };
    Ok((config, pattern))
}

fn init_tracing(verbose: bool) {
    if !verbose && std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("p4conform=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit_suite_result(json: bool, result: Result<SuiteResult, RunnerError>) -> Result<()> {
    match result {
        Ok(suite) => {
            if json {
                let payload = serde_json::to_string(&suite).into_diagnostic()?;
                println!("{payload}");
            }
            if suite.status == SuiteStatus::Failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Err(err) => exit_with(emit_runner_error(json, err)),
    }
}

fn emit_case_result(json: bool, result: Result<CaseResult, RunnerError>) -> Result<()> {
    match result {
        Ok(case) => {
            if json {
                let payload = serde_json::to_string(&case).into_diagnostic()?;
                println!("{payload}");
            } else if case.passed() {
                eprintln!("PASS: {}", case.command);
            } else {
                let reason = case
                    .error
                    .as_ref()
                    .map(|err| err.message.clone())
                    .unwrap_or_else(|| "case failed".to_string());
                eprintln!("FAIL: {reason}");
            }
            if !case.passed() {
                std::process::exit(1);
            }
            Ok(())
        }
        Err(err) => exit_with(emit_runner_error(json, err)),
    }
}

/// Print an infrastructure error in the selected format and return the
/// process exit code for it.
fn emit_runner_error(json: bool, err: RunnerError) -> i32 {
    if json {
        match serde_json::to_string(&err.to_error_info()) {
            Ok(payload) => println!("{payload}"),
            Err(_) => eprintln!("error: {err}"),
        }
    } else {
        eprintln!("error: {err}");
    }
    exit_code_for_error_code(&err.code)
}

fn exit_with(code: i32) -> ! {
    std::process::exit(code);
}

fn exit_code_for_error_code(code: &str) -> i32 {
    match code {
        "E_FIXTURE" => 2,
        "E_PATTERN" => 3,
        "E_BROKER_SPAWN" => 4,
        "E_IO" => 5,
        _ => 1,
    }
}
