use crate::broker::Broker;
use crate::extract::GrantPattern;
use crate::model::{
    CaseId, CaseResult, CaseStatus, ErrorInfo, SuiteId, SuiteOptions, SuiteResult, SuiteStatus,
    TestCase, REPORT_VERSION,
};
use crate::verify::verify;
use miette::Diagnostic;
use serde_json::Value;
use std::fmt;
use std::time::Instant;

pub mod progress;

pub use progress::{NoopProgress, ProgressCallback, ProgressEvent};

pub type RunnerResult<T> = Result<T, RunnerError>;

/// Infrastructure error: something other than a fixture/broker disagreement
/// went wrong (unreadable fixture, bad pattern, unspawnable broker command).
/// Case mismatches are never `RunnerError`s; they fail the case instead.
#[derive(Debug)]
pub struct RunnerError {
    pub code: String,
    pub message: String,
    pub context: Option<Value>,
}

impl RunnerError {
    pub fn protocol(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: None,
        }
    }

    pub fn io(
        code: impl Into<String>,
        message: impl Into<String>,
        err: impl std::fmt::Display,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: Some(serde_json::json!({ "source": err.to_string() })),
        }
    }

    pub fn pattern(message: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self {
            code: "E_PATTERN".to_string(),
            message: message.into(),
            context: Some(serde_json::json!({ "source": err.to_string() })),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code.clone(),
            message: self.message.clone(),
            context: self.context.clone(),
        }
    }
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl Diagnostic for RunnerError {}

/// Run one test case end to end: issue the query, then judge the outcome
/// against the case's expectation.
pub fn run_case(
    broker: &dyn Broker,
    pattern: &GrantPattern,
    case: &TestCase,
) -> RunnerResult<CaseResult> {
    let started = Instant::now();
    let command = broker.describe(&case.user, &case.req_access, &case.path);
    tracing::debug!(command = %command, expect = %case.expect, "running case");

    let invocation = broker.query(&case.user, &case.req_access, &case.path)?;
    let expected = case.expect.expected_decisions(&case.req_access);

    let mut result = CaseResult {
        case_id: CaseId::new(),
        user: case.user.clone(),
        req_access: case.req_access.clone(),
        path: case.path.clone(),
        expect: case.expect.to_string(),
        status: CaseStatus::Passed,
        command,
        observed: Vec::new(),
        expected,
        duration_ms: elapsed_ms(&started),
        error: None,
    };

    if !invocation.success {
        if !case.expect.is_failure() {
            result.status = CaseStatus::Failed;
            result.error = Some(ErrorInfo {
                code: "E_UNEXPECTED_ERROR".to_string(),
                message: format!("query '{}' failed unexpectedly", result.command),
                context: Some(serde_json::json!({
                    "exit_code": invocation.exit_code,
                    "output": invocation.output,
                })),
            });
        }
        result.duration_ms = elapsed_ms(&started);
        return Ok(result);
    }

    if case.expect.is_failure() {
        // The broker accepted a query the fixture said it must reject.
        result.status = CaseStatus::Failed;
        result.error = Some(ErrorInfo {
            code: "E_EXPECTED_ERROR".to_string(),
            message: format!(
                "query '{}' succeeded but a failure was expected",
                result.command
            ),
            context: Some(serde_json::json!({ "output": invocation.output })),
        });
        result.duration_ms = elapsed_ms(&started);
        return Ok(result);
    }

    result.observed = pattern.extract(&invocation.output);
    let verdict = verify(&result.observed, &result.expected, &case.req_access);
    if !verdict.passed {
        result.status = CaseStatus::Failed;
        let mut context = verdict.context.unwrap_or(Value::Null);
        if let Value::Object(map) = &mut context {
            map.insert("output".to_string(), Value::String(invocation.output));
        }
        result.error = Some(ErrorInfo {
            code: "E_MISMATCH".to_string(),
            message: verdict
                .message
                .unwrap_or_else(|| "decision mismatch".to_string()),
            context: Some(context),
        });
    }
    result.duration_ms = elapsed_ms(&started);
    Ok(result)
}

/// Run a fixture's cases in order, stopping at the first failure unless
/// `continue_on_failure` is set.
pub fn run_suite(
    broker: &dyn Broker,
    pattern: &GrantPattern,
    cases: &[TestCase],
    options: SuiteOptions,
    progress: &dyn ProgressCallback,
) -> RunnerResult<SuiteResult> {
    let suite_id = SuiteId::new();
    let started = Instant::now();
    progress.on_progress(&ProgressEvent::SuiteStarted {
        suite_id,
        total_cases: cases.len(),
    });

    let mut results = Vec::new();
    let mut failed = false;

    for (index, case) in cases.iter().enumerate() {
        progress.on_progress(&ProgressEvent::CaseStarted {
            case_index: index + 1,
            user: case.user.clone(),
            req_access: case.req_access.clone(),
            path: case.path.clone(),
            command: broker.describe(&case.user, &case.req_access, &case.path),
        });

        let result = run_case(broker, pattern, case)?;
        let passed = result.passed();
        progress.on_progress(&ProgressEvent::CaseCompleted {
            case_id: result.case_id,
            status: result.status,
            duration_ms: result.duration_ms,
            message: result.error.as_ref().map(|err| err.message.clone()),
        });
        results.push(result);

        if !passed {
            failed = true;
            if !options.continue_on_failure {
                tracing::warn!(case_index = index + 1, "aborting suite at first failure");
                break;
            }
        }
    }

    let status = if failed {
        SuiteStatus::Failed
    } else {
        SuiteStatus::Passed
    };
    let duration_ms = elapsed_ms(&started);
    progress.on_progress(&ProgressEvent::SuiteCompleted {
        suite_id,
        success: status == SuiteStatus::Passed,
        duration_ms,
    });

    Ok(SuiteResult {
        report_version: REPORT_VERSION,
        suite_id,
        status,
        total_cases: cases.len(),
        cases: results,
        duration_ms,
    })
}

fn elapsed_ms(started_at: &Instant) -> u64 {
    u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
}
