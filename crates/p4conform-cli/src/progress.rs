//! Per-case progress output using indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use p4conform::model::CaseStatus;
use p4conform::runner::{ProgressCallback, ProgressEvent};
use std::io::Write;
use std::sync::Mutex;

const SEPARATOR: &str =
    "--------------------------------------------------------------------------------";

/// Progress callback that prints per-case diagnostics to stderr, keeping
/// stdout free for JSON output.
pub struct CaseProgress {
    spinner: Mutex<Option<ProgressBar>>,
    total_cases: Mutex<usize>,
    color: bool,
}

impl CaseProgress {
    /// Create a new per-case progress callback.
    pub fn new() -> Self {
        let color = supports_color::on(supports_color::Stream::Stderr).is_some();
        Self {
            spinner: Mutex::new(None),
            total_cases: Mutex::new(0),
            color,
        }
    }

    fn status_label(&self, status: CaseStatus) -> String {
        Self::label(status, self.color)
    }

    fn label(status: CaseStatus, color: bool) -> String {
        match (status, color) {
            (CaseStatus::Passed, true) => "\x1b[32mPASS\x1b[0m".to_string(),
            (CaseStatus::Passed, false) => "PASS".to_string(),
            (CaseStatus::Failed, true) => "\x1b[31mFAIL\x1b[0m".to_string(),
            (CaseStatus::Failed, false) => "FAIL".to_string(),
        }
    }
}

impl Default for CaseProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCallback for CaseProgress {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::SuiteStarted {
                suite_id,
                total_cases,
            } => {
                if let Ok(mut tc) = self.total_cases.lock() {
                    *tc = *total_cases;
                }
                let _ = writeln!(
                    std::io::stderr(),
                    "suite started: {suite_id} ({total_cases} cases)"
                );
            }
            ProgressEvent::CaseStarted {
                case_index,
                user,
                req_access,
                path,
                command,
            } => {
                let total = self.total_cases.lock().map(|g| *g).unwrap_or(0);
                let _ = writeln!(std::io::stderr(), "{SEPARATOR}");
                let _ = writeln!(std::io::stderr(), "{user} | {req_access} | {path}");
                let _ = writeln!(std::io::stderr(), "{command}");
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb.set_message(format!("[{case_index}/{total}] querying broker"));
                pb.enable_steady_tick(std::time::Duration::from_millis(100));
                if let Ok(mut spinner) = self.spinner.lock() {
                    *spinner = Some(pb);
                }
            }
            ProgressEvent::CaseCompleted {
                status,
                duration_ms,
                message,
                ..
            } => {
                if let Ok(mut spinner) = self.spinner.lock() {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                }
                let label = self.status_label(*status);
                match message {
                    Some(message) => {
                        let _ = writeln!(
                            std::io::stderr(),
                            "{label} ({duration_ms} ms): {message}"
                        );
                    }
                    None => {
                        let _ = writeln!(std::io::stderr(), "{label} ({duration_ms} ms)");
                    }
                }
            }
            ProgressEvent::SuiteCompleted {
                success,
                duration_ms,
                ..
            } => {
                let _ = writeln!(std::io::stderr(), "{SEPARATOR}");
                let verdict = if *success { "passed" } else { "failed" };
                let _ = writeln!(
                    std::io::stderr(),
                    "suite {verdict} in {duration_ms} ms"
                );
            }
        }
    }
}
