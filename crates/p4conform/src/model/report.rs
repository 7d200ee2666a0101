use crate::model::case::Decision;
use crate::model::{CaseId, SuiteId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteResult {
    pub report_version: u32,
    pub suite_id: SuiteId,
    pub status: SuiteStatus,
    /// Total cases in the fixture, not necessarily all executed.
    pub total_cases: usize,
    pub cases: Vec<CaseResult>,
    pub duration_ms: u64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuiteStatus {
    Passed,
    Failed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseResult {
    pub case_id: CaseId,
    pub user: String,
    pub req_access: String,
    pub path: String,
    pub expect: String,
    pub status: CaseStatus,
    /// The query as it was (or would have been) issued.
    pub command: String,
    pub observed: Vec<Decision>,
    pub expected: Vec<Decision>,
    pub duration_ms: u64,
    pub error: Option<ErrorInfo>,
}

impl CaseResult {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Failed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    pub context: Option<serde_json::Value>,
}

pub const REPORT_VERSION: u32 = 1;
