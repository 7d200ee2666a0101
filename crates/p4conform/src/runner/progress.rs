//! Progress callback for reporting suite progress.
//!
//! This module provides a trait for receiving progress events while a suite runs.

use crate::model::{CaseId, CaseStatus, SuiteId};

/// Event emitted during suite execution for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Suite has started.
    SuiteStarted {
        /// Unique suite identifier.
        suite_id: SuiteId,
        /// Total number of fixture cases.
        total_cases: usize,
    },
    /// A case has started.
    CaseStarted {
        /// Current case index (1-based).
        case_index: usize,
        /// Acting user.
        user: String,
        /// Requested access level.
        req_access: String,
        /// Target depot path.
        path: String,
        /// Rendered query command.
        command: String,
    },
    /// A case has completed.
    CaseCompleted {
        /// Case ID.
        case_id: CaseId,
        /// Final status.
        status: CaseStatus,
        /// Duration in milliseconds.
        duration_ms: u64,
        /// Failure message if any.
        message: Option<String>,
    },
    /// Suite has completed (possibly early, on first failure).
    SuiteCompleted {
        /// Unique suite identifier.
        suite_id: SuiteId,
        /// Whether every executed case passed.
        success: bool,
        /// Total duration in milliseconds.
        duration_ms: u64,
    },
}

/// Trait for receiving progress events during execution.
///
/// Implementors can use this to display progress, log events, or collect metrics.
pub trait ProgressCallback: Send {
    /// Called for each progress event.
    fn on_progress(&self, event: &ProgressEvent);
}

/// A no-op progress callback that discards all events.
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

/// A progress callback that collects events for testing.
#[cfg(test)]
pub struct CollectingProgress {
    events: std::sync::Mutex<Vec<ProgressEvent>>,
}

#[cfg(test)]
impl Default for CollectingProgress {
    fn default() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl CollectingProgress {
    /// Create a new collecting progress callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get collected events.
    ///
    /// # Panics
    /// Panics if the mutex is poisoned (indicates a prior panic during event collection).
    #[allow(clippy::expect_used)]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .expect("progress mutex poisoned - prior panic during event collection")
            .clone()
    }
}

#[cfg(test)]
impl ProgressCallback for CollectingProgress {
    #[allow(clippy::expect_used)]
    fn on_progress(&self, event: &ProgressEvent) {
        self.events
            .lock()
            .expect("progress mutex poisoned")
            .push(event.clone());
    }
}
