use std::time::Instant;

/// Status of a step in the execution trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    /// Action completed and its output was accepted.
    Executed,
    /// Action failed, or returned a value violating the action contract.
    Failed,
    /// Compensation ran successfully during unwinding.
    Compensated,
    /// Compensation itself failed during unwinding.
    CompensationFailed,
}

/// Record of one step's progress through a saga execution.
#[derive(Debug)]
pub struct StepRecord {
    /// Zero-based position of the step in the saga.
    pub step: usize,
    /// Current status.
    pub status: StepStatus,
    /// When the action was invoked.
    pub started_at: Instant,
    /// When the step reached a terminal status.
    pub completed_at: Option<Instant>,
}

/// In-memory trace of a single `execute` call.
///
/// Records are appended in execution order, so the record for step `i` sits
/// at position `i`. The trace lives only as long as the caller keeps it;
/// nothing is persisted.
#[derive(Debug, Default)]
pub struct SagaTrace {
    records: Vec<StepRecord>,
}

impl SagaTrace {
    /// Create an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_start(&mut self, step: usize) {
        self.records.push(StepRecord {
            step,
            status: StepStatus::Executed,
            started_at: Instant::now(),
            completed_at: None,
        });
    }

    pub(crate) fn record_success(&mut self, step: usize) {
        self.set_status(step, StepStatus::Executed);
    }

    pub(crate) fn record_failure(&mut self, step: usize) {
        self.set_status(step, StepStatus::Failed);
    }

    pub(crate) fn record_compensated(&mut self, step: usize) {
        self.set_status(step, StepStatus::Compensated);
    }

    pub(crate) fn record_compensation_failed(&mut self, step: usize) {
        self.set_status(step, StepStatus::CompensationFailed);
    }

    fn set_status(&mut self, step: usize, status: StepStatus) {
        if let Some(record) = self.records.get_mut(step) {
            record.status = status;
            record.completed_at = Some(Instant::now());
        }
    }

    /// All records, in execution order.
    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// One line per step, for display.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in &self.records {
            let glyph = match record.status {
                StepStatus::Executed => "✓",
                StepStatus::Failed => "✗",
                StepStatus::Compensated => "↩",
                StepStatus::CompensationFailed => "⚠",
            };
            lines.push(format!("{glyph} step {}", record.step));
        }
        lines.join("\n")
    }
}
