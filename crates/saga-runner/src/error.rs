use std::fmt::Debug;

use thiserror::Error;

/// Failure of a single compensation during the unwinding pass.
///
/// Never surfaced on its own; always collected into
/// [`SagaFailure::compensations`].
#[derive(Debug, Error)]
#[error("compensation for step {step} failed")]
pub struct CompensationFailure<E> {
    /// Index of the step whose compensation failed.
    pub step: usize,
    /// The underlying error.
    #[source]
    pub source: E,
}

/// Composite failure raised when a step's action fails.
///
/// Pairs the original action error, unchanged, with every failure collected
/// while unwinding, ordered most-recently-executed step first. An empty
/// [`compensations`](Self::compensations) list means every attempted
/// compensation succeeded; callers distinguish full from partial recovery by
/// inspecting it.
#[derive(Debug, Error)]
#[error("step {step} failed; {} compensation(s) also failed", compensations.len())]
pub struct SagaFailure<E> {
    /// Index of the step whose action failed.
    pub step: usize,
    /// The error raised by the failing action.
    #[source]
    pub action: E,
    /// Failures collected during the compensation pass, highest index first.
    pub compensations: Vec<CompensationFailure<E>>,
}

impl<E> SagaFailure<E> {
    /// True when every attempted compensation succeeded.
    #[must_use]
    pub fn fully_compensated(&self) -> bool {
        self.compensations.is_empty()
    }
}

/// Error from saga execution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SagaError<E: Debug> {
    /// An action failed and the compensation pass has completed.
    #[error(transparent)]
    Failed(SagaFailure<E>),

    /// An action returned a value that is neither a mapping nor null.
    ///
    /// This is a bug in the supplied action rather than a business failure,
    /// so no compensation pass runs for it.
    #[error("action for step {step} returned {found} where a mapping or null was expected")]
    ContractViolation {
        /// Index of the offending step.
        step: usize,
        /// Kind of value the action returned.
        found: &'static str,
    },
}
