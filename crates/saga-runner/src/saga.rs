use std::fmt::Debug;

use tracing::{debug, error, warn};

use crate::context::{ActionOutput, SagaContext, interpret_output};
use crate::error::{CompensationFailure, SagaError, SagaFailure};
use crate::step::SagaStep;
use crate::trace::SagaTrace;

/// A compiled saga ready for execution.
///
/// Steps run front to back, each action's returned mapping becoming the next
/// action's input. When an action fails, every step from the failing one down
/// to the first is given a chance to compensate, in strictly descending
/// order, and the composite failure is returned once the pass completes.
pub struct Saga<E> {
    steps: Vec<Box<dyn SagaStep<Error = E>>>,
}

impl<E: Debug> Saga<E> {
    pub(crate) fn from_steps(steps: Vec<Box<dyn SagaStep<Error = E>>>) -> Self {
        Self { steps }
    }

    /// Number of steps in the saga.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the saga has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Execute all steps in order. Success is silent.
    ///
    /// Each call is self-contained: the per-step input snapshots live on this
    /// call's stack, so a saga may be executed again afterwards, or
    /// concurrently from several threads. A saga with no steps executes
    /// successfully.
    ///
    /// # Errors
    ///
    /// Returns [`SagaError::Failed`] when an action fails, after the
    /// compensation pass has run. Returns [`SagaError::ContractViolation`]
    /// when an action returns a value that is neither a mapping nor null; no
    /// compensation pass runs in that case.
    pub fn execute(&self) -> Result<(), SagaError<E>> {
        let (result, _trace) = self.execute_internal();
        result
    }

    /// Execute the saga and return the execution trace alongside the result.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`execute`](Self::execute); the
    /// trace is returned either way.
    pub fn execute_with_trace(&self) -> (Result<(), SagaError<E>>, SagaTrace) {
        self.execute_internal()
    }

    fn execute_internal(&self) -> (Result<(), SagaError<E>>, SagaTrace) {
        let mut trace = SagaTrace::new();
        let mut inputs: Vec<SagaContext> = Vec::with_capacity(self.steps.len());
        let mut context = SagaContext::new();

        for (index, step) in self.steps.iter().enumerate() {
            trace.record_start(index);
            // Snapshot taken before the action runs; this is what the step's
            // compensation will receive.
            inputs.push(context);
            debug!(step = index, "executing saga step");

            match step.act(&inputs[index]) {
                Ok(output) => match interpret_output(output) {
                    ActionOutput::Context(next) => {
                        trace.record_success(index);
                        context = next;
                    }
                    ActionOutput::NotAMapping(found) => {
                        trace.record_failure(index);
                        error!(step = index, found, "action returned a non-mapping value");
                        let violation = SagaError::ContractViolation { step: index, found };
                        return (Err(violation), trace);
                    }
                },
                Err(action_error) => {
                    trace.record_failure(index);
                    warn!(step = index, error = ?action_error, "saga step failed, unwinding");
                    let failure = self.unwind(&mut trace, &inputs, index, action_error);
                    return (Err(SagaError::Failed(failure)), trace);
                }
            }
        }

        (Ok(()), trace)
    }

    /// Compensation pass, from the failing step down to the first, inclusive.
    ///
    /// The failing step compensates too: its action may have done partial
    /// work before erroring. A failed compensation never stops the pass.
    fn unwind(
        &self,
        trace: &mut SagaTrace,
        inputs: &[SagaContext],
        failed_step: usize,
        action_error: E,
    ) -> SagaFailure<E> {
        let mut compensations = Vec::new();

        for index in (0..=failed_step).rev() {
            match self.steps[index].compensate(&inputs[index]) {
                Ok(()) => {
                    debug!(step = index, "compensated saga step");
                    trace.record_compensated(index);
                }
                Err(source) => {
                    error!(step = index, error = ?source, "compensation failed");
                    trace.record_compensation_failed(index);
                    compensations.push(CompensationFailure {
                        step: index,
                        source,
                    });
                }
            }
        }

        SagaFailure {
            step: failed_step,
            action: action_error,
            compensations,
        }
    }
}
