use std::marker::PhantomData;

use serde_json::Value;

use crate::context::SagaContext;

/// A step in a saga: one forward action paired with a compensating action.
///
/// The runner snapshots the context before invoking [`act`](Self::act), so
/// implementers hold no per-execution state and a step may belong to a saga
/// that is executed repeatedly. Compensations must tolerate being invoked
/// after a *failed* action attempt: the runner gives the failing step itself
/// a chance to undo whatever partial work it performed.
///
/// Neither method is retried, timed out, or guarded against blocking.
pub trait SagaStep: Send + Sync {
    /// Error type for action and compensation failures.
    type Error;

    /// Execute the forward action with the current context.
    ///
    /// Returns a JSON object to become the next step's context, or
    /// [`Value::Null`] when the action produces nothing. Any other value is
    /// reported by the runner as a contract violation.
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails. The runner then compensates this
    /// step and every earlier one.
    fn act(&self, input: &SagaContext) -> Result<Value, Self::Error>;

    /// Undo the effects of the action.
    ///
    /// Receives the same context the action last received, which is empty
    /// when the action ran with no input. The default implementation is a
    /// no-op, suitable for read-only steps.
    ///
    /// # Errors
    ///
    /// Returns an error if compensation fails. The runner records the failure
    /// and keeps compensating the remaining steps.
    fn compensate(&self, input: &SagaContext) -> Result<(), Self::Error> {
        let _ = input;
        Ok(())
    }
}

/// Adapter pairing an action closure with a compensation closure.
pub(crate) struct FnStep<A, C, E> {
    action: A,
    compensation: C,
    _marker: PhantomData<fn() -> E>,
}

impl<A, C, E> FnStep<A, C, E> {
    pub(crate) fn new(action: A, compensation: C) -> Self {
        Self {
            action,
            compensation,
            _marker: PhantomData,
        }
    }
}

impl<A, C, E> SagaStep for FnStep<A, C, E>
where
    A: Fn(&SagaContext) -> Result<Value, E> + Send + Sync,
    C: Fn(&SagaContext) -> Result<(), E> + Send + Sync,
{
    type Error = E;

    fn act(&self, input: &SagaContext) -> Result<Value, E> {
        (self.action)(input)
    }

    fn compensate(&self, input: &SagaContext) -> Result<(), E> {
        (self.compensation)(input)
    }
}
