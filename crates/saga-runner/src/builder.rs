use std::fmt::Debug;

use serde_json::Value;

use crate::context::SagaContext;
use crate::saga::Saga;
use crate::step::{FnStep, SagaStep};

/// Builder accumulating `(action, compensation)` pairs in call order.
///
/// Call order is execution order. A builder with no steps produces a saga
/// that executes successfully without doing anything.
pub struct SagaBuilder<E> {
    steps: Vec<Box<dyn SagaStep<Error = E>>>,
}

impl<E: 'static> SagaBuilder<E> {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add an action and its corresponding compensation.
    ///
    /// The action receives the previous step's returned mapping (empty for
    /// the first step) and returns the mapping for the next one, or
    /// [`Value::Null`] for none. The compensation receives whatever the
    /// action received.
    #[must_use]
    pub fn step<A, C>(mut self, action: A, compensation: C) -> Self
    where
        A: Fn(&SagaContext) -> Result<Value, E> + Send + Sync + 'static,
        C: Fn(&SagaContext) -> Result<(), E> + Send + Sync + 'static,
    {
        self.steps.push(Box::new(FnStep::new(action, compensation)));
        self
    }

    /// Add any [`SagaStep`] implementer as the next step.
    #[must_use]
    pub fn push_step<S>(mut self, step: S) -> Self
    where
        S: SagaStep<Error = E> + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Materialize the saga over exactly the accumulated steps.
    #[must_use]
    pub fn build(self) -> Saga<E>
    where
        E: Debug,
    {
        Saga::from_steps(self.steps)
    }
}

impl<E: 'static> Default for SagaBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
