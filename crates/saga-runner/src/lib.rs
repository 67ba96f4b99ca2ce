//! Saga pattern runner: sequential fallible steps with reverse-order
//! compensation.
//!
//! A saga executes a series of steps, each pairing a forward action with a
//! compensating action. Actions pass a key-value context forward: whatever
//! mapping one action returns becomes the next action's input. When an action
//! fails, the failing step and every step before it are compensated in
//! strictly descending order, and the original error is surfaced together
//! with any failures collected during the compensation pass.
//!
//! # Example
//!
//! ```
//! use saga_runner::{SagaBuilder, SagaError};
//! use serde_json::json;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("{0}")]
//! struct BookingError(String);
//!
//! let saga = SagaBuilder::<BookingError>::new()
//!     .step(
//!         |_| Ok(json!({ "flight": "LH454" })),
//!         |_| Ok(()), // nothing to undo: no booking existed before this step
//!     )
//!     .step(
//!         |ctx| Ok(json!({ "hotel": "H-1029", "flight": ctx["flight"] })),
//!         |ctx| {
//!             // cancel the hotel; the flight number is available for cleanup
//!             assert_eq!(ctx["flight"], "LH454");
//!             Ok(())
//!         },
//!     )
//!     .build();
//!
//! match saga.execute() {
//!     Ok(()) => {}
//!     Err(SagaError::Failed(failure)) => {
//!         eprintln!("saga aborted at step {}", failure.step);
//!     }
//!     Err(other) => eprintln!("{other}"),
//! }
//! ```

mod builder;
mod context;
mod error;
mod saga;
mod step;
mod trace;

pub use builder::SagaBuilder;
pub use context::SagaContext;
pub use error::{CompensationFailure, SagaError, SagaFailure};
pub use saga::Saga;
pub use step::SagaStep;
pub use trace::{SagaTrace, StepRecord, StepStatus};
