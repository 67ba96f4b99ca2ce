//! Integration tests for the compensation pass after an action failure.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use saga_runner::{SagaBuilder, SagaContext, SagaError};
use serde_json::{Value, json};

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
struct TestError(String);

fn counting_action(calls: Arc<AtomicUsize>) -> impl Fn(&SagaContext) -> Result<Value, TestError> {
    move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    }
}

fn logging_compensation(
    log: Arc<Mutex<Vec<usize>>>,
    step: usize,
) -> impl Fn(&SagaContext) -> Result<(), TestError> {
    move |_| {
        log.lock().expect("lock").push(step);
        Ok(())
    }
}

#[test]
fn failing_single_step_compensates_itself() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let saga = SagaBuilder::new()
        .step(
            |_| Err(TestError("single failure".to_string())),
            logging_compensation(Arc::clone(&log), 0),
        )
        .build();

    let err = saga.execute().expect_err("saga should fail");
    match err {
        SagaError::Failed(failure) => {
            assert_eq!(failure.step, 0);
            assert!(failure.fully_compensated());
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    assert_eq!(*log.lock().expect("lock"), vec![0]);
}

#[test]
fn third_of_four_steps_failing_compensates_the_first_three() {
    let actions = Arc::new(AtomicUsize::new(0));
    let log = Arc::new(Mutex::new(Vec::new()));
    let late_actions = Arc::new(AtomicUsize::new(0));

    let saga = SagaBuilder::new()
        .step(
            counting_action(Arc::clone(&actions)),
            logging_compensation(Arc::clone(&log), 0),
        )
        .step(
            counting_action(Arc::clone(&actions)),
            logging_compensation(Arc::clone(&log), 1),
        )
        .step(
            |_| Err(TestError("third step failed".to_string())),
            logging_compensation(Arc::clone(&log), 2),
        )
        .step(
            counting_action(Arc::clone(&late_actions)),
            logging_compensation(Arc::clone(&log), 3),
        )
        .build();

    let err = saga.execute().expect_err("saga should fail");
    match err {
        SagaError::Failed(failure) => assert_eq!(failure.step, 2),
        other => panic!("expected Failed, got {other:?}"),
    }

    // steps 0 and 1 acted, step 3 never ran in either direction
    assert_eq!(actions.load(Ordering::SeqCst), 2);
    assert_eq!(late_actions.load(Ordering::SeqCst), 0);

    // descending order, failing step included
    assert_eq!(*log.lock().expect("lock"), vec![2, 1, 0]);
}

#[test]
fn original_error_is_preserved_unchanged() {
    let saga = SagaBuilder::new()
        .step(|_| Ok(json!({ "seed": 7 })), |_| Ok(()))
        .step(
            |_| Err(TestError("the original error".to_string())),
            |_| Ok(()),
        )
        .build();

    let err = saga.execute().expect_err("saga should fail");
    match err {
        SagaError::Failed(failure) => {
            assert_eq!(failure.action, TestError("the original error".to_string()));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn compensation_receives_what_the_action_received() {
    let seen = Arc::new(Mutex::new(None));
    let seen_by_comp = Arc::clone(&seen);

    let saga = SagaBuilder::new()
        .step(
            |_| Ok(json!({ "return_value": "some result" })),
            |_| Ok(()),
        )
        .step(
            |_| Err(TestError("fail second action".to_string())),
            move |ctx: &SagaContext| {
                *seen_by_comp.lock().expect("lock") = Some(ctx.clone());
                Ok(())
            },
        )
        .build();

    saga.execute().expect_err("saga should fail");

    let ctx = seen
        .lock()
        .expect("lock")
        .take()
        .expect("compensation ran");
    assert_eq!(ctx.len(), 1);
    assert_eq!(ctx["return_value"], json!("some result"));
}

#[test]
fn first_step_compensation_receives_the_empty_context() {
    let seen = Arc::new(Mutex::new(None));
    let seen_by_comp = Arc::clone(&seen);

    let saga = SagaBuilder::new()
        .step(
            |_| Err(TestError("immediate failure".to_string())),
            move |ctx: &SagaContext| {
                *seen_by_comp.lock().expect("lock") = Some(ctx.clone());
                Ok(())
            },
        )
        .build();

    saga.execute().expect_err("saga should fail");

    let ctx = seen
        .lock()
        .expect("lock")
        .take()
        .expect("compensation ran");
    assert!(ctx.is_empty());
}

#[test]
fn compensation_input_is_the_action_input_not_its_output() {
    let seen = Arc::new(Mutex::new(None));
    let seen_by_comp = Arc::clone(&seen);

    let saga = SagaBuilder::new()
        .step(|_| Ok(json!({ "step": "one" })), |_| Ok(()))
        .step(
            |_| Ok(json!({ "step": "two" })),
            move |ctx: &SagaContext| {
                *seen_by_comp.lock().expect("lock") = Some(ctx.clone());
                Ok(())
            },
        )
        .step(
            |_| Err(TestError("unwind".to_string())),
            |_| Ok(()),
        )
        .build();

    saga.execute().expect_err("saga should fail");

    let ctx = seen
        .lock()
        .expect("lock")
        .take()
        .expect("compensation ran");
    assert_eq!(ctx["step"], json!("one"));
}
