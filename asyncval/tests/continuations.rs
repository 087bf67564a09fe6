use asyncval::{AsyncValue, ErrorKind};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn test_continuation_before_completion_runs_once() {
    let value = AsyncValue::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let s = seen.clone();
    value
        .on_complete(move |outcome| s.lock().unwrap().push(*outcome.unwrap()))
        .unwrap();

    assert!(seen.lock().unwrap().is_empty());

    let report = value.complete(42).unwrap();

    assert_eq!(report.delivered, 1);
    assert!(report.is_clean());
    assert_eq!(*seen.lock().unwrap(), vec![42]);
}

#[test]
fn test_continuation_after_completion_runs_immediately() {
    let value = AsyncValue::new();
    value.complete(7).unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();

    value
        .on_complete(move |outcome| {
            assert_eq!(outcome, Ok(&7));
            c.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    // Ran synchronously inside `on_complete`.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_continuations_run_in_registration_order() {
    let value = AsyncValue::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for i in 0..10 {
        let order = order.clone();
        value
            .on_complete(move |_| order.lock().unwrap().push(i))
            .unwrap();
    }

    let report = value.complete(()).unwrap();

    assert_eq!(report.delivered, 10);
    assert_eq!(*order.lock().unwrap(), (0..10).collect::<Vec<_>>());
}

#[test]
fn test_panicking_continuation_is_isolated_and_reported() {
    let value = AsyncValue::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    let o1 = order.clone();
    value.on_complete(move |_| o1.lock().unwrap().push("first")).unwrap();
    value.on_complete(|_| panic!("continuation exploded")).unwrap();
    let o3 = order.clone();
    value.on_complete(move |_| o3.lock().unwrap().push("third")).unwrap();

    let report = value.complete(1).unwrap();

    assert_eq!(report.delivered, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(report.failures[0].message, "continuation exploded");
    assert_eq!(*order.lock().unwrap(), vec!["first", "third"]);
}

#[test]
fn test_immediate_panicking_continuation_is_reported() {
    let value = AsyncValue::completed(0);

    let result = value.on_complete(|_| panic!("late panic"));

    let failure = result.unwrap_err();
    assert_eq!(failure.index, 0);
    assert_eq!(failure.message, "late panic");
}

#[test]
fn test_failure_is_delivered_to_continuations() {
    let value = AsyncValue::<i32>::new();
    let seen = Arc::new(Mutex::new(None));

    let s = seen.clone();
    value
        .on_complete(move |outcome| *s.lock().unwrap() = Some(outcome.cloned().map_err(Clone::clone)))
        .unwrap();

    value.fail(ErrorKind::message("unreachable host")).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        Some(Err(ErrorKind::Message("unreachable host".into())))
    );
}

#[test]
fn test_success_and_failure_filters() {
    let ok = AsyncValue::new();
    let err = AsyncValue::<i32>::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    for value in [&ok, &err] {
        let l = log.clone();
        value
            .on_success(move |v| l.lock().unwrap().push(format!("success {v}")))
            .unwrap();
        let l = log.clone();
        value
            .on_failure(move |e| l.lock().unwrap().push(format!("failure {e}")))
            .unwrap();
    }

    ok.complete(5).unwrap();
    err.fail(ErrorKind::message("boom")).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["success 5".to_string(), "failure boom".to_string()]
    );
}

#[test]
fn test_registration_from_inside_continuation_runs_inline() {
    let value = AsyncValue::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    let inner_value = value.clone();
    let o = order.clone();
    value
        .on_complete(move |_| {
            o.lock().unwrap().push(1);
            let o = o.clone();
            inner_value
                .on_complete(move |_| o.lock().unwrap().push(3))
                .unwrap();
        })
        .unwrap();

    let o = order.clone();
    value.on_complete(move |_| o.lock().unwrap().push(2)).unwrap();

    let report = value.complete(()).unwrap();

    // The nested registration sees a terminal value, so it runs right away
    // instead of being queued behind the second continuation.
    assert_eq!(report.delivered, 2);
    assert_eq!(*order.lock().unwrap(), vec![1, 3, 2]);
}

#[test]
fn test_rejected_completion_does_not_rerun_continuations() {
    let value = AsyncValue::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let c = calls.clone();
    value
        .on_complete(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    value.complete(1).unwrap();
    assert!(value.complete(2).is_err());
    assert!(value.fail(ErrorKind::message("x")).is_err());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_continuation_runs_inline_while_producer_still_delivering() {
    let value = AsyncValue::new();
    let calls = Arc::new(AtomicUsize::new(0));

    value
        .on_complete(|_| thread::sleep(Duration::from_millis(300)))
        .unwrap();

    let producer = value.clone();
    let delivery = thread::spawn(move || producer.complete(1).unwrap());

    assert_eq!(value.await_blocking().unwrap(), 1);
    assert!(value.is_terminal());

    let c = calls.clone();
    let caller = thread::current().id();
    value
        .on_complete(move |outcome| {
            assert_eq!(outcome, Ok(&1));
            assert_eq!(thread::current().id(), caller);
            c.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let report = delivery.join().unwrap();
    assert_eq!(report.delivered, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_late_panic_is_reported_to_registering_caller() {
    let value = AsyncValue::new();

    value
        .on_complete(|_| thread::sleep(Duration::from_millis(200)))
        .unwrap();

    let producer = value.clone();
    let delivery = thread::spawn(move || producer.complete(()).unwrap());

    value.await_blocking().unwrap();

    let failure = value.on_complete(|_| panic!("late continuation")).unwrap_err();
    assert_eq!(failure.index, 1);
    assert_eq!(failure.message, "late continuation");

    let report = delivery.join().unwrap();
    assert!(report.is_clean());
}
