use asyncval::task::{self, TaskBuilder};
use asyncval::{AsyncValueError, ErrorKind};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_spawn_returns_before_operation_finishes() {
    let (release, gate) = mpsc::channel::<()>();

    let start = Instant::now();
    let value = task::spawn(move || {
        gate.recv().unwrap();
        42
    });

    assert!(value.is_pending());
    assert!(start.elapsed() < Duration::from_secs(1));

    release.send(()).unwrap();
    assert_eq!(value.await_blocking().unwrap(), 42);
}

#[test]
fn test_spawn_runs_on_another_thread() {
    let caller = thread::current().id();

    let value = task::spawn(move || thread::current().id());

    assert_ne!(value.await_blocking().unwrap(), caller);
}

#[test]
fn test_spawn_panic_fails_value() {
    let value = task::spawn(|| -> i32 { panic!("slow operation crashed") });

    match value.await_blocking() {
        Err(AsyncValueError::OperationFailed(ErrorKind::Panicked(msg))) => {
            assert_eq!(msg, "slow operation crashed");
        }
        other => panic!("expected a panicked failure, got {other:?}"),
    }
}

#[test]
fn test_spawn_fallible_error_fails_value() {
    let value = task::spawn_fallible(|| -> Result<i32, ErrorKind> {
        Err(ErrorKind::message("no data"))
    });

    let err = value.await_blocking().unwrap_err();

    assert_eq!(err.kind(), Some(&ErrorKind::Message("no data".into())));
}

#[test]
fn test_spawn_fallible_ok_completes_value() {
    let value = task::spawn_fallible(|| Ok::<_, ErrorKind>(vec![1, 2, 3]));

    assert_eq!(value.await_blocking().unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_builder_names_thread() {
    let value = TaskBuilder::new()
        .name("worker-7")
        .spawn(|| thread::current().name().map(str::to_owned))
        .unwrap();

    assert_eq!(value.await_blocking().unwrap().as_deref(), Some("worker-7"));
}

#[test]
fn test_builder_with_stack_size() {
    let value = TaskBuilder::new()
        .stack_size(256 * 1024)
        .spawn(|| (1..=10).sum::<i32>())
        .unwrap();

    assert_eq!(value.await_blocking().unwrap(), 55);
}

#[test]
#[should_panic(expected = "stack_size must be > 0")]
fn test_builder_zero_stack_size_panics() {
    let _ = TaskBuilder::new().stack_size(0);
}

#[test]
fn test_continuation_runs_on_producing_thread() {
    let (release, gate) = mpsc::channel::<()>();
    let (report, seen) = mpsc::channel();

    let value = TaskBuilder::new()
        .name("producer")
        .spawn(move || {
            gate.recv().unwrap();
            5
        })
        .unwrap();

    value
        .on_success(move |v| {
            let name = thread::current().name().map(str::to_owned);
            report.send((*v, name)).unwrap();
        })
        .unwrap();

    release.send(()).unwrap();

    let (v, name) = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(v, 5);
    assert_eq!(name.as_deref(), Some("producer"));
}
