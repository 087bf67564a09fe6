use crate::error::{ErrorKind, Result, panic_message};
use crate::value::AsyncValue;

use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// Builder for configuring the execution context of a spawned operation.
///
/// Every spawn starts a dedicated OS thread. `TaskBuilder` lets callers name
/// that thread and choose its stack size before starting it.
///
/// # Examples
///
/// ```rust
/// use asyncval::task::TaskBuilder;
///
/// let value = TaskBuilder::new()
///     .name("answer")
///     .spawn(|| 6 * 7)
///     .unwrap();
///
/// assert_eq!(value.await_blocking().unwrap(), 42);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskBuilder {
    /// Thread name, visible in panic messages and debuggers.
    name: Option<String>,

    /// Stack size in bytes. `None` keeps the platform default.
    stack_size: Option<usize>,
}

impl TaskBuilder {
    /// Creates a builder with the platform defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the spawned thread.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the stack size of the spawned thread.
    ///
    /// # Panics
    ///
    /// Panics if `size == 0`.
    pub fn stack_size(mut self, size: usize) -> Self {
        assert!(size > 0, "stack_size must be > 0");

        self.stack_size = Some(size);
        self
    }

    /// Runs `f` on a new thread and returns its eventual result.
    ///
    /// Returns as soon as the thread has been started. A panic inside `f`
    /// fails the value with [`ErrorKind::Panicked`].
    ///
    /// # Errors
    ///
    /// Returns [`AsyncValueError::Spawn`](crate::AsyncValueError::Spawn) if the
    /// thread could not be created.
    pub fn spawn<F, T>(self, f: F) -> Result<AsyncValue<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + Sync + 'static,
    {
        self.spawn_fallible(move || Ok(f()))
    }

    /// Runs a fallible `f` on a new thread.
    ///
    /// `Ok(v)` completes the value with `v`; `Err(kind)` fails it with `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`AsyncValueError::Spawn`](crate::AsyncValueError::Spawn) if the
    /// thread could not be created.
    pub fn spawn_fallible<F, T>(self, f: F) -> Result<AsyncValue<T>>
    where
        F: FnOnce() -> std::result::Result<T, ErrorKind> + Send + 'static,
        T: Send + Sync + 'static,
    {
        let value = AsyncValue::new();
        let producer = value.clone();

        let mut builder = thread::Builder::new();

        if let Some(name) = self.name {
            builder = builder.name(name);
        }

        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }

        // The join handle is dropped on purpose: the value is the only
        // channel back to the caller.
        builder.spawn(move || run_to_completion(producer, f))?;

        Ok(value)
    }
}

/// Body of every spawned context: run `f`, then settle `producer` with it.
fn run_to_completion<F, T>(producer: AsyncValue<T>, f: F)
where
    F: FnOnce() -> std::result::Result<T, ErrorKind>,
{
    let name = thread::current().name().map(str::to_owned);
    log::debug!(
        "operation {:?} started on thread {}",
        name,
        crate::thread_id::current()
    );

    let settled = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => producer.complete(value),
        Ok(Err(kind)) => producer.fail(kind),
        Err(payload) => producer.fail(ErrorKind::Panicked(panic_message(payload.as_ref()))),
    };

    match settled {
        Ok(report) if !report.is_clean() => log::warn!(
            "operation {:?} settled; {} of {} continuation(s) panicked",
            name,
            report.failures.len(),
            report.delivered
        ),
        Ok(_) => log::debug!("operation {name:?} settled"),
        Err(err) => log::warn!("operation {name:?} could not settle its value: {err}"),
    }
}
