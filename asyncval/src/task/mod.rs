//! Explicit execution contexts.
//!
//! Starting an operation "in the background" is always a visible call in
//! this crate: [`spawn`] and [`spawn_fallible`] start a new thread, run the
//! closure there, and hand back an [`AsyncValue`] right away.
//!
//! Use [`TaskBuilder`] to name the thread or pick its stack size.

mod builder;

pub use builder::TaskBuilder;

use crate::error::ErrorKind;
use crate::value::AsyncValue;

/// Runs `f` on a new thread and returns its eventual result.
///
/// # Panics
///
/// Panics if the operating system fails to create the thread, like
/// [`std::thread::spawn`]. Use [`TaskBuilder::spawn`] to handle that case.
///
/// # Examples
///
/// ```rust
/// let value = asyncval::task::spawn(|| 42);
/// assert_eq!(value.await_blocking().unwrap(), 42);
/// ```
pub fn spawn<F, T>(f: F) -> AsyncValue<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + Sync + 'static,
{
    TaskBuilder::new()
        .spawn(f)
        .expect("failed to spawn execution context")
}

/// Runs a fallible `f` on a new thread and returns its eventual result.
///
/// # Panics
///
/// Panics if the operating system fails to create the thread.
pub fn spawn_fallible<F, T>(f: F) -> AsyncValue<T>
where
    F: FnOnce() -> Result<T, ErrorKind> + Send + 'static,
    T: Send + Sync + 'static,
{
    TaskBuilder::new()
        .spawn_fallible(f)
        .expect("failed to spawn execution context")
}
