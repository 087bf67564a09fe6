use super::continuation::{CompletionReport, Continuation, ContinuationQueue, Outcome};
use super::state::{State, Status, Terminal};
use crate::error::{AsyncValueError, ContinuationFailure, ErrorKind, Result};

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::sync::Arc;
use std::task::Waker;
use std::time::{Duration, Instant};

/// Everything guarded by the value's lock.
pub(crate) struct Inner<T> {
    /// `Pending` until the single winning `complete`/`fail`.
    pub(crate) state: State<T>,

    /// Continuations waiting for the terminal state.
    pub(crate) continuations: ContinuationQueue<T>,

    /// Wakers of tasks awaiting this value through its `Future` impl.
    ///
    /// Only cleared by the terminal transition: a future dropped while
    /// pending leaves its waker here until then.
    pub(crate) wakers: Vec<Waker>,
}

/// Allocation shared by every clone of an [`AsyncValue`].
pub(crate) struct Shared<T> {
    pub(crate) inner: Mutex<Inner<T>>,

    /// Signalled once, on the terminal transition.
    ready: Condvar,
}

/// A single-shot value that becomes available at some later point.
///
/// An `AsyncValue` starts out pending and transitions exactly once, either to
/// completed (through [`complete`](Self::complete)) or to failed (through
/// [`fail`](Self::fail)). After that it never changes again.
///
/// Cloning an `AsyncValue` yields another handle to the same cell: the
/// producing side keeps one handle, any number of consumers keep others, and
/// the cell is freed when the last handle is dropped.
///
/// Consumers can:
/// - block the current thread with [`await_blocking`](Self::await_blocking),
/// - register continuations with [`on_complete`](Self::on_complete),
/// - `.await` it from async code, since it implements [`Future`].
///
/// # Examples
///
/// ```rust
/// use asyncval::AsyncValue;
///
/// let value = AsyncValue::new();
/// let producer = value.clone();
///
/// std::thread::spawn(move || {
///     producer.complete(42).unwrap();
/// });
///
/// assert_eq!(value.await_blocking().unwrap(), 42);
/// ```
pub struct AsyncValue<T> {
    pub(crate) shared: Arc<Shared<T>>,
}

impl<T> AsyncValue<T> {
    /// Creates a new value in the pending state.
    pub fn new() -> Self {
        Self::with_state(State::Pending)
    }

    /// Creates a value that is already completed.
    pub fn completed(value: T) -> Self {
        Self::with_state(State::Terminal(Arc::new(Terminal::Completed(value))))
    }

    /// Creates a value that is already failed.
    pub fn failed(kind: ErrorKind) -> Self {
        Self::with_state(State::Terminal(Arc::new(Terminal::Failed(kind))))
    }

    fn with_state(state: State<T>) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state,
                    continuations: ContinuationQueue::new(),
                    wakers: Vec::new(),
                }),
                ready: Condvar::new(),
            }),
        }
    }

    /// Current lifecycle status.
    pub fn status(&self) -> Status {
        self.shared.inner.lock().state.status()
    }

    /// Returns `true` while no terminal transition has happened.
    pub fn is_pending(&self) -> bool {
        self.status() == Status::Pending
    }

    /// Returns `true` once the value is completed or failed.
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    /// Returns `true` if both handles point to the same underlying cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Completes the value and delivers it to every registered continuation.
    ///
    /// Continuations run synchronously on the calling thread, in registration
    /// order. A panicking continuation does not stop the others; it is
    /// reported in the returned [`CompletionReport`].
    ///
    /// # Errors
    ///
    /// Returns [`AsyncValueError::InvalidState`] if the value is already
    /// terminal. The existing outcome is left untouched.
    pub fn complete(&self, value: T) -> Result<CompletionReport> {
        self.settle(Terminal::Completed(value))
    }

    /// Fails the value and delivers the error to every registered continuation.
    ///
    /// # Errors
    ///
    /// Returns [`AsyncValueError::InvalidState`] if the value is already
    /// terminal.
    pub fn fail(&self, kind: ErrorKind) -> Result<CompletionReport> {
        self.settle(Terminal::Failed(kind))
    }

    /// Performs the `Pending -> Terminal` transition.
    ///
    /// The check and the store happen under the lock, so among concurrent
    /// callers exactly one wins.
    fn settle(&self, terminal: Terminal<T>) -> Result<CompletionReport> {
        let status = terminal.status();

        let (terminal, wakers, queued) = {
            let mut inner = self.shared.inner.lock();

            if inner.state.terminal().is_some() {
                log::debug!("rejected {status:?} transition on terminal async value");
                return Err(AsyncValueError::InvalidState);
            }

            let terminal = Arc::new(terminal);
            inner.state = State::Terminal(terminal.clone());

            let queued = inner.continuations.take();

            log::debug!(
                "async value transitioned to {status:?} with {} continuation(s) queued",
                queued.len()
            );

            (terminal, mem::take(&mut inner.wakers), queued)
        };

        self.shared.ready.notify_all();

        for waker in wakers {
            waker.wake();
        }

        Ok(Self::deliver(&terminal, queued))
    }

    /// Runs the continuations queued before the transition, outside the lock.
    fn deliver(
        terminal: &Terminal<T>,
        queued: VecDeque<Continuation<T>>,
    ) -> CompletionReport {
        let mut report = CompletionReport::default();

        for continuation in queued {
            report.delivered += 1;

            if let Err(failure) = continuation.invoke(terminal.outcome()) {
                report.failures.push(failure);
            }
        }

        report
    }

    /// Registers a continuation.
    ///
    /// While the value is pending the continuation is queued and later run by
    /// whichever context completes or fails it. If the value is already
    /// terminal, the continuation runs immediately on the calling thread,
    /// even if the completing context is still delivering earlier ones.
    ///
    /// # Errors
    ///
    /// When the continuation runs immediately and panics, the panic is caught
    /// and returned as a [`ContinuationFailure`].
    pub fn on_complete<F>(&self, callback: F) -> std::result::Result<(), ContinuationFailure>
    where
        F: for<'a> FnOnce(Outcome<'a, T>) + Send + 'static,
    {
        let (continuation, terminal) = {
            let mut inner = self.shared.inner.lock();
            let continuation = inner.continuations.next(callback);

            match inner.state.terminal().cloned() {
                Some(terminal) => (continuation, terminal),
                None => {
                    inner.continuations.push(continuation);
                    return Ok(());
                }
            }
        };

        continuation.invoke(terminal.outcome())
    }

    /// Registers a continuation that only runs if the value completes.
    pub fn on_success<F>(&self, callback: F) -> std::result::Result<(), ContinuationFailure>
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.on_complete(move |outcome| {
            if let Ok(value) = outcome {
                callback(value);
            }
        })
    }

    /// Registers a continuation that only runs if the value fails.
    pub fn on_failure<F>(&self, callback: F) -> std::result::Result<(), ContinuationFailure>
    where
        F: FnOnce(&ErrorKind) + Send + 'static,
    {
        self.on_complete(move |outcome| {
            if let Err(kind) = outcome {
                callback(kind);
            }
        })
    }

    /// Blocks the current thread until the value is terminal.
    ///
    /// The thread parks on a condition variable signalled by the terminal
    /// transition; it does not spin.
    ///
    /// # Errors
    ///
    /// Returns [`AsyncValueError::OperationFailed`] if the value was failed.
    pub fn await_blocking(&self) -> Result<T>
    where
        T: Clone,
    {
        let mut inner = self.shared.inner.lock();

        loop {
            if let Some(terminal) = inner.state.terminal() {
                return terminal.to_result();
            }

            self.shared.ready.wait(&mut inner);
        }
    }

    /// Blocks until the value is terminal or `timeout` elapses.
    ///
    /// Timing out does not affect the value or its producer; the value can
    /// still be awaited again later. A timeout too large to express as a
    /// deadline waits without bound.
    ///
    /// # Errors
    ///
    /// Returns [`AsyncValueError::Timeout`] if the deadline passes first, or
    /// [`AsyncValueError::OperationFailed`] if the value was failed.
    pub fn await_timeout(&self, timeout: Duration) -> Result<T>
    where
        T: Clone,
    {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.await_blocking();
        };

        let mut inner = self.shared.inner.lock();

        loop {
            if let Some(terminal) = inner.state.terminal() {
                return terminal.to_result();
            }

            if self.shared.ready.wait_until(&mut inner, deadline).timed_out() {
                return match inner.state.terminal() {
                    Some(terminal) => terminal.to_result(),
                    None => Err(AsyncValueError::Timeout(timeout)),
                };
            }
        }
    }

    /// Returns the outcome without blocking, or `None` while pending.
    pub fn try_get(&self) -> Option<Result<T>>
    where
        T: Clone,
    {
        self.shared
            .inner
            .lock()
            .state
            .terminal()
            .map(|terminal| terminal.to_result())
    }
}

impl<T> Clone for AsyncValue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Default for AsyncValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for AsyncValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncValue")
            .field("status", &self.status())
            .finish()
    }
}
