use crate::error::{ContinuationFailure, ErrorKind, panic_message};

use std::collections::VecDeque;
use std::mem;
use std::panic::{self, AssertUnwindSafe};

/// What a continuation receives once its value is terminal.
pub type Outcome<'a, T> = std::result::Result<&'a T, &'a ErrorKind>;

type Callback<T> = Box<dyn for<'a> FnOnce(Outcome<'a, T>) + Send>;

/// A callback registered on an async value, tagged with its registration index.
pub(crate) struct Continuation<T> {
    index: usize,
    callback: Callback<T>,
}

impl<T> Continuation<T> {
    /// Runs the callback, turning a panic into a [`ContinuationFailure`].
    ///
    /// The panic never escapes, so delivery to later continuations goes on.
    pub(crate) fn invoke(self, outcome: Outcome<'_, T>) -> Result<(), ContinuationFailure> {
        let Continuation { index, callback } = self;

        panic::catch_unwind(AssertUnwindSafe(move || callback(outcome))).map_err(|payload| {
            let failure = ContinuationFailure {
                index,
                message: panic_message(payload.as_ref()),
            };
            log::error!("{failure}");
            failure
        })
    }
}

/// FIFO of pending continuations.
///
/// Only continuations registered while the value is pending are queued. The
/// terminal transition takes the whole queue in one step; later registrations
/// never reach it.
pub(crate) struct ContinuationQueue<T> {
    entries: VecDeque<Continuation<T>>,
    registered: usize,
}

impl<T> ContinuationQueue<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            registered: 0,
        }
    }

    /// Wraps a callback with the next registration index.
    pub(crate) fn next<F>(&mut self, callback: F) -> Continuation<T>
    where
        F: for<'a> FnOnce(Outcome<'a, T>) + Send + 'static,
    {
        let index = self.registered;
        self.registered += 1;

        Continuation {
            index,
            callback: Box::new(callback),
        }
    }

    pub(crate) fn push(&mut self, continuation: Continuation<T>) {
        self.entries.push_back(continuation);
    }

    /// Removes every queued continuation, oldest first.
    pub(crate) fn take(&mut self) -> VecDeque<Continuation<T>> {
        mem::take(&mut self.entries)
    }
}

/// Summary of continuation delivery for one `complete`/`fail` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionReport {
    /// Number of continuations invoked by this transition.
    pub delivered: usize,

    /// Continuations that panicked, in invocation order.
    pub failures: Vec<ContinuationFailure>,
}

impl CompletionReport {
    /// Returns `true` if every continuation ran without panicking.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
