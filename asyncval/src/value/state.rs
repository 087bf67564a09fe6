use crate::error::{AsyncValueError, ErrorKind, Result};
use crate::value::continuation::Outcome;

use std::sync::Arc;

/// Observable lifecycle status of an [`AsyncValue`](crate::AsyncValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The producing operation has not finished yet.
    Pending,

    /// The value was completed successfully.
    Completed,

    /// The value was failed.
    Failed,
}

/// Internal state of an async value.
///
/// The only transition is `Pending -> Terminal`. The terminal payload sits
/// behind an `Arc` so continuations can borrow it without holding the lock.
pub(crate) enum State<T> {
    Pending,
    Terminal(Arc<Terminal<T>>),
}

/// A terminal outcome. Immutable once constructed.
pub(crate) enum Terminal<T> {
    Completed(T),
    Failed(ErrorKind),
}

impl<T> State<T> {
    pub(crate) fn status(&self) -> Status {
        match self {
            State::Pending => Status::Pending,
            State::Terminal(terminal) => terminal.status(),
        }
    }

    pub(crate) fn terminal(&self) -> Option<&Arc<Terminal<T>>> {
        match self {
            State::Pending => None,
            State::Terminal(terminal) => Some(terminal),
        }
    }
}

impl<T> Terminal<T> {
    pub(crate) fn status(&self) -> Status {
        match self {
            Terminal::Completed(_) => Status::Completed,
            Terminal::Failed(_) => Status::Failed,
        }
    }

    /// Borrowed view handed to continuations.
    pub(crate) fn outcome(&self) -> Outcome<'_, T> {
        match self {
            Terminal::Completed(value) => Ok(value),
            Terminal::Failed(kind) => Err(kind),
        }
    }

    /// Owned view handed to awaiters.
    pub(crate) fn to_result(&self) -> Result<T>
    where
        T: Clone,
    {
        match self {
            Terminal::Completed(value) => Ok(value.clone()),
            Terminal::Failed(kind) => Err(AsyncValueError::OperationFailed(kind.clone())),
        }
    }
}
