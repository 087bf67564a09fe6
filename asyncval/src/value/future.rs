use super::AsyncValue;
use crate::error::Result;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

impl<T: Clone> Future for AsyncValue<T> {
    /// The completed value, or the failure it was settled with.
    type Output = Result<T>;

    /// Polls the value.
    ///
    /// If the value is already terminal, its outcome is returned
    /// immediately. Otherwise the current waker is registered and the
    /// future returns `Poll::Pending`.
    ///
    /// The state check and the waker registration happen under the same
    /// lock as the terminal transition, so a wake-up cannot slip between them.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut inner = self.shared.inner.lock();

        if let Some(terminal) = inner.state.terminal() {
            return Poll::Ready(terminal.to_result());
        }

        if !inner.wakers.iter().any(|w| w.will_wake(cx.waker())) {
            inner.wakers.push(cx.waker().clone());
        }

        Poll::Pending
    }
}
