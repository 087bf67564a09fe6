//! The single-shot async value.
//!
//! This module defines [`AsyncValue`] and the pieces it is built from:
//! - the lifecycle state machine (`Pending -> Completed | Failed`),
//! - the ordered continuation queue and its delivery report,
//! - the [`Future`](std::future::Future) integration for async callers.

mod continuation;
mod core;
mod future;
mod state;

pub use continuation::{CompletionReport, Outcome};
pub use self::core::AsyncValue;
pub use state::Status;
