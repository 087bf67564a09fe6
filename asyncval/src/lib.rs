//! # asyncval
//!
//! **asyncval** provides a minimal single-shot future: a value that is produced
//! on one execution context and consumed on others.
//!
//! An [`AsyncValue`] starts out pending and is settled exactly once, either
//! completed with a value or failed with an [`ErrorKind`]. Consumers may:
//!
//! - **block** until it is settled with [`AsyncValue::await_blocking`] (or
//!   [`AsyncValue::await_timeout`] for a bounded wait),
//! - register **continuations** with [`AsyncValue::on_complete`], which run in
//!   registration order, each exactly once,
//! - **`.await`** it from async code, since it implements [`Future`].
//!
//! Execution contexts are never created implicitly: [`task::spawn`] starts a
//! thread and returns its eventual result right away.
//!
//! ## Quick Start
//!
//! ```rust
//! use asyncval::task;
//! use std::time::Duration;
//!
//! let slow = task::spawn(|| {
//!     std::thread::sleep(Duration::from_millis(10));
//!     42
//! });
//!
//! // The caller is free to do other work here.
//! let fast: Vec<i32> = (1..5).collect();
//!
//! assert_eq!(fast, vec![1, 2, 3, 4]);
//! assert_eq!(slow.await_blocking().unwrap(), 42);
//! ```
//!
//! ## Modules
//!
//! - [`task`] — Explicit execution contexts (`spawn`, `TaskBuilder`)
//! - [`demo`] — The slow/fast harness used by the `async-demo` binary
//! - [`greet`] — Greeting logic used by the `greet` binary
//! - [`thread_id`] — OS thread ids for diagnostics

mod error;
mod value;

pub mod demo;
pub mod greet;
pub mod task;
pub mod thread_id;

pub use error::{AsyncValueError, ContinuationFailure, ErrorKind, Result};
pub use value::{AsyncValue, CompletionReport, Outcome, Status};
