//! Slow/fast demonstration harness.
//!
//! Two operations are contrasted:
//! - `slow`, a long blocking computation that returns [`SLOW_RESULT`],
//! - `fast`, a short computation that writes a fixed sequence.
//!
//! [`run_blocking`] runs them one after the other on the caller's thread.
//! [`run_async`] starts `slow` on its own execution context, runs `fast`
//! meanwhile, and only then blocks for the slow result.

use crate::error::AsyncValueError;
use crate::task::TaskBuilder;
use crate::thread_id;
use crate::value::AsyncValue;

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use thiserror::Error;

/// Value produced by the slow operation.
pub const SLOW_RESULT: i32 = 42;

/// Value produced by the fast operation.
pub const FAST_RESULT: i32 = 1;

/// Sequence written by the fast operation in its short variant.
pub const FIBONACCI: [i32; 8] = [0, 1, 1, 2, 3, 5, 8, 13];

/// Exclusive upper bound of the fast operation's long variant.
pub const COUNTING_END: i32 = 5000;

/// Errors raised while running a scenario.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Writing the transcript failed.
    #[error("failed to write demo output: {0}")]
    Io(#[from] io::Error),

    /// Starting or awaiting the slow operation failed.
    #[error(transparent)]
    Value(#[from] AsyncValueError),
}

/// Which sequence the fast operation writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FastSequence {
    /// The first Fibonacci numbers, see [`FIBONACCI`].
    #[default]
    Fibonacci,

    /// `1..COUNTING_END`.
    Counting,
}

impl FastSequence {
    /// Elements in output order.
    pub fn values(self) -> Vec<i32> {
        match self {
            FastSequence::Fibonacci => FIBONACCI.to_vec(),
            FastSequence::Counting => (1..COUNTING_END).collect(),
        }
    }
}

/// Parameters of a scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// How long the slow operation sleeps.
    pub slow_delay: Duration,

    /// What the fast operation writes.
    pub sequence: FastSequence,
}

impl DemoConfig {
    /// Defaults of the blocking scenario: 5 s delay, Fibonacci output.
    pub fn blocking() -> Self {
        Self {
            slow_delay: Duration::from_secs(5),
            sequence: FastSequence::Fibonacci,
        }
    }

    /// Defaults of the asynchronous scenario: 100 ms delay, counting output.
    pub fn asynchronous() -> Self {
        Self {
            slow_delay: Duration::from_millis(100),
            sequence: FastSequence::Counting,
        }
    }

    /// Overrides how long the slow operation sleeps.
    pub fn slow_delay(mut self, delay: Duration) -> Self {
        self.slow_delay = delay;
        self
    }

    /// Overrides what the fast operation writes.
    pub fn sequence(mut self, sequence: FastSequence) -> Self {
        self.sequence = sequence;
        self
    }
}

/// Outcome of a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoReport {
    /// Value returned by the slow operation.
    pub slow_result: i32,

    /// Value returned by the fast operation.
    pub fast_result: i32,

    /// Whether the slow value was still pending once `fast` had returned.
    /// Always `false` for the blocking scenario.
    pub slow_pending_after_fast: bool,
}

/// Simulates a long-running blocking computation.
pub fn slow(delay: Duration) -> i32 {
    log::info!("Start: Slow operation on thread {}", thread_id::current());
    thread::sleep(delay);
    log::info!("End:   Slow operation on thread {}", thread_id::current());

    SLOW_RESULT
}

/// Starts [`slow`] on its own execution context.
///
/// Returns immediately; the result arrives through the returned value.
pub fn slow_async(delay: Duration) -> Result<AsyncValue<i32>, AsyncValueError> {
    TaskBuilder::new().name("slow").spawn(move || slow(delay))
}

/// Writes every element of `sequence` on its own line.
pub fn fast<W: Write>(out: &mut W, sequence: FastSequence) -> io::Result<i32> {
    log::info!("Start: Fast operation on thread {}", thread_id::current());

    for element in sequence.values() {
        writeln!(out, "{element}")?;
    }

    log::info!("End:   Fast operation on thread {}", thread_id::current());

    Ok(FAST_RESULT)
}

/// Runs `slow` then `fast` on the calling thread.
pub fn run_blocking<W: Write>(out: &mut W, config: &DemoConfig) -> Result<DemoReport, DemoError> {
    let slow_result = slow(config.slow_delay);
    let fast_result = fast(out, config.sequence)?;

    write_summary(out, slow_result, fast_result, "Done.")?;

    Ok(DemoReport {
        slow_result,
        fast_result,
        slow_pending_after_fast: false,
    })
}

/// Starts `slow` in the background, runs `fast`, then waits for `slow`.
pub fn run_async<W: Write>(out: &mut W, config: &DemoConfig) -> Result<DemoReport, DemoError> {
    let slow_value = slow_async(config.slow_delay)?;
    let fast_result = fast(out, config.sequence)?;

    let slow_pending_after_fast = slow_value.is_pending();
    let slow_result = slow_value.await_blocking()?;

    write_summary(out, slow_result, fast_result, "Done")?;

    Ok(DemoReport {
        slow_result,
        fast_result,
        slow_pending_after_fast,
    })
}

fn write_summary<W: Write>(out: &mut W, slow: i32, fast: i32, done: &str) -> io::Result<()> {
    writeln!(out, "The result from the slow task is {slow}")?;
    writeln!(out, "The result from the fast task is {fast}")?;
    writeln!(out, "{done}")
}
