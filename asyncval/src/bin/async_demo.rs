//! Runs the slow/fast scenario, blocking or asynchronous.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use asyncval::demo::{self, DemoConfig, FastSequence};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Run `slow` to completion before `fast`.
    Blocking,
    /// Start `slow` in the background and run `fast` meanwhile.
    Async,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Sequence {
    Fibonacci,
    Counting,
}

impl From<Sequence> for FastSequence {
    fn from(sequence: Sequence) -> Self {
        match sequence {
            Sequence::Fibonacci => FastSequence::Fibonacci,
            Sequence::Counting => FastSequence::Counting,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "async-demo", version, about = "Contrast a blocking and a non-blocking slow operation")]
struct Cli {
    #[arg(short, long, value_enum, default_value_t = Mode::Async)]
    mode: Mode,

    /// Sequence written by the fast operation. Defaults depend on the mode.
    #[arg(short, long, value_enum)]
    sequence: Option<Sequence>,

    /// Delay of the slow operation in milliseconds. Defaults depend on the mode.
    #[arg(short, long)]
    delay_ms: Option<u64>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match cli.mode {
        Mode::Blocking => DemoConfig::blocking(),
        Mode::Async => DemoConfig::asynchronous(),
    };

    if let Some(sequence) = cli.sequence {
        config = config.sequence(sequence.into());
    }

    if let Some(ms) = cli.delay_ms {
        config = config.slow_delay(Duration::from_millis(ms));
    }

    log::debug!("running {:?} scenario with {:?}", cli.mode, config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let report = match cli.mode {
        Mode::Blocking => demo::run_blocking(&mut out, &config),
        Mode::Async => demo::run_async(&mut out, &config),
    }
    .context("demo scenario failed")?;

    out.flush()?;

    log::debug!("scenario finished: {report:?}");

    Ok(())
}
