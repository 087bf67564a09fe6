//! Greets each name given on the command line.

use std::io::{self, Write};

use anyhow::Result;
use asyncval::greet::greet;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "greet", version, about = "Print a greeting for each name")]
struct Cli {
    /// Names to greet. Defaults to "World".
    names: Vec<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    log::debug!("greeting {} name(s)", cli.names.len());

    let greeting = greet(&cli.names);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in &greeting.lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{}", greeting.summary())?;

    Ok(())
}
