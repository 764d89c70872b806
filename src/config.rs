//! Runtime configuration shared by the binaries.
//!
//! Every flag has an environment fallback, so a wrapper script can pin a seed
//! or a journal path without touching the command line.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use crate::core::SessionConfig;
use crate::journal::Journal;
use crate::types::{CLEAR_SWEEP_MS, TRAY_REFILL_MS};

#[derive(Debug, Clone, clap::Args)]
pub struct SessionArgs {
    /// RNG seed; the wall clock is used when absent
    #[arg(long, env = "BLOCKBLAST_SEED")]
    pub seed: Option<u32>,

    /// Delay before flagged lines are emptied (0 = immediately)
    #[arg(long, env = "BLOCKBLAST_CLEAR_DELAY_MS", default_value_t = CLEAR_SWEEP_MS)]
    pub clear_delay_ms: u32,

    /// Delay before an emptied tray is refilled (0 = immediately)
    #[arg(long, env = "BLOCKBLAST_REFILL_DELAY_MS", default_value_t = TRAY_REFILL_MS)]
    pub refill_delay_ms: u32,

    /// Append session events as JSON lines to this file
    #[arg(long, env = "BLOCKBLAST_JOURNAL")]
    pub journal: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    pub verbose: u8,
}

impl SessionArgs {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            clear_sweep_ms: self.clear_delay_ms,
            tray_refill_ms: self.refill_delay_ms,
        }
    }

    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }

    pub fn open_journal(&self) -> Result<Option<Journal>> {
        self.journal.as_deref().map(Journal::open).transpose()
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Map a `-v` count to a level; no flag means warnings and errors only.
pub fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub enum LogSink<'a> {
    /// No subscriber is installed
    Off,
    Stderr,
    /// Appended without ANSI colors
    File(&'a Path),
}

pub fn init_logging(verbose: u8, sink: LogSink<'_>) -> Result<()> {
    let level = LevelFilter::from_level(verbosity_level(verbose));
    match sink {
        LogSink::Off => {}
        LogSink::Stderr => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .with(level)
                .try_init()?;
        }
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(level)
                .try_init()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        session: SessionArgs,
    }

    #[test]
    fn defaults_use_standard_timing() {
        let cli = Cli::try_parse_from(["bb"]).unwrap();
        assert_eq!(cli.session.session_config(), SessionConfig::default());
        assert_eq!(cli.session.verbose, 0);
    }

    #[test]
    fn flags_override_timing_and_seed() {
        let cli = Cli::try_parse_from([
            "bb",
            "--seed",
            "42",
            "--clear-delay-ms",
            "0",
            "--refill-delay-ms",
            "0",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.session.seed_or_clock(), 42);
        assert_eq!(cli.session.session_config(), SessionConfig::immediate());
        assert_eq!(verbosity_level(cli.session.verbose), Level::DEBUG);
    }
}
