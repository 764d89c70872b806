//! Headless runner: plays whole games with the greedy policy and prints one
//! summary line per game.
//!
//! Logs go to stderr; summaries go to stdout.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use block_blast::autoplay::play;
use block_blast::config::{init_logging, LogSink, SessionArgs};
use block_blast::core::GameSession;

#[derive(Debug, Parser)]
#[command(name = "block-blast-autoplay", about = "Play Block Blast headlessly with a greedy policy")]
struct Cli {
    #[command(flatten)]
    session: SessionArgs,

    /// Number of consecutive games
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Stop a game after this many placements
    #[arg(long)]
    max_moves: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.session.verbose, LogSink::Stderr)?;

    let mut journal = cli.session.open_journal()?;
    let mut session = GameSession::with_config(cli.session.seed_or_clock(), cli.session.session_config());
    info!(seed = session.seed(), games = cli.games, "autoplay started");

    let mut total = 0u64;
    for _ in 0..cli.games {
        session.start_session();
        let summary = play(&mut session, cli.max_moves, |event| match journal.as_mut() {
            Some(j) => j.record(event),
            None => Ok(()),
        })?;
        total += summary.score as u64;
        println!(
            "game {}: score {} moves {}{}",
            summary.episode,
            summary.score,
            summary.moves,
            if summary.game_over { "" } else { " (stopped)" }
        );
    }

    if let Some(j) = journal.as_mut() {
        j.flush()?;
    }
    if cli.games > 1 {
        println!("mean score {}", total / cli.games as u64);
    }
    Ok(())
}
