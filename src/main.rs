//! Terminal Block Blast runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer renderer
//! from the `term` crate. Pieces are dragged from the tray with the left
//! mouse button and committed on release.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use block_blast::config::{init_logging, LogSink, SessionArgs};
use block_blast::core::GameSession;
use block_blast::input::{
    handle_key_event, pointer_event, should_quit, DragController, DragOutcome, PointerEvent,
};
use block_blast::journal::Journal;
use block_blast::term::{FloatingPiece, FrameBuffer, GameView, TerminalRenderer, Viewport};
use block_blast::types::{GameAction, SurfaceLayout, TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "block-blast", about = "Drag pieces onto a 10x10 board and clear lines")]
struct Cli {
    #[command(flatten)]
    session: SessionArgs,

    /// Write logs here; the terminal UI owns stdout, so nothing is logged
    /// without it
    #[arg(long, env = "BLOCKBLAST_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sink = cli.log_file.as_deref().map_or(LogSink::Off, LogSink::File);
    init_logging(cli.session.verbose, sink)?;

    let mut journal = cli.session.open_journal()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cli.session, journal.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(j) = journal.as_mut() {
        j.flush()?;
    }
    result
}

fn run(term: &mut TerminalRenderer, args: &SessionArgs, mut journal: Option<&mut Journal>) -> Result<()> {
    let mut session = GameSession::with_config(args.seed_or_clock(), args.session_config());
    session.start_session();
    info!(seed = session.seed(), "block blast started");

    let view = GameView::default();
    let mut drag = DragController::new();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        let events = session.take_events();
        if let Some(j) = journal.as_mut() {
            j.record_all(&events)?;
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let layout = view.layout(session.tray(), viewport);

        if dirty {
            let preview = drag.preview();
            let grid = session.display_grid(preview.as_ref());
            let floating = drag
                .state()
                .zip(drag.floating_origin())
                .map(|(s, origin)| FloatingPiece {
                    slot: s.slot,
                    piece: s.piece,
                    origin,
                });
            view.render_into(&session.snapshot(), &grid, floating.as_ref(), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(GameAction::NewGame) => {
                            info!(
                                phase = session.phase().as_str(),
                                score = session.score(),
                                "new game requested"
                            );
                            drag.cancel();
                            session.start_session();
                            dirty = true;
                        }
                        Some(GameAction::CancelDrag) => dirty |= drag.cancel(),
                        None => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(ev) = pointer_event(mouse) {
                        dirty |= handle_pointer(&mut session, &mut drag, &layout.surface, ev);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if session.tick(TICK_MS) {
                drag.revalidate(&session);
                dirty = true;
            }
        }
    }
}

/// Returns true when the frame needs redrawing.
fn handle_pointer(
    session: &mut GameSession,
    drag: &mut DragController,
    layout: &SurfaceLayout,
    ev: PointerEvent,
) -> bool {
    match ev {
        PointerEvent::Press { x, y } => drag.press(session, layout, x, y),
        PointerEvent::Move { x, y } => {
            // The floating piece moves even when the target cell does not.
            drag.moved(session, layout, x, y);
            drag.is_dragging()
        }
        PointerEvent::Release { x, y } => {
            drag.moved(session, layout, x, y);
            match drag.release() {
                DragOutcome::Commit { slot, row, col } => {
                    if let Err(e) = session.commit_placement(slot, row, col) {
                        warn!(code = e.code(), slot, row, col, "{}", e.message());
                    }
                    true
                }
                DragOutcome::Cancel => true,
                DragOutcome::Idle => false,
            }
        }
    }
}
