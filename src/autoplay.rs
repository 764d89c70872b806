//! Headless greedy player.
//!
//! Each turn takes the placement that scores the most right now (cells placed
//! plus line points). Ties fall to the lowest slot, then raster order, so a
//! seed always replays the same game.

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::core::{clear_lines_in_place, GameSession, TaskKind};
use crate::types::{SessionEvent, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub slot: usize,
    pub row: i32,
    pub col: i32,
    /// Score this move would add
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub episode: u32,
    pub score: u32,
    pub moves: u32,
    pub game_over: bool,
}

/// Best immediate placement for the current tray, if any piece fits.
pub fn greedy_move(session: &GameSession) -> Option<Move> {
    let mut best: Option<Move> = None;
    for (slot, piece) in session.tray().iter().enumerate() {
        let Some(piece) = piece else { continue };
        for row in 0..BOARD_HEIGHT as i32 {
            for col in 0..BOARD_WIDTH as i32 {
                if !session.can_place(slot, row, col) {
                    continue;
                }
                let mut board = *session.board();
                let cells = board.place(*piece, row, col);
                let value = cells + clear_lines_in_place(&mut board).points;
                if best.is_none_or(|b| value > b.value) {
                    best = Some(Move {
                        slot,
                        row,
                        col,
                        value,
                    });
                }
            }
        }
    }
    best
}

/// Advance the clock until no sweep or refill is outstanding
pub fn settle(session: &mut GameSession) {
    while session.is_pending(TaskKind::ClearSweep) || session.is_pending(TaskKind::TrayRefill) {
        session.tick(TICK_MS);
    }
}

/// Play the current session to game over, or until `max_moves` commits.
///
/// Queued session events are handed to `observe` after every step, so the
/// session's bounded event queue never overflows.
pub fn play<F>(session: &mut GameSession, max_moves: Option<u32>, mut observe: F) -> Result<GameSummary>
where
    F: FnMut(&SessionEvent) -> Result<()>,
{
    settle(session);
    drain(session, &mut observe)?;
    while !session.game_over() && max_moves.is_none_or(|m| session.moves() < m) {
        let Some(mv) = greedy_move(session) else { break };
        debug!(slot = mv.slot, row = mv.row, col = mv.col, value = mv.value, "autoplay move");
        session
            .commit_placement(mv.slot, mv.row, mv.col)
            .map_err(|e| anyhow!("{}: {}", e.code(), e.message()))?;
        settle(session);
        drain(session, &mut observe)?;
    }
    Ok(GameSummary {
        episode: session.episode_id(),
        score: session.score(),
        moves: session.moves(),
        game_over: session.game_over(),
    })
}

fn drain<F>(session: &mut GameSession, observe: &mut F) -> Result<()>
where
    F: FnMut(&SessionEvent) -> Result<()>,
{
    for event in session.take_events() {
        observe(&event)?;
    }
    Ok(())
}
