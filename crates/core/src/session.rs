//! Session module - owns one game and drives its turn structure
//!
//! This module ties together the board, tray, RNG, scoring, and schedule.
//! It deals trays, applies committed placements, flags and sweeps cleared
//! lines, and decides when the game is over.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::board::Board;
use crate::display::{display_grid, DisplayGrid, DropPreview};
use crate::legality::{can_place, is_game_over};
use crate::rng::{deal_tray, SimpleRng};
use crate::schedule::{Schedule, TaskKind};
use crate::scoring::clear_lines_in_place;
use crate::snapshot::SessionSnapshot;
use crate::types::*;

/// Maximum queued events between drains; the oldest is dropped beyond this
pub const EVENT_CAPACITY: usize = 16;

/// Timing knobs for deferred work
///
/// A zero delay runs the task synchronously inside the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub clear_sweep_ms: u32,
    pub tray_refill_ms: u32,
}

impl SessionConfig {
    /// Sweep and refill happen inside the commit itself
    pub fn immediate() -> Self {
        Self {
            clear_sweep_ms: 0,
            tray_refill_ms: 0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clear_sweep_ms: CLEAR_SWEEP_MS,
            tray_refill_ms: TRAY_REFILL_MS,
        }
    }
}

/// Where the session is in its turn structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Tray empty: not started yet, or waiting for the refill deal
    Empty,
    /// At least one piece is offered and can be committed
    Dealt,
    /// No offered piece fits; only a new session leaves this state
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Empty => "empty",
            Phase::Dealt => "dealt",
            Phase::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotPlayable,
    SlotOutOfRange,
    EmptySlot,
    Blocked,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::SlotOutOfRange | PlaceError::EmptySlot => "invalid_slot",
            PlaceError::Blocked => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "session is not started or is over",
            PlaceError::SlotOutOfRange => "tray slot index out of range",
            PlaceError::EmptySlot => "tray slot has already been played",
            PlaceError::Blocked => "piece does not fit at the target anchor",
        }
    }
}

/// What one commit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub cells_placed: u32,
    pub lines_cleared: u32,
    pub line_points: u32,
    pub rows: ArrayVec<u8, { BOARD_HEIGHT as usize }>,
    pub cols: ArrayVec<u8, { BOARD_WIDTH as usize }>,
    /// The commit played the last piece in the tray
    pub tray_emptied: bool,
    pub game_over: bool,
}

impl CommitOutcome {
    pub fn score_delta(&self) -> u32 {
        self.cells_placed + self.line_points
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    tray: TraySlots,
    score: u32,
    game_over: bool,
    started: bool,
    /// Monotonic session id (increments on every start).
    episode_id: u32,
    /// Commits in the current session.
    moves: u32,
    seed: u32,
    rng: SimpleRng,
    config: SessionConfig,
    schedule: Schedule,
    events: ArrayVec<SessionEvent, EVENT_CAPACITY>,
}

impl GameSession {
    /// Create a new session with the given RNG seed and default timing
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, SessionConfig::default())
    }

    pub fn with_config(seed: u32, config: SessionConfig) -> Self {
        Self {
            board: Board::new(),
            tray: [None; TRAY_SIZE],
            score: 0,
            game_over: false,
            started: false,
            episode_id: 0,
            moves: 0,
            seed,
            rng: SimpleRng::new(seed),
            config,
            schedule: Schedule::new(),
            events: ArrayVec::new(),
        }
    }

    /// Discard all state and begin a fresh game.
    ///
    /// Pending sweeps and refills from the previous session are cancelled.
    /// The RNG stream continues, so consecutive sessions differ but a whole
    /// run is reproducible from the seed.
    pub fn start_session(&mut self) {
        let cancelled = self.schedule.cancel_all();
        self.board.clear();
        self.tray = [None; TRAY_SIZE];
        self.score = 0;
        self.moves = 0;
        self.game_over = false;
        self.started = true;
        self.episode_id = self.episode_id.wrapping_add(1);

        info!(
            episode = self.episode_id,
            cancelled_tasks = cancelled,
            "session started"
        );
        self.push_event(SessionEvent::Started {
            episode: self.episode_id,
            seed: self.rng.state(),
        });

        self.deal();
    }

    /// Insert a custom tray (for fixtures and replays).
    ///
    /// Like a deal, this re-runs game-over detection.
    pub fn set_tray(&mut self, tray: TraySlots) {
        self.tray = tray;
        self.game_over = false;
        if self.tray.iter().any(Option::is_some) {
            self.push_event(SessionEvent::Dealt {
                episode: self.episode_id,
                tray: self.tray,
            });
            self.check_game_over();
        }
    }

    /// Replace the board (for fixtures and replays)
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tray(&self) -> &TraySlots {
        &self.tray
    }

    pub fn piece_at(&self, slot: usize) -> Option<PieceInstance> {
        self.tray.get(slot).copied().flatten()
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if !self.started || self.tray.iter().all(Option::is_none) {
            Phase::Empty
        } else {
            Phase::Dealt
        }
    }

    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.schedule.is_pending(kind)
    }

    /// Legality of the piece in `slot` at (row, col) against the live board
    pub fn can_place(&self, slot: usize, row: i32, col: i32) -> bool {
        self.piece_at(slot)
            .is_some_and(|p| can_place(&self.board, p.key, row, col))
    }

    /// Commit the piece in `slot` with its anchor at (row, col).
    ///
    /// Order within one commit: place, add cells placed, flag full lines,
    /// add line points, empty the slot, schedule the sweep, then either
    /// schedule the refill or re-check for game over.
    pub fn commit_placement(
        &mut self,
        slot: usize,
        row: i32,
        col: i32,
    ) -> Result<CommitOutcome, PlaceError> {
        if !self.started || self.game_over {
            return Err(PlaceError::NotPlayable);
        }
        let piece = self
            .tray
            .get(slot)
            .copied()
            .ok_or(PlaceError::SlotOutOfRange)?
            .ok_or(PlaceError::EmptySlot)?;
        if !can_place(&self.board, piece.key, row, col) {
            return Err(PlaceError::Blocked);
        }

        let cells_placed = self.board.place(piece, row, col);
        self.score = self.score.saturating_add(cells_placed);

        let clear = clear_lines_in_place(&mut self.board);
        self.score = self.score.saturating_add(clear.points);

        self.tray[slot] = None;
        self.moves += 1;

        debug!(
            slot,
            piece = piece.key.as_str(),
            row,
            col,
            cells_placed,
            lines = clear.line_count(),
            score = self.score,
            "placement committed"
        );
        self.push_event(SessionEvent::Committed {
            episode: self.episode_id,
            move_index: self.moves,
            slot: slot as u8,
            piece,
            row: row as i8,
            col: col as i8,
            cells_placed,
            lines_cleared: clear.line_count(),
            line_points: clear.points,
            score: self.score,
        });

        if clear.line_count() > 0 {
            self.defer(TaskKind::ClearSweep);
        }

        let tray_emptied = self.tray.iter().all(Option::is_none);
        if tray_emptied {
            self.defer(TaskKind::TrayRefill);
        } else {
            self.check_game_over();
        }

        Ok(CommitOutcome {
            cells_placed,
            lines_cleared: clear.line_count(),
            line_points: clear.points,
            rows: clear.lines.rows,
            cols: clear.lines.cols,
            tray_emptied,
            game_over: self.game_over,
        })
    }

    /// Advance deferred work by `elapsed_ms`. Returns true if anything fired.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.started {
            return false;
        }
        let due = self.schedule.advance(elapsed_ms);
        let fired = !due.is_empty();
        for kind in due {
            self.run_task(kind);
        }
        fired
    }

    /// Take every queued event, oldest first
    pub fn take_events(&mut self) -> ArrayVec<SessionEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.board = self.board;
        out.tray = self.tray;
        out.score = self.score;
        out.phase = self.phase();
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.moves = self.moves;
        out.seed = self.seed;
        out.sweep_in_ms = self.schedule.remaining_ms(TaskKind::ClearSweep);
        out.refill_in_ms = self.schedule.remaining_ms(TaskKind::TrayRefill);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Render-ready grid of the live board with an optional drag preview
    pub fn display_grid(&self, preview: Option<&DropPreview>) -> DisplayGrid {
        display_grid(&self.board, preview)
    }

    fn deal(&mut self) {
        self.tray = deal_tray(&mut self.rng);
        debug!(
            episode = self.episode_id,
            tray = ?self.tray.map(|p| p.map(|p| p.key.as_str())),
            "tray dealt"
        );
        self.push_event(SessionEvent::Dealt {
            episode: self.episode_id,
            tray: self.tray,
        });
        self.check_game_over();
    }

    /// Game over is judged on the settled board: flagged cells are already
    /// committed to removal.
    fn check_game_over(&mut self) {
        if self.game_over || !is_game_over(&self.tray, &self.board.settled()) {
            return;
        }
        self.game_over = true;
        info!(
            episode = self.episode_id,
            score = self.score,
            moves = self.moves,
            "game over"
        );
        self.push_event(SessionEvent::GameOver {
            episode: self.episode_id,
            score: self.score,
            moves: self.moves,
        });
    }

    fn defer(&mut self, kind: TaskKind) {
        let delay = match kind {
            TaskKind::ClearSweep => self.config.clear_sweep_ms,
            TaskKind::TrayRefill => self.config.tray_refill_ms,
        };
        if delay == 0 {
            self.run_task(kind);
        } else if !self.schedule.schedule(kind, delay) {
            debug!(task = kind.as_str(), "task already pending");
        }
    }

    fn run_task(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::ClearSweep => {
                let cells = self.board.sweep_clearing();
                debug!(cells, "clearing cells swept");
                self.push_event(SessionEvent::Swept {
                    episode: self.episode_id,
                    cells,
                });
            }
            TaskKind::TrayRefill => {
                if !self.game_over && self.tray.iter().all(Option::is_none) {
                    self.deal();
                }
            }
        }
    }

    fn push_event(&mut self, event: SessionEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
