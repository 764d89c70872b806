use crate::board::Board;
use crate::session::Phase;
use crate::types::TraySlots;

/// Read-only copy of everything a renderer or observer needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub board: Board,
    pub tray: TraySlots,
    pub score: u32,
    pub phase: Phase,
    pub game_over: bool,
    pub episode_id: u32,
    pub moves: u32,
    pub seed: u32,
    /// Milliseconds until the pending clear sweep, if any
    pub sweep_in_ms: Option<u32>,
    /// Milliseconds until the pending tray refill, if any
    pub refill_in_ms: Option<u32>,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Dealt
    }

    /// Number of pieces still in the tray
    pub fn pieces_left(&self) -> usize {
        self.tray.iter().flatten().count()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            board: Board::new(),
            tray: [None; 3],
            score: 0,
            phase: Phase::Empty,
            game_over: false,
            episode_id: 0,
            moves: 0,
            seed: 0,
            sweep_in_ms: None,
            refill_in_ms: None,
        }
    }
}
