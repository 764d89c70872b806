//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! shared by the engine, the input layer, the terminal view, and the journal.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 10 rows (indexed 0-9)
//! - **Tray**: 3 slots
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `CLEAR_SWEEP_MS` | 300 | Delay before clearing cells are emptied |
//! | `TRAY_REFILL_MS` | 200 | Delay before an empty tray is re-dealt |
//!
//! # Examples
//!
//! ```
//! use block_blast_types::{Color, PieceKey, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let key = PieceKey::from_str("d2").unwrap();
//! assert_eq!(key, PieceKey::D2);
//! assert_eq!(key.as_str(), "D2");
//!
//! assert_eq!(Color::Blue.hsl(), "hsl(204, 70%, 53%)");
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 10);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (10 rows)
pub const BOARD_HEIGHT: u8 = 10;

/// Number of slots in the piece tray
pub const TRAY_SIZE: usize = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay between flagging a line and emptying its cells (clear animation window)
pub const CLEAR_SWEEP_MS: u32 = 300;

/// Delay between the tray running empty and the next deal
pub const TRAY_REFILL_MS: u32 = 200;

/// Base points per cleared line
pub const LINE_POINTS: u32 = 10;

/// Multi-line bonus factor, applied to the triangular number of the line count
pub const MULTI_LINE_BONUS: u32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(CLEAR_SWEEP_MS, 300);
        assert_eq!(TRAY_REFILL_MS, 200);
        assert!(TRAY_REFILL_MS < CLEAR_SWEEP_MS);
    }

    #[test]
    fn piece_keys_round_trip_through_strings() {
        for key in PieceKey::ALL {
            assert_eq!(PieceKey::from_str(key.as_str()), Some(key));
        }
        assert_eq!(PieceKey::from_str("z9"), None);
    }

    #[test]
    fn color_names_are_unique() {
        for (i, a) in Color::ALL.iter().enumerate() {
            for b in &Color::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}

/// The nineteen placeable shapes
///
/// Grouped by family:
/// - **A1-A5**: horizontal runs of length 1 to 5
/// - **B1-B4**: vertical runs of length 2 to 5
/// - **C1-C2**: 2x2 and 3x3 squares
/// - **D1-D4**: L orientations
/// - **E1-E4**: mirrored L orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKey {
    A1,
    A2,
    A3,
    A4,
    A5,
    B1,
    B2,
    B3,
    B4,
    C1,
    C2,
    D1,
    D2,
    D3,
    D4,
    E1,
    E2,
    E3,
    E4,
}

impl PieceKey {
    /// Every key, in catalog order
    pub const ALL: [PieceKey; 19] = [
        PieceKey::A1,
        PieceKey::A2,
        PieceKey::A3,
        PieceKey::A4,
        PieceKey::A5,
        PieceKey::B1,
        PieceKey::B2,
        PieceKey::B3,
        PieceKey::B4,
        PieceKey::C1,
        PieceKey::C2,
        PieceKey::D1,
        PieceKey::D2,
        PieceKey::D3,
        PieceKey::D4,
        PieceKey::E1,
        PieceKey::E2,
        PieceKey::E3,
        PieceKey::E4,
    ];

    /// Parse a key from its identifier (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_blast_types::PieceKey;
    ///
    /// assert_eq!(PieceKey::from_str("A1"), Some(PieceKey::A1));
    /// assert_eq!(PieceKey::from_str("e4"), Some(PieceKey::E4));
    /// assert_eq!(PieceKey::from_str("F1"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let upper = s.to_ascii_uppercase();
        Self::ALL.into_iter().find(|k| k.as_str() == upper)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKey::A1 => "A1",
            PieceKey::A2 => "A2",
            PieceKey::A3 => "A3",
            PieceKey::A4 => "A4",
            PieceKey::A5 => "A5",
            PieceKey::B1 => "B1",
            PieceKey::B2 => "B2",
            PieceKey::B3 => "B3",
            PieceKey::B4 => "B4",
            PieceKey::C1 => "C1",
            PieceKey::C2 => "C2",
            PieceKey::D1 => "D1",
            PieceKey::D2 => "D2",
            PieceKey::D3 => "D3",
            PieceKey::D4 => "D4",
            PieceKey::E1 => "E1",
            PieceKey::E2 => "E2",
            PieceKey::E3 => "E3",
            PieceKey::E4 => "E4",
        }
    }
}

/// The seven-entry rainbow palette pieces are painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Violet,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Indigo,
        Color::Violet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Indigo => "indigo",
            Color::Violet => "violet",
        }
    }

    /// CSS color string for this palette entry
    pub fn hsl(&self) -> &'static str {
        match self {
            Color::Red => "hsl(348, 83%, 61%)",
            Color::Orange => "hsl(29, 95%, 63%)",
            Color::Yellow => "hsl(54, 100%, 62%)",
            Color::Green => "hsl(145, 63%, 49%)",
            Color::Blue => "hsl(204, 70%, 53%)",
            Color::Indigo => "hsl(262.1, 83.3%, 57.8%)",
            Color::Violet => "hsl(314, 79%, 60%)",
        }
    }
}

/// Tint used for preview cells of an illegal drop target
pub const WARNING_HSL: &str = "hsl(0, 62.8%, 30.6%)";

/// A piece offered in the tray: a catalog shape painted with a palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceInstance {
    pub key: PieceKey,
    pub color: Color,
}

impl PieceInstance {
    pub fn new(key: PieceKey, color: Color) -> Self {
        Self { key, color }
    }
}

/// An occupied board cell
///
/// `clearing` is set while the cell's line is in its clear animation window.
/// The cell still counts as occupied until the sweep empties it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub key: PieceKey,
    pub color: Color,
    pub clearing: bool,
}

impl From<PieceInstance> for Block {
    fn from(piece: PieceInstance) -> Self {
        Self {
            key: piece.key,
            color: piece.color,
            clearing: false,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Block)`: Cell holding a placed piece's identity
pub type Cell = Option<Block>;

/// The three tray slots
pub type TraySlots = [Option<PieceInstance>; TRAY_SIZE];

/// Discrete actions outside the pointer protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Discard the current session and start a fresh one
    NewGame,
    /// Drop the active drag without committing
    CancelDrag,
}

/// Screen-space placement of the board, in pointer units.
///
/// `left`/`top` is the position of cell (0, 0); each cell spans
/// `cell_w` x `cell_h` pointer units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    pub left: f32,
    pub top: f32,
    pub cell_w: f32,
    pub cell_h: f32,
}

impl BoardGeometry {
    /// Map a pointer position to the board cell under it.
    ///
    /// Uses `round(offset / cell - 0.5)` with round-half-up, so a pointer
    /// anywhere inside a cell maps to that cell. Positions outside the board
    /// map to out-of-range indices; legality rejects those.
    pub fn cell_at(&self, x: f32, y: f32) -> (i32, i32) {
        let col = round_half_up((x - self.left) / self.cell_w - 0.5);
        let row = round_half_up((y - self.top) / self.cell_h - 0.5);
        (row, col)
    }
}

fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Axis-aligned rectangle in pointer units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl SlotRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x as f32
            && y >= self.y as f32
            && x < (self.x + self.w) as f32
            && y < (self.y + self.h) as f32
    }
}

/// Hit-testing geometry shared by the renderer and the pointer handler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub board: BoardGeometry,
    /// Bounds of each tray slot's piece (not the whole slot box)
    pub slots: [SlotRect; TRAY_SIZE],
}

impl SurfaceLayout {
    /// Index of the tray slot whose bounds contain the point
    pub fn slot_at(&self, x: f32, y: f32) -> Option<usize> {
        self.slots.iter().position(|r| r.contains(x, y))
    }
}

/// Event emitted by the session controller (drained by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started {
        episode: u32,
        seed: u32,
    },
    Dealt {
        episode: u32,
        tray: TraySlots,
    },
    Committed {
        episode: u32,
        move_index: u32,
        slot: u8,
        piece: PieceInstance,
        row: i8,
        col: i8,
        cells_placed: u32,
        lines_cleared: u32,
        line_points: u32,
        score: u32,
    },
    Swept {
        episode: u32,
        cells: u32,
    },
    GameOver {
        episode: u32,
        score: u32,
        moves: u32,
    },
}

#[cfg(test)]
mod geometry_tests {
    use super::*;

    #[test]
    fn cell_at_maps_inside_cells_and_outside_board() {
        let g = BoardGeometry {
            left: 10.0,
            top: 5.0,
            cell_w: 2.0,
            cell_h: 1.0,
        };
        assert_eq!(g.cell_at(10.0, 5.0), (0, 0));
        assert_eq!(g.cell_at(11.9, 5.0), (0, 0));
        assert_eq!(g.cell_at(12.0, 6.0), (1, 1));
        assert_eq!(g.cell_at(29.0, 14.0), (9, 9));
        assert_eq!(g.cell_at(8.0, 4.0), (-1, -1));
        assert_eq!(g.cell_at(30.0, 15.0), (10, 10));
    }

    #[test]
    fn slot_rect_is_half_open() {
        let r = SlotRect { x: 2, y: 3, w: 4, h: 2 };
        assert!(r.contains(2.0, 3.0));
        assert!(r.contains(5.5, 4.5));
        assert!(!r.contains(6.0, 3.0));
        assert!(!r.contains(2.0, 5.0));
    }
}
