//! Board module - manages the game grid
//!
//! The board is a 10x10 grid where each cell is empty or holds a placed
//! piece's key and color. Uses a flat, `Copy` array so speculative views
//! (preview, settled board) are plain value copies with no allocation.
//! Coordinates are (row, col): row 0 is the top, col 0 is the left edge.

use arrayvec::ArrayVec;

use crate::pieces::shape_of;
use crate::types::{Block, Cell, PieceInstance, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Indices of full rows and full columns found in one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullLines {
    pub rows: ArrayVec<u8, { BOARD_HEIGHT as usize }>,
    pub cols: ArrayVec<u8, { BOARD_WIDTH as usize }>,
}

impl FullLines {
    /// Rows plus columns; a shared cell does not merge a row and a column
    pub fn count(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }
}

/// The game board - 10 rows x 10 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i32 || col < 0 || col >= BOARD_WIDTH as i32 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at (row, col); `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    ///
    /// This bypasses the placement contract and is meant for building
    /// fixtures; gameplay writes go through [`Board::place`].
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_empty_at(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    pub fn is_out_of_bounds(&self, row: i32, col: i32) -> bool {
        Self::index(row, col).is_none()
    }

    fn is_settled_block(cell: &Cell) -> bool {
        matches!(cell, Some(b) if !b.clearing)
    }

    /// Every cell occupied and none already clearing
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize]
            .iter()
            .all(Self::is_settled_block)
    }

    /// Column counterpart of [`Board::is_row_full`]
    pub fn is_col_full(&self, col: usize) -> bool {
        if col >= BOARD_WIDTH as usize {
            return false;
        }
        self.cells
            .iter()
            .skip(col)
            .step_by(BOARD_WIDTH as usize)
            .all(Self::is_settled_block)
    }

    /// Write a piece's identity into every occupied offset.
    ///
    /// The anchor must already have passed [`crate::legality::can_place`].
    /// Panics if any target is out of bounds or occupied.
    /// Returns the number of cells written.
    pub fn place(&mut self, piece: PieceInstance, row: i32, col: i32) -> u32 {
        let mut placed = 0;
        for (dy, dx) in shape_of(piece.key).cells() {
            let (r, c) = (row + dy as i32, col + dx as i32);
            let idx = Self::index(r, c);
            assert!(
                matches!(idx, Some(i) if self.cells[i].is_none()),
                "illegal placement of {} at ({}, {}): cell ({}, {}) unavailable",
                piece.key.as_str(),
                row,
                col,
                r,
                c
            );
            if let Some(i) = idx {
                self.cells[i] = Some(Block::from(piece));
                placed += 1;
            }
        }
        placed
    }

    /// Collect full rows and columns without modifying the board
    pub fn full_lines(&self) -> FullLines {
        let mut lines = FullLines::default();
        for row in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(row) {
                lines.rows.push(row as u8);
            }
        }
        for col in 0..BOARD_WIDTH as usize {
            if self.is_col_full(col) {
                lines.cols.push(col as u8);
            }
        }
        lines
    }

    /// Flag every cell of the given lines as clearing.
    ///
    /// Both sets must come from one scan taken before any flag is set, so
    /// a row and a column sharing a cell are both counted.
    pub fn mark_clearing(&mut self, lines: &FullLines) {
        let width = BOARD_WIDTH as usize;
        for &row in &lines.rows {
            let start = row as usize * width;
            for cell in self.cells[start..start + width].iter_mut().flatten() {
                cell.clearing = true;
            }
        }
        for &col in &lines.cols {
            for cell in self
                .cells
                .iter_mut()
                .skip(col as usize)
                .step_by(width)
                .flatten()
            {
                cell.clearing = true;
            }
        }
    }

    /// Empty every clearing cell; returns how many were emptied
    pub fn sweep_clearing(&mut self) -> u32 {
        let mut swept = 0;
        for cell in &mut self.cells {
            if matches!(cell, Some(b) if b.clearing) {
                *cell = None;
                swept += 1;
            }
        }
        swept
    }

    /// Copy of the board as it will look once the pending sweep runs
    pub fn settled(&self) -> Board {
        let mut board = *self;
        board.sweep_clearing();
        board
    }

    pub fn occupied_count(&self) -> u32 {
        self.cells.iter().filter(|c| c.is_some()).count() as u32
    }

    pub fn clearing_count(&self) -> u32 {
        self.cells
            .iter()
            .filter(|c| matches!(c, Some(b) if b.clearing))
            .count() as u32
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from a text picture.
    ///
    /// One string per row, top first; `.` is empty and any other character
    /// is an occupied cell filled with `fill`. Short or missing rows are
    /// padded with empty cells.
    pub fn from_ascii(rows: &[&str], fill: PieceInstance) -> Self {
        let mut board = Self::new();
        for (r, line) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            for (c, ch) in line.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch != '.' {
                    board.set(r as i32, c as i32, Some(Block::from(fill)));
                }
            }
        }
        board
    }

    /// Text picture of the board: `.` empty, `#` occupied, `*` clearing
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(BOARD_SIZE + BOARD_HEIGHT as usize);
        for row in 0..BOARD_HEIGHT as usize {
            for cell in self.row(row) {
                out.push(match cell {
                    None => '.',
                    Some(b) if b.clearing => '*',
                    Some(_) => '#',
                });
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKey};

    fn piece(key: PieceKey) -> PieceInstance {
        PieceInstance::new(key, Color::Green)
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(0, 9), Some(9));
        assert_eq!(Board::index(1, 0), Some(10));
        assert_eq!(Board::index(9, 9), Some(99));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(0, 10), None);
        assert_eq!(Board::index(10, 0), None);
    }

    #[test]
    fn test_column_scan_uses_stride() {
        let mut board = Board::new();
        for row in 0..10 {
            board.set(row, 4, Some(Block::from(piece(PieceKey::A1))));
        }
        assert!(board.is_col_full(4));
        assert!(!board.is_col_full(3));
        assert!(!board.is_row_full(0));
    }

    #[test]
    fn test_clearing_cells_are_not_full() {
        let mut board = Board::from_ascii(&["##########"], piece(PieceKey::A1));
        assert!(board.is_row_full(0));
        let lines = board.full_lines();
        board.mark_clearing(&lines);
        assert!(!board.is_row_full(0));
        assert_eq!(board.clearing_count(), 10);
        assert_eq!(board.occupied_count(), 10);
    }

    #[test]
    #[should_panic(expected = "illegal placement")]
    fn test_place_over_occupied_panics() {
        let mut board = Board::new();
        board.place(piece(PieceKey::A1), 3, 3);
        board.place(piece(PieceKey::A2), 3, 2);
    }

    #[test]
    #[should_panic(expected = "illegal placement")]
    fn test_place_out_of_bounds_panics() {
        let mut board = Board::new();
        board.place(piece(PieceKey::A5), 0, 7);
    }

    #[test]
    fn test_ascii_round_trip() {
        let rows = ["#.........", "..........", ".........#"];
        let board = Board::from_ascii(&rows, piece(PieceKey::A1));
        let text = board.to_ascii();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], rows[0]);
        assert_eq!(lines[2], rows[2]);
        assert_eq!(lines[9], "..........");
    }
}
