//! Scoring module - line clears and points
//!
//! Points for a move are `cells_placed + line_clear_points(lines)`, where
//! `line_clear_points(n) = n * 10 + bonus` and the bonus is
//! `n * (n + 1) / 2 * 5` for two or more lines. A full row and a full column
//! sharing a cell score as two lines.

use crate::board::{Board, FullLines};
use crate::types::{LINE_POINTS, MULTI_LINE_BONUS};

/// Result of one line-clear scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClear {
    pub lines: FullLines,
    pub points: u32,
}

impl LineClear {
    pub fn line_count(&self) -> u32 {
        self.lines.count()
    }
}

/// Points awarded for clearing `lines` lines in one move
pub fn line_clear_points(lines: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let bonus = if lines > 1 {
        lines * (lines + 1) / 2 * MULTI_LINE_BONUS
    } else {
        0
    };
    lines * LINE_POINTS + bonus
}

/// Flag full rows and columns as clearing and score them.
///
/// Boards with nothing full are left untouched; this is the common case
/// and does no work beyond the scan.
pub fn clear_lines_in_place(board: &mut Board) -> LineClear {
    let lines = board.full_lines();
    if lines.is_empty() {
        return LineClear::default();
    }
    board.mark_clearing(&lines);
    let points = line_clear_points(lines.count());
    LineClear { lines, points }
}

/// Pure form of [`clear_lines_in_place`]: returns the flagged board
pub fn clear_lines(board: &Board) -> (Board, LineClear) {
    let mut next = *board;
    let clear = clear_lines_in_place(&mut next);
    (next, clear)
}
