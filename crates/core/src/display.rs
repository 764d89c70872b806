//! Display derivation - board plus drag preview as a render-ready grid
//!
//! Pure: the same board and preview always produce the same grid, and
//! neither input is modified.

use crate::board::Board;
use crate::pieces::shape_of;
use crate::types::{Color, PieceInstance, BOARD_HEIGHT, BOARD_WIDTH};

/// Live drop target for the piece being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropPreview {
    pub row: i32,
    pub col: i32,
    pub can_place: bool,
    pub piece: PieceInstance,
}

/// What a single board cell should look like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayCell {
    #[default]
    Empty,
    /// A committed block; `clearing` while its line animates out
    Block { color: Color, clearing: bool },
    /// Preview overlay on an empty cell
    Preview { color: Color, legal: bool },
}

pub type DisplayGrid = [[DisplayCell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Derive the display grid.
///
/// Preview cells are drawn only over empty board cells and only where they
/// fall inside the board; committed blocks always win.
pub fn display_grid(board: &Board, preview: Option<&DropPreview>) -> DisplayGrid {
    let mut grid: DisplayGrid = [[DisplayCell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

    for (r, row) in grid.iter_mut().enumerate() {
        for (c, out) in row.iter_mut().enumerate() {
            if let Some(Some(block)) = board.get(r as i32, c as i32) {
                *out = DisplayCell::Block {
                    color: block.color,
                    clearing: block.clearing,
                };
            }
        }
    }

    if let Some(p) = preview {
        for (dy, dx) in shape_of(p.piece.key).cells() {
            let (r, c) = (p.row + dy as i32, p.col + dx as i32);
            if board.is_empty_at(r, c) {
                grid[r as usize][c as usize] = DisplayCell::Preview {
                    color: p.piece.color,
                    legal: p.can_place,
                };
            }
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Block, PieceKey};

    #[test]
    fn test_illegal_preview_only_covers_free_cells() {
        let mut board = Board::new();
        let red = PieceInstance::new(PieceKey::A1, Color::Red);
        board.set(0, 1, Some(Block::from(red)));

        let preview = DropPreview {
            row: 0,
            col: 0,
            can_place: false,
            piece: PieceInstance::new(PieceKey::A3, Color::Blue),
        };
        let grid = display_grid(&board, Some(&preview));

        assert_eq!(
            grid[0][0],
            DisplayCell::Preview {
                color: Color::Blue,
                legal: false
            }
        );
        assert_eq!(
            grid[0][1],
            DisplayCell::Block {
                color: Color::Red,
                clearing: false
            }
        );
        assert!(matches!(grid[0][2], DisplayCell::Preview { legal: false, .. }));
        assert_eq!(grid[0][3], DisplayCell::Empty);
    }

    #[test]
    fn test_preview_is_clipped_to_board() {
        let board = Board::new();
        let preview = DropPreview {
            row: 9,
            col: 8,
            can_place: false,
            piece: PieceInstance::new(PieceKey::C1, Color::Green),
        };
        let grid = display_grid(&board, Some(&preview));
        let shown = grid
            .iter()
            .flatten()
            .filter(|c| matches!(c, DisplayCell::Preview { .. }))
            .count();
        assert_eq!(shown, 2);
    }
}
