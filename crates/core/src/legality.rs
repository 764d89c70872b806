//! Legality module - placement checks and game-over detection
//!
//! [`can_place`] is the single predicate behind both the live drag preview
//! and commit validation, so the two can never disagree.

use crate::board::Board;
use crate::pieces::shape_of;
use crate::types::{PieceInstance, PieceKey, BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `key` fits with its top-left mask cell at (row, col).
///
/// False if any occupied offset lands outside the board or on an occupied
/// cell. Clearing cells count as occupied.
pub fn can_place(board: &Board, key: PieceKey, row: i32, col: i32) -> bool {
    shape_of(key)
        .cells()
        .all(|(dy, dx)| board.is_empty_at(row + dy as i32, col + dx as i32))
}

/// First legal anchor for `key` in raster order
pub fn first_fit(board: &Board, key: PieceKey) -> Option<(i32, i32)> {
    (0..BOARD_HEIGHT as i32)
        .flat_map(|row| (0..BOARD_WIDTH as i32).map(move |col| (row, col)))
        .find(|&(row, col)| can_place(board, key, row, col))
}

/// True when no offered piece fits anywhere.
///
/// An empty tray is never game over: it is always followed by a deal.
pub fn is_game_over(tray: &[Option<PieceInstance>], board: &Board) -> bool {
    let mut offered = tray.iter().flatten().peekable();
    if offered.peek().is_none() {
        return false;
    }
    !offered.any(|piece| first_fit(board, piece.key).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Block, Color};

    fn fill() -> PieceInstance {
        PieceInstance::new(PieceKey::A1, Color::Red)
    }

    #[test]
    fn test_rejects_out_of_bounds_anchor() {
        let board = Board::new();
        assert!(!can_place(&board, PieceKey::A1, -1, 0));
        assert!(!can_place(&board, PieceKey::A1, 0, 10));
        assert!(!can_place(&board, PieceKey::A5, 0, 6));
        assert!(can_place(&board, PieceKey::A5, 0, 5));
        assert!(!can_place(&board, PieceKey::B4, 6, 0));
        assert!(can_place(&board, PieceKey::B4, 5, 0));
    }

    #[test]
    fn test_mask_holes_may_overlap_occupied_cells() {
        // D2 is [[0,0,1],[1,1,1]]: its (0,0) hole can sit over a block.
        let mut board = Board::new();
        board.set(0, 0, Some(Block::from(fill())));
        assert!(can_place(&board, PieceKey::D2, 0, 0));
        board.set(0, 2, Some(Block::from(fill())));
        assert!(!can_place(&board, PieceKey::D2, 0, 0));
    }

    #[test]
    fn test_clearing_cells_block_placement() {
        let mut board = Board::new();
        board.set(4, 4, Some(Block { clearing: true, ..Block::from(fill()) }));
        assert!(!can_place(&board, PieceKey::A1, 4, 4));
    }

    #[test]
    fn test_first_fit_is_raster_order() {
        let board = Board::from_ascii(&["###.......", "#........."], fill());
        assert_eq!(first_fit(&board, PieceKey::A1), Some((0, 3)));
        assert_eq!(first_fit(&board, PieceKey::B1), Some((0, 3)));
        assert_eq!(first_fit(&board, PieceKey::C2), Some((0, 3)));
    }

    #[test]
    fn test_empty_tray_is_not_game_over() {
        let full = Board::from_ascii(&["##########"; 10], fill());
        assert!(!is_game_over(&[None, None, None], &full));
        assert!(is_game_over(&[Some(fill()), None, None], &full));
    }
}
