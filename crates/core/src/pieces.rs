//! Pieces module - the fixed shape catalog
//!
//! Every shape is a rectangular 0/1 mask anchored at its top-left cell.
//! Shapes never rotate; the catalog carries each orientation as its own key.

use crate::types::PieceKey;

/// Offset of a single occupied cell relative to the anchor, as (row, col)
pub type CellOffset = (i8, i8);

type Mask = &'static [&'static [u8]];

const A1: Mask = &[&[1]];
const A2: Mask = &[&[1, 1]];
const A3: Mask = &[&[1, 1, 1]];
const A4: Mask = &[&[1, 1, 1, 1]];
const A5: Mask = &[&[1, 1, 1, 1, 1]];

const B1: Mask = &[&[1], &[1]];
const B2: Mask = &[&[1], &[1], &[1]];
const B3: Mask = &[&[1], &[1], &[1], &[1]];
const B4: Mask = &[&[1], &[1], &[1], &[1], &[1]];

const C1: Mask = &[&[1, 1], &[1, 1]];
const C2: Mask = &[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]];

const D1: Mask = &[&[1, 0], &[1, 0], &[1, 1]];
const D2: Mask = &[&[0, 0, 1], &[1, 1, 1]];
const D3: Mask = &[&[1, 1], &[0, 1], &[0, 1]];
const D4: Mask = &[&[1, 1, 1], &[1, 0, 0]];

const E1: Mask = &[&[0, 1], &[0, 1], &[1, 1]];
const E2: Mask = &[&[1, 1, 1], &[0, 0, 1]];
const E3: Mask = &[&[1, 1], &[1, 0], &[1, 0]];
const E4: Mask = &[&[1, 0, 0], &[1, 1, 1]];

/// Immutable bitmask of a catalog piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    mask: Mask,
}

impl Shape {
    /// Rows in the mask
    pub fn height(&self) -> usize {
        self.mask.len()
    }

    /// Columns in the mask (all rows are equal length)
    pub fn width(&self) -> usize {
        self.mask.first().map_or(0, |row| row.len())
    }

    /// The raw 0/1 rows
    pub fn mask(&self) -> &'static [&'static [u8]] {
        self.mask
    }

    /// Whether the mask is set at (row, col); false outside the mask
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.mask
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|&v| v != 0)
    }

    /// Occupied offsets in raster order
    pub fn cells(&self) -> impl Iterator<Item = CellOffset> + 'static {
        self.mask.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &v)| v != 0)
                .map(move |(dx, _)| (dy as i8, dx as i8))
        })
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> u32 {
        self.mask
            .iter()
            .map(|row| row.iter().filter(|&&v| v != 0).count() as u32)
            .sum()
    }
}

/// Get the shape for a piece key
pub fn shape_of(key: PieceKey) -> Shape {
    let mask = match key {
        PieceKey::A1 => A1,
        PieceKey::A2 => A2,
        PieceKey::A3 => A3,
        PieceKey::A4 => A4,
        PieceKey::A5 => A5,
        PieceKey::B1 => B1,
        PieceKey::B2 => B2,
        PieceKey::B3 => B3,
        PieceKey::B4 => B4,
        PieceKey::C1 => C1,
        PieceKey::C2 => C2,
        PieceKey::D1 => D1,
        PieceKey::D2 => D2,
        PieceKey::D3 => D3,
        PieceKey::D4 => D4,
        PieceKey::E1 => E1,
        PieceKey::E2 => E2,
        PieceKey::E3 => E3,
        PieceKey::E4 => E4,
    };
    Shape { mask }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_masks_are_rectangular_and_non_empty() {
        for key in PieceKey::ALL {
            let shape = shape_of(key);
            assert!(shape.height() > 0, "{} has no rows", key.as_str());
            assert!(
                shape.mask().iter().all(|r| r.len() == shape.width()),
                "{} is ragged",
                key.as_str()
            );
            assert!(shape.cell_count() > 0, "{} is empty", key.as_str());
        }
    }

    #[test]
    fn cells_follow_raster_order() {
        let cells: Vec<_> = shape_of(PieceKey::D2).cells().collect();
        assert_eq!(cells, vec![(0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn is_filled_handles_holes_and_out_of_mask() {
        let e1 = shape_of(PieceKey::E1);
        assert!(!e1.is_filled(0, 0));
        assert!(e1.is_filled(0, 1));
        assert!(e1.is_filled(2, 0));
        assert!(!e1.is_filled(3, 0));
        assert!(!e1.is_filled(0, 2));
    }
}
