//! RNG module - seeded piece dealing
//!
//! Each tray slot is an independent draw with replacement: a uniformly random
//! catalog key and a uniformly random palette color. Duplicates across slots
//! are allowed.
//!
//! A small LCG keeps games reproducible from a seed.

use crate::types::{Color, PieceInstance, PieceKey, TraySlots};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales the full word instead of taking a remainder; the low bits of
    /// a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (reseeding with it continues the stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Draw one random piece instance
pub fn deal_piece(rng: &mut SimpleRng) -> PieceInstance {
    let key = PieceKey::ALL[rng.next_range(PieceKey::ALL.len() as u32) as usize];
    let color = Color::ALL[rng.next_range(Color::ALL.len() as u32) as usize];
    PieceInstance::new(key, color)
}

/// Draw a full tray
pub fn deal_tray(rng: &mut SimpleRng) -> TraySlots {
    [
        Some(deal_piece(rng)),
        Some(deal_piece(rng)),
        Some(deal_piece(rng)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..10_000 {
            assert!(rng.next_range(19) < 19);
        }
    }

    #[test]
    fn test_deal_covers_catalog_and_palette() {
        let mut rng = SimpleRng::new(42);
        let mut keys = [false; 19];
        let mut colors = [false; 7];
        for _ in 0..2_000 {
            let p = deal_piece(&mut rng);
            keys[PieceKey::ALL.iter().position(|&k| k == p.key).unwrap()] = true;
            colors[Color::ALL.iter().position(|&c| c == p.color).unwrap()] = true;
        }
        assert!(keys.iter().all(|&seen| seen));
        assert!(colors.iter().all(|&seen| seen));
    }

    #[test]
    fn test_deal_tray_fills_every_slot() {
        let mut rng = SimpleRng::new(3);
        assert!(deal_tray(&mut rng).iter().all(Option::is_some));
    }
}
