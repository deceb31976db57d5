//! RNG module - deterministic item generation
//!
//! Every random decision in a session (initial fill, repair replacements,
//! refills) draws from one seeded [`SimpleRng`], so a session is reproducible
//! from its level and seed.

use crate::types::{Item, ItemType};

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales from the high bits; the low bits of a power-of-two LCG cycle with
    /// a short period (the lowest bit alternates).
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniformly pick an index into a collection of `len` elements
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_range(len as u32) as usize)
    }

    /// Current internal state (for restarting a session with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Draw a uniformly random item from a level's catalog.
///
/// Returns `None` only for an empty catalog, which level validation rejects.
pub fn random_item(rng: &mut SimpleRng, catalog: &[ItemType]) -> Option<Item> {
    let index = rng.pick_index(catalog.len())?;
    Some(Item::new(catalog[index], index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..10u32 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_next_range_does_not_alternate_parity() {
        let mut rng = SimpleRng::new(99);
        let parities: Vec<u32> = (0..32).map(|_| rng.next_range(2)).collect();
        let alternating = parities.windows(2).all(|w| w[0] != w[1]);
        assert!(!alternating);
    }

    #[test]
    fn test_next_range_covers_all_values() {
        let mut rng = SimpleRng::new(2024);
        let mut seen = [false; 6];
        for _ in 0..500 {
            seen[rng.next_range(6) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_item_uses_catalog_index() {
        let catalog = [ItemType::Red, ItemType::Green, ItemType::Blue];
        let mut rng = SimpleRng::new(3);
        for _ in 0..50 {
            let item = random_item(&mut rng, &catalog).unwrap();
            assert_eq!(catalog[item.index], item.kind);
        }
        assert!(random_item(&mut rng, &[]).is_none());
    }
}
