//! RNG module - deterministic tile generation
//!
//! Tile kinds are drawn uniformly from [`TileKind::ALL`], optionally excluding
//! kinds that would complete a run. A small LCG keeps every board reproducible
//! from its seed, which the tests and headless mode rely on.

use arrayvec::ArrayVec;

use crate::types::TileKind;

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
    /// Uses the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (reseeding with it continues the same stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of fresh tile kinds
#[derive(Debug, Clone)]
pub struct TileDealer {
    rng: SimpleRng,
}

impl TileDealer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Any kind, uniformly
    pub fn deal(&mut self) -> TileKind {
        let i = self.rng.next_range(TileKind::COUNT as u32) as usize;
        TileKind::ALL[i]
    }

    /// A kind not in `excluded`, uniformly among the rest.
    ///
    /// Falls back to [`TileDealer::deal`] if everything is excluded.
    pub fn deal_excluding(&mut self, excluded: &[TileKind]) -> TileKind {
        let avail: ArrayVec<TileKind, { TileKind::COUNT }> = TileKind::ALL
            .iter()
            .copied()
            .filter(|k| !excluded.contains(k))
            .collect();
        if avail.is_empty() {
            return self.deal();
        }
        let i = self.rng.next_range(avail.len() as u32) as usize;
        avail[i]
    }

    /// RNG state, reported in snapshots
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
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
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(6) < 6);
        }
    }

    #[test]
    fn test_deal_covers_every_kind() {
        let mut dealer = TileDealer::new(99);
        let mut seen = [false; TileKind::COUNT];
        for _ in 0..500 {
            let k = dealer.deal();
            let i = TileKind::ALL.iter().position(|&x| x == k).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s), "kinds seen: {:?}", seen);
    }

    #[test]
    fn test_deal_excluding_never_returns_excluded() {
        let mut dealer = TileDealer::new(3);
        let excluded = [TileKind::Red, TileKind::Blue, TileKind::Green, TileKind::Yellow];
        for _ in 0..200 {
            let k = dealer.deal_excluding(&excluded);
            assert!(!excluded.contains(&k));
        }
    }

    #[test]
    fn test_deal_excluding_all_falls_back() {
        let mut dealer = TileDealer::new(3);
        let k = dealer.deal_excluding(&TileKind::ALL);
        assert!(TileKind::ALL.contains(&k));
    }
}
