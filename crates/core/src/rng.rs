//! RNG module - uniform random piece selection
//!
//! Every spawn picks one of the seven kinds with equal probability,
//! independently of previous spawns (no bag). A small LCG keeps games
//! reproducible from a seed, which the tests rely on.

use crate::types::PieceKind;

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
    /// Uses the high half of the state; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Where the state machine gets the kind of each newly spawned piece.
pub trait PieceSource: Send {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random kinds, one independent draw per spawn.
#[derive(Debug, Clone)]
pub struct UniformPieces {
    rng: SimpleRng,
}

impl UniformPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for UniformPieces {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for UniformPieces {
    fn next_kind(&mut self) -> PieceKind {
        let pick = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[pick]
    }
}

/// Cycles through a fixed list of kinds. Used for scripted games and benches.
#[derive(Debug, Clone)]
pub struct FixedPieces {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl FixedPieces {
    /// An empty list falls back to `O` forever.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            kinds: kinds.into(),
            next: 0,
        }
    }
}

impl PieceSource for FixedPieces {
    fn next_kind(&mut self) -> PieceKind {
        if self.kinds.is_empty() {
            return PieceKind::O;
        }
        let kind = self.kinds[self.next % self.kinds.len()];
        self.next = self.next.wrapping_add(1);
        kind
    }
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
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_uniform_pieces_reach_every_kind() {
        let mut source = UniformPieces::new(12345);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let kind = source.next_kind();
            let idx = PieceKind::ALL.iter().position(|k| *k == kind).unwrap();
            counts[idx] += 1;
        }
        // Loose bound: each kind should land well within [500, 1500] of 7000 draws.
        for (i, count) in counts.iter().enumerate() {
            assert!(
                (500..1500).contains(count),
                "{:?} drawn {} times",
                PieceKind::ALL[i],
                count
            );
        }
    }

    #[test]
    fn test_uniform_pieces_allow_repeats() {
        let mut source = UniformPieces::new(7);
        let draws: Vec<PieceKind> = (0..200).map(|_| source.next_kind()).collect();
        assert!(draws.windows(2).any(|w| w[0] == w[1]));
    }

    #[test]
    fn test_fixed_pieces_cycle() {
        let mut source = FixedPieces::new(vec![PieceKind::I, PieceKind::T]);
        assert_eq!(source.next_kind(), PieceKind::I);
        assert_eq!(source.next_kind(), PieceKind::T);
        assert_eq!(source.next_kind(), PieceKind::I);

        let mut empty = FixedPieces::new(Vec::new());
        assert_eq!(empty.next_kind(), PieceKind::O);
    }
}
