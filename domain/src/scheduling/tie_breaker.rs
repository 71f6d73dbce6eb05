//! Injectable randomness for tie-breaks.
//!
//! Only `free` mode draws from this. Production code uses an entropy-seeded
//! [`SeededTieBreaker`]; tests and reproducible runs pass a fixed seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of tie-break choices
pub trait TieBreaker: Send {
    /// Pick an index in `0..candidates`. `candidates` is at least 1.
    fn pick(&mut self, candidates: usize) -> usize;
}

/// Uniform choice backed by a seedable [`StdRng`]
pub struct SeededTieBreaker {
    rng: StdRng,
}

impl SeededTieBreaker {
    /// Deterministic sequence for a given seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use `seed` when given, entropy otherwise
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl TieBreaker for SeededTieBreaker {
    fn pick(&mut self, candidates: usize) -> usize {
        if candidates <= 1 {
            0
        } else {
            self.rng.random_range(0..candidates)
        }
    }
}

/// Always picks the first candidate (roster order)
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidate;

impl TieBreaker for FirstCandidate {
    fn pick(&mut self, _candidates: usize) -> usize {
        0
    }
}
