//! Deterministic random number generation.
//!
//! Every random decision in a session (currently the prompt shuffle order)
//! draws from a `GameRng` seeded by `SessionConfig::seed`, so a run can be
//! replayed exactly from its seed and the player's inputs.
//!
//! ```
//! use form_desk::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut prompts = rng.for_context("prompts");
//! let mut again = GameRng::new(42).for_context("prompts");
//!
//! let mut a = vec![0, 1, 2, 3, 4];
//! let mut b = a.clone();
//! prompts.shuffle(&mut a);
//! again.shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG with independent per-context streams.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a named context.
    ///
    /// The same context always produces the same stream for the same seed,
    /// regardless of how much the parent generator has been used.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Random index in `0..=max`.
    pub fn gen_index_inclusive(&mut self, max: usize) -> usize {
        self.inner.gen_range(0..=max)
    }

    /// Shuffle a slice in place (Fisher-Yates, walking from the back).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.gen_index_inclusive(i);
            slice.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_index_inclusive(999), rng2.gen_index_inclusive(999));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_index_inclusive(999)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_index_inclusive(999)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_streams_differ() {
        let rng = GameRng::new(42);
        let mut a = rng.for_context("prompts");
        let mut b = rng.for_context("other");

        let seq1: Vec<_> = (0..10).map(|_| a.gen_index_inclusive(999)).collect();
        let seq2: Vec<_> = (0..10).map(|_| b.gen_index_inclusive(999)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(7);
        let mut data: Vec<u32> = (1..=10).collect();
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort_unstable();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = GameRng::new(7);
        let mut empty: Vec<u8> = vec![];
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec![5];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![5]);
    }
}
