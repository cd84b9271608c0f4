//! Setup randomness.
//!
//! The only stochastic step of a game is its setup: the building layout,
//! the leader deck and the starting tiles are shuffled once by `init_game`.
//! Randomness is injected through the `Shuffler` capability so tests can
//! substitute a fixed order.
//!
//! ```
//! use rust_citadel::core::{shuffled, GameRng, IdentityShuffler};
//!
//! let items = ['a', 'b', 'c', 'd'];
//!
//! // Same seed, same order.
//! let a = shuffled(&mut GameRng::new(7), &items).unwrap();
//! let b = shuffled(&mut GameRng::new(7), &items).unwrap();
//! assert_eq!(a, b);
//!
//! // The identity shuffler keeps the input order.
//! assert_eq!(shuffled(&mut IdentityShuffler, &items).unwrap(), items.to_vec());
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::error::SetupError;

/// Source of permutations for setup.
pub trait Shuffler {
    /// Return a permutation of `0..len`.
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}

/// Reorder `items` with a permutation drawn from `shuffler`.
///
/// Fails if the shuffler does not return a permutation of the right length.
pub fn shuffled<T: Clone>(shuffler: &mut dyn Shuffler, items: &[T]) -> Result<Vec<T>, SetupError> {
    let order = shuffler.permutation(items.len());
    let mut seen = vec![false; items.len()];
    if order.len() != items.len() {
        return Err(SetupError::InvalidShuffle(items.len()));
    }
    for &i in &order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(SetupError::InvalidShuffle(items.len())),
        }
    }
    Ok(order.into_iter().map(|i| items[i].clone()).collect())
}

/// Shuffler that never reorders.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (0..len).collect()
    }
}

/// Deterministic seeded shuffler.
///
/// Uses ChaCha8; the same seed always yields the same setup.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

impl Shuffler for GameRng {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        self.shuffle(&mut order);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<usize>);

    impl Shuffler for Fixed {
        fn permutation(&mut self, _len: usize) -> Vec<usize> {
            self.0.clone()
        }
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for len in [1, 5, 16] {
            assert_eq!(rng1.permutation(len), rng2.permutation(len));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        assert_ne!(rng1.permutation(16), rng2.permutation(16));
    }

    #[test]
    fn test_permutation_is_complete() {
        let mut rng = GameRng::new(42);
        let mut order = rng.permutation(10);
        order.sort_unstable();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffled_applies_order() {
        let items = ["a", "b", "c"];
        let out = shuffled(&mut Fixed(vec![2, 0, 1]), &items).unwrap();
        assert_eq!(out, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_shuffled_rejects_bad_permutation() {
        let items = [1, 2, 3];
        assert_eq!(
            shuffled(&mut Fixed(vec![0, 0, 1]), &items),
            Err(SetupError::InvalidShuffle(3))
        );
        assert_eq!(
            shuffled(&mut Fixed(vec![0, 1]), &items),
            Err(SetupError::InvalidShuffle(3))
        );
        assert_eq!(
            shuffled(&mut Fixed(vec![0, 1, 7]), &items),
            Err(SetupError::InvalidShuffle(3))
        );
    }
}
