//! Seeded, reproducible shuffling.
//!
//! The permutation is a Fisher-Yates pass driven by a [`ChaCha8Rng`] seeded
//! from the caller's integer. ChaCha output is fixed by its algorithm rather
//! than by platform or process, so the same `(items, seed)` pair yields the
//! same order across runs and machines.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Returns a seeded permutation of `items`, leaving the input untouched.
///
/// # Example
///
/// ```
/// use appdir_seeker::shuffle;
///
/// let ids = ["a", "b", "c", "d", "e"];
/// let first = shuffle(&ids, 7);
/// let again = shuffle(&ids, 7);
///
/// assert_eq!(first, again);
/// assert_eq!(ids, ["a", "b", "c", "d", "e"]);
/// ```
pub fn shuffle<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffle_in_place(&mut shuffled, seed);
    shuffled
}

/// Permutes `items` in place with a generator seeded from `seed`.
pub fn shuffle_in_place<T>(items: &mut [T], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    items.shuffle(&mut rng);
}
