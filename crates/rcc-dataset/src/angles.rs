//! Rotation label synthesis.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generates one angle per sample index, uniform over [0, 1).
///
/// The value is a fraction of a full turn; multiply by 360 for degrees.
/// The table is deterministic for a given seed, so a dataset built twice
/// with the same seed assigns identical labels.
pub fn rand_angles(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<f32>()).collect()
}
