//! Random number generator construction.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the generator used by a single run.
///
/// `None` draws a fresh seed from the thread-local generator.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}
