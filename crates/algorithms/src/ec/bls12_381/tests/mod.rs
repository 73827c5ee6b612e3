//! BLS12-381 test suite
//!
//! Tests are organized into focused modules for better maintainability.

use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

/// Deterministic generator so failures reproduce
pub(crate) fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}




mod pairings;


mod serialization;
