//! Shared helpers for the bls381 integration and property tests

pub mod vectors;

use bls381_algorithms::bls12_381::Scalar;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

/// Seeded generator so failing cases reproduce
pub fn seeded(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Scalar reduced from 64 arbitrary bytes
pub fn scalar_from_seed(bytes: &[u8; 64]) -> Scalar {
    Scalar::from_bytes_wide(bytes)
}

/// Decode a hex string into a fixed-size array.
///
/// Panics on malformed input; callers pass constants.
pub fn hex_array<const N: usize>(h: &str) -> [u8; N] {
    let raw = hex::decode(h.trim_start_matches("0x")).expect("valid hex");
    let mut out = [0u8; N];
    out.copy_from_slice(&raw);
    out
}
