//! BLS12-381 pairing-friendly elliptic curve implementation.
//!
//! The curve is `y^2 = x^3 + 4` over the 381-bit prime field, with the
//! sextic twist `y^2 = x^3 + 4(u + 1)` over `Fp2` hosting G₂. Both groups
//! have prime order `r`, the modulus of [`Scalar`].
//!
//! **Warning:** Unaudited implementation. Use at your own risk.

#[macro_use]
mod macros;

mod arith;
mod encoding;
pub mod field;
mod g1;
mod g2;
pub mod glv;
pub mod msm;
mod pairings;
pub mod scalar;
pub mod wnaf;

#[cfg(test)]
mod tests;

pub use field::{Fp, Fp12, Fp2, Fp6};
pub use g1::{G1Affine, G1Projective};
pub use g2::{G2Affine, G2Projective};
pub use glv::GlvDecomposition;
pub use msm::CurveGroup;
pub use pairings::{
    multi_miller_loop, pairing, G2Prepared, Gt, LineCoeffs, MillerLoopResult, ELL_COEFFS,
};
pub use scalar::Scalar;

#[cfg(feature = "alloc")]
pub use msm::multi_exp;
#[cfg(feature = "alloc")]
pub use pairings::{multi_pairing, pairing_check};

/// BLS parameter |x| = 0xd201000000010000
pub const BLS_X: u64 = 0xd201_0000_0001_0000;
/// Sign of BLS parameter x
pub const BLS_X_IS_NEGATIVE: bool = true;
