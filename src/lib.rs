//! # bls381
//!
//! Pure Rust arithmetic for the BLS12-381 pairing-friendly curve.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bls381 = "0.3"
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support and `std::error::Error` impls
//! - `alloc`: `Vec`-returning operations (multi-scalar multiplication, wNAF, multi-pairing)
//! - `lazy-reduction` (default): tower multiplications reduce once per formula
//! - `zeroize`: zero-on-drop support for field elements, scalars and points
//! - `full`: all features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from its sub-crates:
//!
//! - [`bls381-api`]: public error type and serialization trait
//! - [`bls381-algorithms`]: fields, groups, pairing and multi-scalar multiplication

#![cfg_attr(not(feature = "std"), no_std)]

pub use bls381_algorithms as algorithms;
pub use bls381_api as api;

pub use bls381_algorithms::ec::bls12_381;

/// Common imports for bls381 users
pub mod prelude {
    pub use crate::api::{Error, Result, ResultExt, Serialize};

    pub use crate::bls12_381::{
        multi_miller_loop, pairing, CurveGroup, Fp, Fp12, Fp2, Fp6, G1Affine, G1Projective,
        G2Affine, G2Prepared, G2Projective, GlvDecomposition, Gt, MillerLoopResult, Scalar,
    };

    #[cfg(feature = "alloc")]
    pub use crate::bls12_381::{multi_exp, multi_pairing, pairing_check};

    pub use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
    pub use zeroize::Zeroize;
}
