//! BLS12-381 arithmetic with constant-time field and group operations
//!
//! This crate implements the prime field tower `Fp ⊂ Fp2 ⊂ Fp6 ⊂ Fp12`, the
//! groups G1 and G2, the optimal-ate pairing and the scalar-multiplication
//! machinery (wNAF, GLV and Pippenger) for the BLS12-381 curve. It is usable in
//! both `std` and `no_std` environments.
//!
//! # Security Features
//!
//! - Field arithmetic, point addition and scalar multiplication are written
//!   without secret-dependent branches
//! - Equality and selection go through `subtle`
//! - Optional zeroization of field elements, scalars and points

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result, ResultExt};

// Elliptic curve and pairing implementations
pub mod ec;
pub use ec::bls12_381;
pub use ec::bls12_381::{
    pairing, Fp, Fp12, Fp2, Fp6, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt,
    MillerLoopResult, Scalar,
};
#[cfg(feature = "alloc")]
pub use ec::bls12_381::{multi_pairing, pairing_check};
