//! Elliptic Curve Primitives
//!
//! This module provides the BLS12-381 pairing-friendly curve together with the
//! generic machinery its groups share: multi-scalar multiplication over any
//! [`CurveGroup`](bls12_381::msm::CurveGroup).

pub mod bls12_381;

pub use bls12_381::{
    pairing as bls12_381_pairing, G1Projective as Bls12_381G1, G2Projective as Bls12_381G2,
    Gt as Bls12_381Gt, Scalar as Bls12_381Scalar,
};
