//! Multi-scalar multiplication and endomorphism-accelerated scalar multiplication.
//!
//! Both algorithms are generic over [`CurveGroup`], implemented by
//! `G1Projective` and `G2Projective`. They branch on scalar digits and are
//! meant for public scalars.

use core::ops::{Add, AddAssign, Neg, Sub};

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec;
#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use super::glv::GlvDecomposition;
use super::scalar::{Scalar, NUM_BITS};
use super::wnaf::{apply_digit, odd_multiples, wnaf_digits};
use crate::error::{validate, Result};

/// Window used by the GLV double-and-add pass
pub const GLV_WINDOW: usize = 4;

/// Jacobian group over which the batch algorithms run
pub trait CurveGroup:
    Copy + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self> + AddAssign
{
    /// Affine form accepted as MSM input
    type Affine: Copy;

    /// Point at infinity
    fn identity() -> Self;

    /// `2P`
    fn double(&self) -> Self;

    /// `P + Q` with `Q` affine
    fn add_affine(&self, rhs: &Self::Affine) -> Self;

    /// The order-3 endomorphism acting as `[lambda]`
    fn endomorphism(&self) -> Self;
}

/// Bucket window for `n` terms: 3 below 32 terms, then `ceil(log10 n)`, at least 3
pub fn window_size(n: usize) -> usize {
    if n < 32 {
        return 3;
    }
    let mut c = 0;
    let mut pow = 1usize;
    while pow < n {
        pow = pow.saturating_mul(10);
        c += 1;
    }
    c.max(3)
}

/// `c` bits of `limbs` starting at bit `offset`
#[inline]
fn window_digit(limbs: &[u64; 4], offset: usize, c: usize) -> usize {
    let limb = offset / 64;
    let shift = offset % 64;
    if limb >= 4 {
        return 0;
    }
    let mut v = limbs[limb] >> shift;
    if shift + c > 64 && limb + 1 < 4 {
        v |= limbs[limb + 1] << (64 - shift);
    }
    (v & ((1u64 << c) - 1)) as usize
}

/// Pippenger bucket method computing `sum(scalars[i] * points[i])`.
///
/// Returns an error when the slices differ in length.
#[cfg(feature = "alloc")]
pub fn multi_exp<G: CurveGroup>(points: &[G::Affine], scalars: &[Scalar]) -> Result<G> {
    validate::same_length("points/scalars", points.len(), scalars.len())?;

    if points.is_empty() {
        return Ok(G::identity());
    }

    let c = window_size(points.len());
    let num_windows = (NUM_BITS as usize + c - 1) / c;
    let num_buckets = (1usize << c) - 1;

    tracing::debug!(points = points.len(), window = c, "pippenger msm");

    let limbs: Vec<[u64; 4]> = scalars.iter().map(|s| s.to_canonical_limbs()).collect();
    let mut buckets = vec![G::identity(); num_buckets];
    let mut acc = G::identity();

    for w in (0..num_windows).rev() {
        for _ in 0..c {
            acc = acc.double();
        }

        for b in buckets.iter_mut() {
            *b = G::identity();
        }

        for (point, scalar) in points.iter().zip(limbs.iter()) {
            let digit = window_digit(scalar, w * c, c);
            if digit != 0 {
                buckets[digit - 1] = buckets[digit - 1].add_affine(point);
            }
        }

        // sum_k k * bucket[k] via one backward sweep
        let mut running = G::identity();
        let mut window_sum = G::identity();
        for b in buckets.iter().rev() {
            running += *b;
            window_sum += running;
        }

        acc += window_sum;
    }

    Ok(acc)
}

/// `s * p` through the GLV split: two interleaved half-length wNAF passes
/// over `p` and `endomorphism(p)`
#[cfg(feature = "alloc")]
pub fn mul_glv<G: CurveGroup>(p: &G, s: &Scalar) -> G {
    let d = GlvDecomposition::new(s);

    // s = s1*k1 - s2*lambda*k2
    let p1 = if d.neg1 { -*p } else { *p };
    let phi = p.endomorphism();
    let p2 = if d.neg2 { phi } else { -phi };

    let naf1 = wnaf_digits(&d.k1, GLV_WINDOW);
    let naf2 = wnaf_digits(&d.k2, GLV_WINDOW);

    let t1 = odd_multiples(&p1, GLV_WINDOW);
    let t2 = odd_multiples(&p2, GLV_WINDOW);

    let len = naf1.len().max(naf2.len());
    let mut acc = G::identity();
    for i in (0..len).rev() {
        acc = acc.double();
        if let Some(&d1) = naf1.get(i) {
            acc = apply_digit(acc, &t1, d1);
        }
        if let Some(&d2) = naf2.get(i) {
            acc = apply_digit(acc, &t2, d2);
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_grows_with_log10() {
        assert_eq!(window_size(1), 3);
        assert_eq!(window_size(31), 3);
        assert_eq!(window_size(32), 3);
        assert_eq!(window_size(1000), 3);
        assert_eq!(window_size(1001), 4);
        assert_eq!(window_size(10_000), 4);
        assert_eq!(window_size(100_001), 6);
    }

    #[test]
    fn digits_cross_limb_boundaries() {
        let limbs = [0xf000_0000_0000_0000, 0x5, 0, 0];
        assert_eq!(window_digit(&limbs, 60, 3), 0b111);
        assert_eq!(window_digit(&limbs, 63, 3), 0b011);
        assert_eq!(window_digit(&limbs, 64, 3), 0b101);
        assert_eq!(window_digit(&limbs, 255, 3), 0);
        assert_eq!(window_digit(&limbs, 256, 3), 0);
    }
}
