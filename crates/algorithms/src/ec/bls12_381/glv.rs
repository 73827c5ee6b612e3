//! GLV decomposition of scalars along the BLS12 endomorphism.
//!
//! Both groups carry an endomorphism acting as `[lambda]` with
//! `lambda = x^2 - 1`, a non-trivial cube root of unity modulo `r`. A scalar
//! `m` is split into two halves of at most 128 bits so that
//! `m = s1 * k1 - s2 * lambda * k2 (mod r)`, where `s_i = -1` when the
//! corresponding flag is set.

use super::arith::{adc, mac};
use super::scalar::Scalar;

/// `lambda = x^2 - 1` as canonical limbs
const LAMBDA: [u64; 4] = [0x0000_0000_ffff_ffff, 0xac45_a401_0001_a402, 0, 0];

/// `x^2` as canonical limbs
const X_SQUARED: [u64; 4] = [0x0000_0001_0000_0000, 0xac45_a401_0001_a402, 0, 0];

/// `floor(x^2 * 2^256 / r)`
const Q1: [u64; 4] = [0x63f6_e522_f6cf_ee30, 0x7c6b_ecf1_e01f_aadd, 0x1, 0];

/// `floor(2^256 / r)`
const Q2: [u64; 4] = [0x2, 0, 0, 0];

/// `2^128 - 1`, the largest admissible half-scalar
const HALF_MAX: [u64; 4] = [u64::MAX, u64::MAX, 0, 0];

/// `lambda` in Montgomery form
pub(crate) const LAMBDA_SCALAR: Scalar = Scalar([
    0x92d9_090b_0930_11d2,
    0xfc9c_bd71_9d6a_a073,
    0xc1f1_4ef0_cd65_a1a6,
    0x017f_6d35_e72f_cdeb,
]);

/// `round(m * q / 2^256)` for canonical limbs `m`
fn mul_round(m: &[u64; 4], q: &[u64; 4]) -> [u64; 4] {
    let mut wide = [0u64; 8];
    for i in 0..4 {
        let mut carry = 0;
        for j in 0..4 {
            let (lo, hi) = mac(wide[i + j], m[i], q[j], carry);
            wide[i + j] = lo;
            carry = hi;
        }
        wide[i + 4] = carry;
    }

    // + 2^255 then drop the low 256 bits
    let (w3, carry) = adc(wide[3], 1 << 63, 0);
    wide[3] = w3;
    let (w4, carry) = adc(wide[4], 0, carry);
    let (w5, carry) = adc(wide[5], 0, carry);
    let (w6, carry) = adc(wide[6], 0, carry);
    let (w7, _) = adc(wide[7], 0, carry);

    [w4, w5, w6, w7]
}

fn exceeds_half(limbs: &[u64; 4]) -> bool {
    super::arith::gt_limbs(limbs, &HALF_MAX)
}

/// Split of a scalar into two half-length magnitudes and their signs
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GlvDecomposition {
    /// Magnitude applied to the point itself
    pub k1: Scalar,
    /// Magnitude applied to the endomorphism image
    pub k2: Scalar,
    /// `k1` was negated to fit 128 bits
    pub neg1: bool,
    /// `k2` was negated to fit 128 bits
    pub neg2: bool,
}

impl GlvDecomposition {
    /// Decompose `m`
    pub fn new(m: &Scalar) -> Self {
        let limbs = m.to_canonical_limbs();

        // alpha1 = round(x^2 * m / r), alpha2 = round(m / r)
        let alpha1 = Scalar::from_raw(mul_round(&limbs, &Q1));
        let alpha2 = Scalar::from_raw(mul_round(&limbs, &Q2));

        let a1 = m - alpha1 * Scalar::from_raw(LAMBDA) - alpha2;
        let a2 = alpha2 * Scalar::from_raw(X_SQUARED) - alpha1;

        let (k1, neg1) = Self::normalize(a1);
        let (k2, neg2) = Self::normalize(a2);

        tracing::trace!(neg1, neg2, "glv decomposition");

        GlvDecomposition { k1, k2, neg1, neg2 }
    }

    fn normalize(a: Scalar) -> (Scalar, bool) {
        if exceeds_half(&a.to_canonical_limbs()) {
            (-a, true)
        } else {
            (a, false)
        }
    }

    /// Recombine into `s1 * k1 - s2 * lambda * k2`
    pub fn recombine(&self) -> Scalar {
        let t1 = if self.neg1 { -self.k1 } else { self.k1 };
        let t2 = if self.neg2 { -self.k2 } else { self.k2 };
        t1 - LAMBDA_SCALAR * t2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fits_128(s: &Scalar) -> bool {
        let limbs = s.to_canonical_limbs();
        limbs[2] == 0 && limbs[3] == 0
    }

    #[test]
    fn lambda_constant_matches_raw() {
        assert_eq!(Scalar::from_raw(LAMBDA), LAMBDA_SCALAR);
        // lambda is a primitive cube root of unity
        let l2 = LAMBDA_SCALAR.square();
        assert_eq!(l2 + LAMBDA_SCALAR + Scalar::one(), Scalar::zero());
    }

    #[test]
    fn decomposes_small_and_edge_scalars() {
        for m in [
            Scalar::zero(),
            Scalar::one(),
            -Scalar::one(),
            Scalar::from(u64::MAX),
            LAMBDA_SCALAR,
            -LAMBDA_SCALAR,
        ] {
            let d = GlvDecomposition::new(&m);
            assert!(fits_128(&d.k1), "k1 too wide for {:?}", m);
            assert!(fits_128(&d.k2), "k2 too wide for {:?}", m);
            assert_eq!(d.recombine(), m);
        }
    }

    #[test]
    fn decomposes_pseudo_random_scalars() {
        let mut m = Scalar::from(0x9e37_79b9_7f4a_7c15u64);
        for _ in 0..200 {
            m = m.square() + Scalar::from(0x6a09_e667u64);
            let d = GlvDecomposition::new(&m);
            assert!(fits_128(&d.k1));
            assert!(fits_128(&d.k2));
            assert_eq!(d.recombine(), m);
        }
    }
}
