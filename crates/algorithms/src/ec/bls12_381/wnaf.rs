//! Windowed non-adjacent form recoding of scalars.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use super::arith::{add_assign_limbs, shr1_limbs, sub_assign_limbs};
use super::scalar::Scalar;
use crate::error::{validate, Result};

/// Widest supported window; digits must fit an `i64` with room for the carry
pub const MAX_WINDOW: usize = 62;

impl Scalar {
    /// Signed-digit recoding with window `w`, least significant digit first.
    ///
    /// Every non-zero digit is odd and lies in `[-2^(w-1), 2^(w-1))`, and is
    /// followed by at least `w - 1` zero digits.
    #[cfg(feature = "alloc")]
    pub fn to_wnaf(&self, w: usize) -> Result<Vec<i64>> {
        validate::at_least("window", w, 2)?;
        validate::parameter(w <= MAX_WINDOW, "window", "window wider than 62 bits")?;

        let naf = wnaf_digits(self, w);
        tracing::trace!(window = w, digits = naf.len(), "wnaf recoded");
        Ok(naf)
    }

    /// Rebuild a scalar from signed digits, least significant first
    pub fn from_wnaf(naf: &[i64]) -> Scalar {
        naf.iter().rev().fold(Scalar::zero(), |acc, &d| {
            let acc = acc.double();
            match d {
                0 => acc,
                d if d > 0 => acc + Scalar::from(d as u64),
                d => acc - Scalar::from(d.unsigned_abs()),
            }
        })
    }
}

/// Recoding for a window already known to lie in `[2, MAX_WINDOW]`
#[cfg(feature = "alloc")]
pub(crate) fn wnaf_digits(s: &Scalar, w: usize) -> Vec<i64> {
    let width = 1u64 << w;
    let half = 1u64 << (w - 1);
    let mask = width - 1;

    let mut e = s.to_canonical_limbs();
    let mut naf = Vec::with_capacity(256);

    // e < r < 2^255, and adding a digit below 2^61 cannot overflow 256 bits
    while e.iter().any(|&l| l != 0) {
        if e[0] & 1 == 1 {
            let low = e[0] & mask;
            if low >= half {
                let digit = width - low;
                add_assign_limbs(&mut e, &[digit, 0, 0, 0]);
                naf.push(-(digit as i64));
            } else {
                sub_assign_limbs(&mut e, &[low, 0, 0, 0]);
                naf.push(low as i64);
            }
        } else {
            naf.push(0);
        }
        shr1_limbs(&mut e, 0);
    }
    naf
}

/// Odd multiples `[P, 3P, 5P, ...]` up to `(2^(w-1) - 1) P`
#[cfg(feature = "alloc")]
pub(crate) fn odd_multiples<G>(base: &G, w: usize) -> Vec<G>
where
    G: super::msm::CurveGroup,
{
    let count = 1usize << (w - 2);
    let double = base.double();
    let mut table = Vec::with_capacity(count);
    table.push(*base);
    for i in 1..count {
        let next = table[i - 1] + double;
        table.push(next);
    }
    table
}

/// Add the table entry selected by a wNAF digit to `acc`
#[cfg(feature = "alloc")]
#[inline]
pub(crate) fn apply_digit<G>(acc: G, table: &[G], digit: i64) -> G
where
    G: super::msm::CurveGroup,
{
    match digit {
        0 => acc,
        d if d > 0 => acc + table[(d as usize) / 2],
        d => acc - table[(d.unsigned_abs() as usize) / 2],
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;

    #[test]
    fn rejects_narrow_window() {
        assert!(Scalar::one().to_wnaf(1).is_err());
        assert!(Scalar::one().to_wnaf(0).is_err());
        assert!(Scalar::one().to_wnaf(63).is_err());
    }

    #[test]
    fn zero_has_empty_recoding() {
        assert!(Scalar::zero().to_wnaf(4).unwrap().is_empty());
        assert_eq!(Scalar::from_wnaf(&[]), Scalar::zero());
    }

    #[test]
    fn small_values() {
        // 7 = 8 - 1 with w = 2
        assert_eq!(Scalar::from(7u64).to_wnaf(2).unwrap(), vec![-1, 0, 0, 1]);
        // 7 with w = 4 is a single digit
        assert_eq!(Scalar::from(7u64).to_wnaf(4).unwrap(), vec![7]);
        // 12 = 4 * 3
        assert_eq!(Scalar::from(12u64).to_wnaf(3).unwrap(), vec![0, 0, 3]);
    }

    #[test]
    fn digits_are_bounded_and_sparse() {
        let mut s = Scalar::from(0x1234_5678_9abc_def0u64).square().square();
        for w in 2..=8usize {
            s = s.square() + Scalar::one();
            let naf = s.to_wnaf(w).unwrap();
            let bound = 1i64 << (w - 1);
            for (i, &d) in naf.iter().enumerate() {
                if d != 0 {
                    assert!(d % 2 != 0);
                    assert!(d >= -bound && d < bound);
                    for &next in naf.iter().skip(i + 1).take(w - 1) {
                        assert_eq!(next, 0);
                    }
                }
            }
            assert_eq!(Scalar::from_wnaf(&naf), s);
        }
    }

    #[test]
    fn largest_scalar() {
        let s = -Scalar::one();
        for w in [2usize, 5, 16, 62] {
            assert_eq!(Scalar::from_wnaf(&s.to_wnaf(w).unwrap()), s);
        }
    }
}
