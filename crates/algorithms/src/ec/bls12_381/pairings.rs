//! Optimal-ate pairing on BLS12-381 and the target group GT.
//!
//! The Miller loop runs over the bits of `|x|` with line coefficients
//! precomputed from the G₂ argument ([`G2Prepared`]), then the result is
//! raised to `(p^12 - 1) / r` by [`MillerLoopResult::final_exponentiation`].

use core::fmt;
use core::ops::Mul;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::field::fp::Fp;
use super::field::fp12::Fp12;
use super::field::fp2::Fp2;
use super::field::fp6::Fp6;
use super::g1::G1Affine;
use super::g2::G2Affine;
use super::scalar::{self, Scalar, NUM_BITS};
use super::{BLS_X, BLS_X_IS_NEGATIVE};
use crate::error::{Error, Result};

#[cfg(feature = "alloc")]
use crate::error::validate;

/// Coefficient slots per prepared point; one doubling per bit of `|x|` below
/// the top, plus one addition per set bit
pub const ELL_COEFFS: usize = 70;

/// 1/2 in Fp
const TWO_INV: Fp = Fp::from_raw_unchecked([
    0x1804_0000_0001_5554,
    0x8550_0005_3ab0_0001,
    0x633c_b57c_253c_276f,
    0x6e22_d1ec_31eb_b502,
    0xd391_6126_f2d1_4ca2,
    0x17fb_b857_1a00_6596,
]);

/// 4 in Fp
const FOUR: Fp = Fp::from_raw_unchecked([
    0xaa27_0000_000c_fff3,
    0x53cc_0032_fc34_000a,
    0x478f_e97a_6b0a_807f,
    0xb1d3_7ebe_e6ba_24d7,
    0x8ec9_733b_bf78_ab2f,
    0x09d6_4551_3d83_de7e,
]);

/// Twist constant b' = 4(u + 1)
const B_TWIST: Fp2 = Fp2 { c0: FOUR, c1: FOUR };

/// Line coefficients `(c0, c1, c2)`; evaluated at `P` as
/// `c0 + (c1 * P.x) v + (c2 * P.y) v w`
pub type LineCoeffs = [Fp2; 3];

/// Homogeneous projective accumulator `(X / Z, Y / Z)` on the twist
struct LinePoint {
    x: Fp2,
    y: Fp2,
    z: Fp2,
}

impl LinePoint {
    fn doubling_step(&mut self) -> LineCoeffs {
        let t0 = (self.x * self.y).mul_by_fp(&TWO_INV);
        let t1 = self.y.square();
        let t2 = self.z.square();
        let t3 = B_TWIST * (t2.double() + t2);
        let t4 = t3.double() + t3;
        let t5 = (t1 + t4).mul_by_fp(&TWO_INV);
        let t6 = (self.y + self.z).square() - (t2 + t1);
        let t7 = self.x.square();

        let c0 = t3 - t1;
        let c1 = t7.double() + t7;
        let c2 = -t6;

        let t3_sq = t3.square();
        self.x = (t1 - t4) * t0;
        self.y = t5.square() - (t3_sq.double() + t3_sq);
        self.z = t1 * t6;

        [c0, c1, c2]
    }

    fn addition_step(&mut self, q: &G2Affine) -> LineCoeffs {
        let t0 = self.y - q.y * self.z;
        let t1 = self.x - q.x * self.z;
        let t2 = self.z * t0.square();
        let t3 = t1.square();
        let t4 = t1 * t3;
        let t3 = self.x * t3;
        let t5 = t4 - t3.double() + t2;

        self.x = t1 * t5;
        self.y = (t3 - t5) * t0 - self.y * t4;
        self.z *= t4;

        [t0 * q.x - t1 * q.y, -t0, t1]
    }
}

/// Bits of `|x|` walked by the Miller loop, most significant first, without
/// the leading one
fn loop_bits() -> impl Iterator<Item = bool> {
    let bits = 64 - BLS_X.leading_zeros();
    (0..bits - 1).rev().map(|i| (BLS_X >> i) & 1 == 1)
}

/// G₂ point with precomputed Miller loop line coefficients.
#[derive(Clone, Debug)]
pub struct G2Prepared {
    coeffs: [LineCoeffs; ELL_COEFFS],
    len: usize,
    infinity: bool,
}

impl From<G2Affine> for G2Prepared {
    fn from(q: G2Affine) -> G2Prepared {
        G2Prepared::from(&q)
    }
}

impl<'a> From<&'a G2Affine> for G2Prepared {
    fn from(q: &'a G2Affine) -> G2Prepared {
        let mut coeffs = [[Fp2::zero(); 3]; ELL_COEFFS];
        let infinity = bool::from(q.is_identity());
        if infinity {
            return G2Prepared {
                coeffs,
                len: 0,
                infinity,
            };
        }

        let mut r = LinePoint {
            x: q.x,
            y: q.y,
            z: Fp2::one(),
        };
        let mut len = 0;
        for bit in loop_bits() {
            coeffs[len] = r.doubling_step();
            len += 1;
            if bit {
                coeffs[len] = r.addition_step(q);
                len += 1;
            }
        }

        G2Prepared {
            coeffs,
            len,
            infinity,
        }
    }
}

impl G2Prepared {
    /// Line coefficients in Miller loop order
    pub fn coefficients(&self) -> &[LineCoeffs] {
        &self.coeffs[..self.len]
    }

    /// Prepared from the point at infinity
    pub fn is_identity(&self) -> bool {
        self.infinity
    }
}

/// Output of the Miller loop, before the final exponentiation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MillerLoopResult(pub(crate) Fp12);

impl Default for MillerLoopResult {
    fn default() -> Self {
        MillerLoopResult(Fp12::one())
    }
}

impl ConditionallySelectable for MillerLoopResult {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        MillerLoopResult(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl<'a, 'b> Mul<&'b MillerLoopResult> for &'a MillerLoopResult {
    type Output = MillerLoopResult;

    #[inline]
    fn mul(self, rhs: &'b MillerLoopResult) -> MillerLoopResult {
        MillerLoopResult(self.0 * rhs.0)
    }
}

impl_binops_multiplicative!(MillerLoopResult, MillerLoopResult);

/// `a^|x|` conjugated, i.e. `a^x` on the cyclotomic subgroup
fn exp_by_x(a: &Fp12) -> Fp12 {
    let t = a.cyclotomic_exp(BLS_X);
    if BLS_X_IS_NEGATIVE {
        t.conjugate()
    } else {
        t
    }
}

impl MillerLoopResult {
    /// Raise to `(p^12 - 1) / r`.
    pub fn final_exponentiation(&self) -> Gt {
        let f = self.0;

        // easy part: f^((p^6 - 1)(p^2 + 1))
        let t0 = f.frobenius_map(6);
        let t1 = f.invert().unwrap_or(Fp12::zero());
        let t2 = t0 * t1;
        let t1 = t2;
        let t2 = t2.frobenius_map(2) * t1;

        // hard part
        let t1 = t2.cyclotomic_square().conjugate();
        let t3 = exp_by_x(&t2);
        let t4 = t3.cyclotomic_square();
        let t5 = t1 * t3;
        let t1 = exp_by_x(&t5);
        let t0 = exp_by_x(&t1);
        let t6 = exp_by_x(&t0) * t4;
        let t4 = exp_by_x(&t6);
        let t5 = t5.conjugate();
        let t4 = t4 * t5 * t2;
        let t5 = t2.conjugate();
        let t1 = (t1 * t2).frobenius_map(3);
        let t6 = (t6 * t5).frobenius_map(1);
        let t3 = (t3 * t0).frobenius_map(2) * t1 * t6;

        Gt(t3 * t4)
    }
}

/// Miller loop over several pairs sharing one accumulator.
///
/// Pairs with the identity in either slot contribute `1` and are skipped.
pub fn multi_miller_loop(terms: &[(&G1Affine, &G2Prepared)]) -> MillerLoopResult {
    let active = |(p, q): &&(&G1Affine, &G2Prepared)| {
        !bool::from(p.is_identity()) && !q.is_identity()
    };
    let skipped = terms.len() - terms.iter().filter(active).count();
    tracing::debug!(pairs = terms.len(), skipped, "multi miller loop");

    let mut f = Fp12::one();
    let mut j = 0;
    for bit in loop_bits() {
        f = f.square();
        for (p, q) in terms.iter().filter(active) {
            f = ell(&f, &q.coeffs[j], p);
        }
        j += 1;

        if bit {
            for (p, q) in terms.iter().filter(active) {
                f = ell(&f, &q.coeffs[j], p);
            }
            j += 1;
        }
    }

    if BLS_X_IS_NEGATIVE {
        f = f.conjugate();
    }
    MillerLoopResult(f)
}

/// Multiply `f` by the line evaluated at `p`
#[inline]
fn ell(f: &Fp12, coeffs: &LineCoeffs, p: &G1Affine) -> Fp12 {
    let c1 = coeffs[1].mul_by_fp(&p.x);
    let c2 = coeffs[2].mul_by_fp(&p.y);
    f.mul_by_014(&coeffs[0], &c1, &c2)
}

/// `e(p, q)`
pub fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    let q = G2Prepared::from(q);
    multi_miller_loop(&[(p, &q)]).final_exponentiation()
}

/// Product of `e(ps[i], qs[i])` with a single final exponentiation.
///
/// Fails when the slices differ in length.
#[cfg(feature = "alloc")]
pub fn multi_pairing(ps: &[G1Affine], qs: &[G2Affine]) -> Result<Gt> {
    validate::same_length("g1/g2", ps.len(), qs.len())?;

    let prepared: Vec<G2Prepared> = qs.iter().map(G2Prepared::from).collect();
    let terms: Vec<(&G1Affine, &G2Prepared)> = ps.iter().zip(prepared.iter()).collect();

    Ok(multi_miller_loop(&terms).final_exponentiation())
}

/// Whether `prod e(ps[i], qs[i])` is the identity of GT.
#[cfg(feature = "alloc")]
pub fn pairing_check(ps: &[G1Affine], qs: &[G2Affine]) -> Result<bool> {
    let ok = bool::from(multi_pairing(ps, qs)?.is_identity());
    tracing::debug!(pairs = ps.len(), ok, "pairing check");
    Ok(ok)
}

/// `e(G1, G2)` for the fixed generators
const GT_GENERATOR: Fp12 = Fp12 {
    c0: Fp6 {
        c0: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x1972_e433_a01f_85c5,
                0x97d3_2b76_fd77_2538,
                0xc8ce_546f_c96b_cdf9,
                0xcef6_3e73_66d4_0614,
                0xa611_3427_8184_3780,
                0x13f3_448a_3fc6_d825,
            ]),
            c1: Fp::from_raw_unchecked([
                0xd263_31b0_2e9d_6995,
                0x9d68_a482_f779_7e7d,
                0x9c9b_2924_8d39_ea92,
                0xf480_1ca2_e131_07aa,
                0xa16c_0732_bdbc_b066,
                0x083c_a4af_ba36_0478,
            ]),
        },
        c1: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x59e2_61db_0916_b641,
                0x2716_b6f4_b23e_960d,
                0xc8e5_5b10_a0bd_9c45,
                0x0bdb_0bd9_9c4d_eda8,
                0x8cf8_9ebf_57fd_aac5,
                0x12d6_b792_9e77_7a5e,
            ]),
            c1: Fp::from_raw_unchecked([
                0x5fc8_5188_b0e1_5f35,
                0x34a0_6e3a_8f09_6365,
                0xdb31_26a6_e02a_d62c,
                0xfc6f_5aa9_7d9a_990b,
                0xa12f_55f5_eb89_c210,
                0x1723_703a_926f_8889,
            ]),
        },
        c2: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x9358_8f29_7182_8778,
                0x43f6_5b86_11ab_7585,
                0x3183_aaf5_ec27_9fdf,
                0xfa73_d7e1_8ac9_9df6,
                0x64e1_76a6_a64c_99b0,
                0x179f_a78c_5838_8f1f,
            ]),
            c1: Fp::from_raw_unchecked([
                0x672a_0a11_ca2a_ef12,
                0x0d11_b9b5_2aa3_f16b,
                0xa444_12d0_699d_056e,
                0xc01d_0177_221a_5ba5,
                0x66e0_cede_6c73_5529,
                0x05f5_a71e_9fdd_c339,
            ]),
        },
    },
    c1: Fp6 {
        c0: Fp2 {
            c0: Fp::from_raw_unchecked([
                0xd30a_88a1_b062_c679,
                0x5ac5_6a5d_35fc_8304,
                0xd0c8_34a6_a81f_290d,
                0xcd54_30c2_da37_07c7,
                0xf0c2_7ff7_8050_0af0,
                0x0924_5da6_e2d7_2eae,
            ]),
            c1: Fp::from_raw_unchecked([
                0x9f2e_0676_791b_5156,
                0xe2d1_c823_4918_fe13,
                0x4c9e_459f_3c56_1bf4,
                0xa3e8_5e53_b9d3_e3c1,
                0x820a_121e_21a7_0020,
                0x15af_6183_41c5_9acc,
            ]),
        },
        c1: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x7c95_658c_2499_3ab1,
                0x73eb_3872_1ca8_86b9,
                0x5256_d749_4774_34bc,
                0x8ba4_1902_ea50_4a8b,
                0x04a3_d3f8_0c86_ce6d,
                0x18a6_4a87_fb68_6eaa,
            ]),
            c1: Fp::from_raw_unchecked([
                0xbb83_e71b_b920_cf26,
                0x2a52_77ac_92a7_3945,
                0xfc0e_e59f_94f0_46a0,
                0x7158_cdf3_7860_58f7,
                0x7cc1_061b_82f9_45f6,
                0x03f8_47aa_9fdb_e567,
            ]),
        },
        c2: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x8078_dba5_6134_e657,
                0x1cd7_ec9a_4399_8a6e,
                0xb1aa_599a_1a99_3766,
                0xc9a0_f62f_0842_ee44,
                0x8e15_9be3_b605_dffa,
                0x0c86_ba0d_4af1_3fc2,
            ]),
            c1: Fp::from_raw_unchecked([
                0xe80f_f2a0_6a52_ffb1,
                0x7694_ca48_721a_906c,
                0x7583_183e_03b0_8514,
                0xf567_afdd_40ce_e4e2,
                0x9a6d_96d2_e526_a5fc,
                0x197e_9f49_861f_2242,
            ]),
        },
    },
};

/// Element of the order-`r` subgroup of `Fp12*`, written multiplicatively.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Gt(pub(crate) Fp12);

impl Default for Gt {
    fn default() -> Self {
        Gt::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Gt {}

impl fmt::Display for Gt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl<'a, 'b> Mul<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn mul(self, rhs: &'b Gt) -> Gt {
        Gt(self.0 * rhs.0)
    }
}

impl_binops_multiplicative!(Gt, Gt);

impl Gt {
    /// The identity, `1` in Fp12.
    pub fn identity() -> Gt {
        Gt(Fp12::one())
    }

    /// `e(G1, G2)` for the fixed generators.
    pub fn generator() -> Gt {
        Gt(GT_GENERATOR)
    }

    /// Random element, as a random power of the generator.
    pub fn random(rng: impl RngCore) -> Gt {
        Gt::generator().pow(&Scalar::random(rng))
    }

    /// Underlying Fp12 value.
    pub fn as_fp12(&self) -> &Fp12 {
        &self.0
    }

    /// Whether this is the identity.
    pub fn is_identity(&self) -> Choice {
        self.0.is_one()
    }

    /// `self^2`
    pub fn square(&self) -> Gt {
        Gt(self.0.square())
    }

    /// Inverse; conjugation on the cyclotomic subgroup.
    pub fn invert(&self) -> Gt {
        Gt(self.0.conjugate())
    }

    /// `self^s` with a fixed 255-step square-and-multiply.
    pub fn pow(&self, s: &Scalar) -> Gt {
        let limbs = s.to_canonical_limbs();
        let mut acc = Fp12::one();
        for i in (0..NUM_BITS as usize).rev() {
            acc = acc.square();
            let bit = Choice::from(((limbs[i / 64] >> (i % 64)) & 1) as u8);
            acc = Fp12::conditional_select(&acc, &(acc * self.0), bit);
        }
        Gt(acc)
    }

    /// Subgroup membership, `x^r == 1` for non-zero `x`.
    pub fn is_valid(&self) -> Choice {
        (!self.0.is_zero()) & self.0.pow_vartime(&scalar::MODULUS.0).is_one()
    }

    /// Encode the Fp12 value, 576 bytes.
    pub fn to_bytes(&self) -> [u8; 576] {
        self.0.to_bytes()
    }

    /// Decode and check subgroup membership.
    pub fn from_bytes(bytes: &[u8; 576]) -> Result<Gt> {
        let gt = Self::from_bytes_unchecked(bytes)?;
        if !bool::from(gt.is_valid()) {
            tracing::debug!("rejected GT element outside the subgroup");
            return Err(Error::NotInSubgroup { group: "GT" });
        }
        Ok(gt)
    }

    /// Decode, checking only that every coefficient is reduced.
    pub fn from_bytes_unchecked(bytes: &[u8; 576]) -> Result<Gt> {
        Option::<Fp12>::from(Fp12::from_bytes(bytes))
            .map(Gt)
            .ok_or_else(|| {
                tracing::debug!("rejected non-canonical GT encoding");
                Error::NonCanonical { context: "Fp12" }
            })
    }
}

impl bls381_api::Serialize for Gt {
    fn from_bytes(bytes: &[u8]) -> bls381_api::Result<Self> {
        crate::error::validate::length("Gt::from_bytes", bytes.len(), 576)?;
        let mut array = [0u8; 576];
        array.copy_from_slice(bytes);
        Ok(Gt::from_bytes(&array)?)
    }

    #[cfg(feature = "alloc")]
    fn to_bytes(&self) -> alloc::vec::Vec<u8> {
        Gt::to_bytes(self).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepared_uses_68_slots() {
        let prep = G2Prepared::from(G2Affine::generator());
        assert_eq!(prep.coefficients().len(), 68);
        assert!(!prep.is_identity());

        let prep = G2Prepared::from(G2Affine::identity());
        assert!(prep.coefficients().is_empty());
        assert!(prep.is_identity());
    }

    #[test]
    fn loop_walks_63_bits() {
        assert_eq!(loop_bits().count(), 63);
        assert_eq!(loop_bits().filter(|b| *b).count(), 5);
    }

    #[test]
    fn generator_is_in_gt() {
        assert!(bool::from(Gt::generator().is_valid()));
        assert!(!bool::from(Gt::generator().is_identity()));
    }
}
